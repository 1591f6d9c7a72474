use super::error::{
    InvalidParameterError, ensure_finite, ensure_non_negative, ensure_rate, ensure_representable,
};
use super::formulas::{annuity_due_factor, compound_factor, future_value, monthly_rate};
use super::types::{
    ContributionScenario, ContributionScenarioParameters, GoalParameters,
    MinimumContributionResult, ReturnScenario, ReturnScenarioParameters, TargetParameters,
    TimeToGoalResult,
};

/// Longest horizon the time-to-goal search walks before giving up.
pub const MAX_GOAL_MONTHS: u32 = 1_200;

pub const MAX_TARGET_YEARS: u32 = 1_000;

/// Most scenarios a single what-if comparison will evaluate.
pub const MAX_SCENARIOS: usize = 50;

/// Months until the balance first reaches the target.
///
/// Each month the contribution lands first and then the whole balance grows,
/// which is the recurrence behind the annuity-due closed form. Not reaching
/// the target within [`MAX_GOAL_MONTHS`] is reported, not treated as an error.
pub fn compute_time_to_goal(
    params: &GoalParameters,
) -> Result<TimeToGoalResult, InvalidParameterError> {
    ensure_non_negative("currentAmount", params.current_amount)?;
    ensure_positive("targetAmount", params.target_amount)?;
    ensure_non_negative("monthlyContribution", params.monthly_contribution)?;
    ensure_rate("annualRatePercent", params.annual_rate_percent)?;

    let rate = monthly_rate(params.annual_rate_percent);
    let mut balance = params.current_amount;
    let mut invested = params.current_amount;
    let mut months = 0;

    while balance < params.target_amount && months < MAX_GOAL_MONTHS {
        months += 1;
        balance = (balance + params.monthly_contribution) * (1.0 + rate);
        invested += params.monthly_contribution;
    }

    ensure_representable("annualRatePercent", balance)?;
    let reachable = balance >= params.target_amount;
    let message = if !reachable {
        format!(
            "Target not reached within {} years at this contribution and return.",
            MAX_GOAL_MONTHS / 12
        )
    } else if months == 0 {
        "Current amount already meets the target.".to_string()
    } else {
        format!("Target reached in {} years and {} months.", months / 12, months % 12)
    };
    log::debug!("time to goal: {months} months, reachable {reachable}");

    Ok(TimeToGoalResult {
        reachable,
        months,
        years: months as f64 / 12.0,
        final_amount: balance,
        total_invested: invested,
        total_returns: balance - invested,
        message,
    })
}

/// Smallest level monthly contribution that grows to the target in time.
pub fn compute_minimum_contribution(
    params: &TargetParameters,
) -> Result<MinimumContributionResult, InvalidParameterError> {
    ensure_non_negative("currentAmount", params.current_amount)?;
    ensure_positive("targetAmount", params.target_amount)?;
    if params.years == 0 {
        return Err(InvalidParameterError::new("years", "must be > 0"));
    }
    if params.years > MAX_TARGET_YEARS {
        return Err(InvalidParameterError::new("years", "must be <= 1000"));
    }
    ensure_rate("annualRatePercent", params.annual_rate_percent)?;

    let months = params.years * 12;
    let rate = monthly_rate(params.annual_rate_percent);
    let grown_current = params.current_amount * compound_factor(rate, months);
    let gap = (params.target_amount - grown_current).max(0.0);
    let already_met = gap == 0.0;

    let monthly_contribution = gap / annuity_due_factor(rate, months);
    let total_to_invest = params.current_amount + monthly_contribution * months as f64;
    let final_amount = grown_current + monthly_contribution * annuity_due_factor(rate, months);
    ensure_representable("annualRatePercent", final_amount)?;

    Ok(MinimumContributionResult {
        monthly_contribution,
        total_to_invest,
        expected_returns: final_amount - total_to_invest,
        target_years: params.years,
        already_met,
    })
}

/// Future value of the same savings plan at each of several annual returns,
/// in the order the rates were given.
pub fn compare_return_rates(
    params: &ReturnScenarioParameters,
) -> Result<Vec<ReturnScenario>, InvalidParameterError> {
    ensure_non_negative("currentAmount", params.current_amount)?;
    ensure_non_negative("monthlyContribution", params.monthly_contribution)?;
    let months = scenario_months(params.years)?;
    ensure_scenario_count("annualRatesPercent", params.annual_rates_percent.len())?;

    let total_invested = params.current_amount + params.monthly_contribution * months as f64;
    params
        .annual_rates_percent
        .iter()
        .map(|&annual_rate_percent| -> Result<ReturnScenario, InvalidParameterError> {
            ensure_rate("annualRatesPercent", annual_rate_percent)?;
            let value = future_value(
                params.current_amount,
                params.monthly_contribution,
                monthly_rate(annual_rate_percent),
                months,
            );
            ensure_representable("annualRatesPercent", value)?;
            Ok(ReturnScenario {
                annual_rate_percent,
                future_value: value,
                total_invested,
                total_returns: value - total_invested,
            })
        })
        .collect()
}

/// Future value and remaining shortfall against a target for each of several
/// monthly contributions, in the order they were given.
pub fn compare_contributions(
    params: &ContributionScenarioParameters,
) -> Result<Vec<ContributionScenario>, InvalidParameterError> {
    ensure_non_negative("currentAmount", params.current_amount)?;
    ensure_positive("targetAmount", params.target_amount)?;
    ensure_rate("annualRatePercent", params.annual_rate_percent)?;
    let months = scenario_months(params.years)?;
    ensure_scenario_count("monthlyContributions", params.monthly_contributions.len())?;

    let rate = monthly_rate(params.annual_rate_percent);
    let scenarios = params
        .monthly_contributions
        .iter()
        .map(|&monthly_contribution| -> Result<ContributionScenario, InvalidParameterError> {
            ensure_non_negative("monthlyContributions", monthly_contribution)?;
            let value = future_value(params.current_amount, monthly_contribution, rate, months);
            ensure_representable("annualRatePercent", value)?;
            Ok(ContributionScenario {
                monthly_contribution,
                future_value: value,
                goal_achievable: value >= params.target_amount,
                shortfall: (params.target_amount - value).max(0.0),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    log::debug!(
        "{} of {} contribution scenarios reach {:.2}",
        scenarios.iter().filter(|s| s.goal_achievable).count(),
        scenarios.len(),
        params.target_amount
    );
    Ok(scenarios)
}

/// Share of a goal already funded, in percent, capped at 100.
pub fn goal_progress(current: f64, target: f64) -> Result<f64, InvalidParameterError> {
    ensure_non_negative("currentAmount", current)?;
    ensure_positive("targetAmount", target)?;
    Ok((current / target * 100.0).min(100.0))
}

fn scenario_months(years: u32) -> Result<u32, InvalidParameterError> {
    if years == 0 {
        return Err(InvalidParameterError::new("years", "must be > 0"));
    }
    if years > MAX_TARGET_YEARS {
        return Err(InvalidParameterError::new("years", "must be <= 1000"));
    }
    Ok(years * 12)
}

fn ensure_scenario_count(field: &'static str, count: usize) -> Result<(), InvalidParameterError> {
    if count == 0 {
        return Err(InvalidParameterError::new(field, "must not be empty"));
    }
    if count > MAX_SCENARIOS {
        return Err(InvalidParameterError::new(
            field,
            format!("must hold at most {MAX_SCENARIOS} values"),
        ));
    }
    Ok(())
}

fn ensure_positive(field: &'static str, value: f64) -> Result<(), InvalidParameterError> {
    ensure_finite(field, value)?;
    if value <= 0.0 {
        return Err(InvalidParameterError::new(field, "must be > 0"));
    }
    Ok(())
}
