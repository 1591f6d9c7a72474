use super::error::{
    InvalidParameterError, ensure_finite, ensure_inflation, ensure_non_negative, ensure_rate,
    ensure_representable,
};
use super::formulas::{
    annuity_due_factor, annuity_due_present_value_factor, compound_factor,
    fisher_real_rate_percent, future_value, monthly_rate,
};
use super::types::{
    CompoundInterestParameters, CompoundInterestResult, GrowthParameters,
    InflationAdjustedResult, InflationParameters, ProjectionResult, RetirementParameters,
    RetirementResult, YearProjection,
};

pub const MAX_GROWTH_YEARS: f64 = 1_000.0;

/// Upper bound for both the saving years before retirement and the years
/// spent in it.
pub const MAX_RETIREMENT_YEARS: u32 = 1_000;

/// Daily compounding is the finest frequency accepted.
pub const MAX_COMPOUNDING_PER_YEAR: u32 = 365;

pub fn compute_growth(params: &GrowthParameters) -> Result<ProjectionResult, InvalidParameterError> {
    let months = validate_growth(params)?;
    let result = project_growth(params, months)?;
    log::debug!(
        "growth over {months} months: invested {:.2}, future value {:.2}",
        result.total_invested,
        result.future_value
    );
    Ok(result)
}

pub fn compute_inflation_adjusted_growth(
    params: &InflationParameters,
) -> Result<InflationAdjustedResult, InvalidParameterError> {
    let months = validate_growth(&params.growth)?;
    ensure_inflation("inflationPercent", params.inflation_percent)?;

    let nominal = project_growth(&params.growth, months)?;
    let real_rate_percent =
        fisher_real_rate_percent(params.growth.annual_rate_percent, params.inflation_percent);
    let real_future_value = future_value(
        params.growth.principal,
        params.growth.monthly_contribution,
        monthly_rate(real_rate_percent),
        months,
    );
    ensure_representable("inflationPercent", real_future_value)?;
    log::debug!(
        "real rate {real_rate_percent:.4}%: nominal {:.2}, real {real_future_value:.2}",
        nominal.future_value
    );

    Ok(InflationAdjustedResult {
        nominal,
        real_rate_percent,
        real_future_value,
    })
}

pub fn compute_retirement_plan(
    params: &RetirementParameters,
) -> Result<RetirementResult, InvalidParameterError> {
    validate_retirement(params)?;

    let years_to_retirement = params.retirement_age - params.current_age;
    let inflated_monthly_expenses = params.monthly_expenses_today
        * compound_factor(params.inflation_percent / 100.0, years_to_retirement);

    let real_return =
        fisher_real_rate_percent(params.expected_return_percent, params.inflation_percent) / 100.0;
    let withdrawal_factor =
        annuity_due_present_value_factor(real_return, params.years_in_retirement);
    let corpus_needed = inflated_monthly_expenses * 12.0 * withdrawal_factor;

    let projected_savings_at_retirement = params.current_savings
        * compound_factor(params.expected_return_percent / 100.0, years_to_retirement);

    let shortfall = (corpus_needed - projected_savings_at_retirement).max(0.0);
    let contribution_factor = annuity_due_factor(
        monthly_rate(params.expected_return_percent),
        years_to_retirement * 12,
    );
    let additional_monthly_investment_needed = shortfall / contribution_factor;
    let sustainable_monthly_income = projected_savings_at_retirement / withdrawal_factor / 12.0;

    ensure_representable("inflationPercent", inflated_monthly_expenses)?;
    ensure_representable("inflationPercent", corpus_needed)?;
    ensure_representable("expectedReturnPercent", projected_savings_at_retirement)?;
    ensure_representable("expectedReturnPercent", additional_monthly_investment_needed)?;
    ensure_representable("expectedReturnPercent", sustainable_monthly_income)?;

    let is_sufficient = projected_savings_at_retirement >= corpus_needed;
    log::debug!(
        "retirement in {years_to_retirement} years: corpus {corpus_needed:.2}, \
         projected {projected_savings_at_retirement:.2}, sufficient {is_sufficient}"
    );

    Ok(RetirementResult {
        years_to_retirement,
        inflated_monthly_expenses,
        corpus_needed,
        projected_savings_at_retirement,
        shortfall,
        additional_monthly_investment_needed,
        sustainable_monthly_income,
        is_sufficient,
    })
}

/// Lump sum compounded `compoundingPerYear` times a year, without
/// contributions.
pub fn compute_compound_interest(
    params: &CompoundInterestParameters,
) -> Result<CompoundInterestResult, InvalidParameterError> {
    ensure_non_negative("principal", params.principal)?;
    ensure_rate("annualRatePercent", params.annual_rate_percent)?;
    ensure_finite("years", params.years)?;
    if params.years <= 0.0 {
        return Err(InvalidParameterError::new("years", "must be > 0"));
    }
    if params.years > MAX_GROWTH_YEARS {
        return Err(InvalidParameterError::new("years", "must be <= 1000"));
    }
    if !(1..=MAX_COMPOUNDING_PER_YEAR).contains(&params.compounding_per_year) {
        return Err(InvalidParameterError::new(
            "compoundingPerYear",
            "must be between 1 and 365",
        ));
    }

    let per_year = f64::from(params.compounding_per_year);
    let periods = (params.years * per_year).round() as u32;
    if periods == 0 {
        return Err(InvalidParameterError::new(
            "years",
            "must cover at least one compounding period",
        ));
    }
    let rate = params.annual_rate_percent / 100.0 / per_year;
    let final_amount = params.principal * compound_factor(rate, periods);
    ensure_representable("annualRatePercent", final_amount)?;
    log::debug!("compound interest over {periods} periods: {final_amount:.2}");

    Ok(CompoundInterestResult {
        periods,
        final_amount,
        interest_earned: final_amount - params.principal,
    })
}

fn validate_growth(params: &GrowthParameters) -> Result<u32, InvalidParameterError> {
    ensure_finite("years", params.years)?;
    if params.years <= 0.0 {
        return Err(InvalidParameterError::new("years", "must be > 0"));
    }
    if params.years > MAX_GROWTH_YEARS {
        return Err(InvalidParameterError::new("years", "must be <= 1000"));
    }
    ensure_non_negative("principal", params.principal)?;
    ensure_non_negative("monthlyContribution", params.monthly_contribution)?;
    ensure_rate("annualRatePercent", params.annual_rate_percent)?;

    let months = (params.years * 12.0).round() as u32;
    if months == 0 {
        return Err(InvalidParameterError::new(
            "years",
            "must cover at least one month",
        ));
    }
    Ok(months)
}

fn validate_retirement(params: &RetirementParameters) -> Result<(), InvalidParameterError> {
    if params.retirement_age <= params.current_age {
        return Err(InvalidParameterError::new(
            "retirementAge",
            "must be > currentAge",
        ));
    }
    if params.retirement_age - params.current_age > MAX_RETIREMENT_YEARS {
        return Err(InvalidParameterError::new(
            "retirementAge",
            "must be at most 1000 years after currentAge",
        ));
    }
    if params.years_in_retirement == 0 {
        return Err(InvalidParameterError::new("yearsInRetirement", "must be > 0"));
    }
    if params.years_in_retirement > MAX_RETIREMENT_YEARS {
        return Err(InvalidParameterError::new(
            "yearsInRetirement",
            "must be <= 1000",
        ));
    }
    ensure_non_negative("monthlyExpensesToday", params.monthly_expenses_today)?;
    ensure_non_negative("currentSavings", params.current_savings)?;
    ensure_finite("expectedReturnPercent", params.expected_return_percent)?;
    if params.expected_return_percent <= -100.0 {
        return Err(InvalidParameterError::new(
            "expectedReturnPercent",
            "must be > -100",
        ));
    }
    ensure_inflation("inflationPercent", params.inflation_percent)
}

// Each breakdown point is recomputed from the closed form rather than rolled
// forward, so late years carry no accumulated rounding drift.
fn project_growth(
    params: &GrowthParameters,
    months: u32,
) -> Result<ProjectionResult, InvalidParameterError> {
    let rate = monthly_rate(params.annual_rate_percent);
    let value_at = |month: u32| {
        future_value(
            params.principal,
            params.monthly_contribution,
            rate,
            month,
        )
    };
    let invested_at = |month: u32| params.principal + params.monthly_contribution * month as f64;

    let whole_years = months / 12;
    let mut yearly_breakdown = Vec::with_capacity(whole_years as usize + 1);
    for year in 1..=whole_years {
        yearly_breakdown.push(YearProjection {
            year,
            invested_to_date: invested_at(year * 12),
            value_at_year_end: value_at(year * 12),
        });
    }
    if months % 12 != 0 {
        yearly_breakdown.push(YearProjection {
            year: whole_years + 1,
            invested_to_date: invested_at(months),
            value_at_year_end: value_at(months),
        });
    }

    let total_invested = invested_at(months);
    ensure_representable("monthlyContribution", total_invested)?;
    // Breakdown points are bounded by the final value for positive rates and
    // by the amount invested otherwise, so these checks cover the series.
    let future_value = value_at(months);
    ensure_representable("annualRatePercent", future_value)?;
    let total_returns = future_value - total_invested;
    let wealth_gained_percent = if total_invested > 0.0 {
        total_returns / total_invested * 100.0
    } else {
        0.0
    };

    ensure_representable("annualRatePercent", wealth_gained_percent)?;

    Ok(ProjectionResult {
        total_invested,
        total_returns,
        future_value,
        wealth_gained_percent,
        yearly_breakdown,
    })
}
