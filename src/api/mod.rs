use axum::{
    Router,
    extract::{Json, Query},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use tokio::net::TcpListener;

use crate::core::{
    CompoundInterestParameters, ContributionScenarioParameters, GoalParameters, GrowthParameters,
    InflationParameters, InvalidParameterError, LoanParameters, RetirementParameters,
    ReturnScenarioParameters, TargetParameters, compare_contributions, compare_extra_payment,
    compare_return_rates, compute_compound_interest, compute_growth,
    compute_inflation_adjusted_growth, compute_loan_amortization, compute_minimum_contribution,
    compute_retirement_plan, compute_time_to_goal, goal_progress,
};

pub mod cli;

// Defaults mirror the starting values of the calculator forms.
const DEFAULT_MONTHLY_CONTRIBUTION: f64 = 10_000.0;
const DEFAULT_RETURN_PERCENT: f64 = 12.0;
const DEFAULT_YEARS: f64 = 10.0;
const DEFAULT_INFLATION_PERCENT: f64 = 6.0;
const DEFAULT_CURRENT_AGE: u32 = 30;
const DEFAULT_RETIREMENT_AGE: u32 = 60;
const DEFAULT_MONTHLY_EXPENSES: f64 = 50_000.0;
const DEFAULT_CURRENT_SAVINGS: f64 = 500_000.0;
const DEFAULT_LOAN_PRINCIPAL: f64 = 1_000_000.0;
const DEFAULT_LOAN_RATE_PERCENT: f64 = 8.0;
const DEFAULT_TENURE_MONTHS: u32 = 240;
const DEFAULT_GOAL_CURRENT: f64 = 100_000.0;
const DEFAULT_GOAL_TARGET: f64 = 1_000_000.0;
const DEFAULT_LUMP_SUM: f64 = 100_000.0;
const DEFAULT_COMPOUNDING_PER_YEAR: u32 = 12;
const DEFAULT_SCENARIO_RATES: [f64; 4] = [8.0, 10.0, 12.0, 15.0];
const DEFAULT_SCENARIO_CONTRIBUTIONS: [f64; 4] = [5_000.0, 10_000.0, 15_000.0, 20_000.0];

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct GrowthPayload {
    principal: Option<f64>,
    #[serde(alias = "monthlyInvestment", alias = "monthly_investment")]
    monthly_contribution: Option<f64>,
    #[serde(alias = "expectedReturnRate", alias = "expected_return_rate")]
    annual_rate_percent: Option<f64>,
    #[serde(alias = "timePeriodYears", alias = "time_period_years")]
    years: Option<f64>,
    #[serde(alias = "inflationRate", alias = "inflation_rate")]
    inflation_percent: Option<f64>,
}

impl GrowthPayload {
    fn growth_params(&self) -> GrowthParameters {
        GrowthParameters {
            principal: self.principal.unwrap_or(0.0),
            monthly_contribution: self
                .monthly_contribution
                .unwrap_or(DEFAULT_MONTHLY_CONTRIBUTION),
            annual_rate_percent: self.annual_rate_percent.unwrap_or(DEFAULT_RETURN_PERCENT),
            years: self.years.unwrap_or(DEFAULT_YEARS),
        }
    }

    fn inflation_params(&self) -> InflationParameters {
        InflationParameters {
            growth: self.growth_params(),
            inflation_percent: self.inflation_percent.unwrap_or(DEFAULT_INFLATION_PERCENT),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RetirementPayload {
    #[serde(alias = "current_age")]
    current_age: Option<u32>,
    #[serde(alias = "retirement_age")]
    retirement_age: Option<u32>,
    #[serde(alias = "monthlyExpense", alias = "monthly_expense")]
    monthly_expenses_today: Option<f64>,
    #[serde(alias = "current_savings")]
    current_savings: Option<f64>,
    #[serde(alias = "expectedReturnRate", alias = "expected_return_rate")]
    expected_return_percent: Option<f64>,
    #[serde(alias = "inflationRate", alias = "inflation_rate")]
    inflation_percent: Option<f64>,
    #[serde(alias = "years_in_retirement")]
    years_in_retirement: Option<u32>,
}

impl RetirementPayload {
    // The retirement horizon has no safe default, so it must be sent.
    fn params(&self) -> Result<RetirementParameters, InvalidParameterError> {
        let Some(years_in_retirement) = self.years_in_retirement else {
            return Err(InvalidParameterError::new(
                "yearsInRetirement",
                "is required",
            ));
        };
        Ok(RetirementParameters {
            current_age: self.current_age.unwrap_or(DEFAULT_CURRENT_AGE),
            retirement_age: self.retirement_age.unwrap_or(DEFAULT_RETIREMENT_AGE),
            monthly_expenses_today: self
                .monthly_expenses_today
                .unwrap_or(DEFAULT_MONTHLY_EXPENSES),
            current_savings: self.current_savings.unwrap_or(DEFAULT_CURRENT_SAVINGS),
            expected_return_percent: self
                .expected_return_percent
                .unwrap_or(DEFAULT_RETURN_PERCENT),
            inflation_percent: self.inflation_percent.unwrap_or(DEFAULT_INFLATION_PERCENT),
            years_in_retirement,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct LoanPayload {
    principal: Option<f64>,
    #[serde(alias = "annualInterestRate", alias = "annual_interest_rate")]
    annual_rate_percent: Option<f64>,
    #[serde(alias = "tenure_months")]
    tenure_months: Option<u32>,
    #[serde(alias = "extraPayment", alias = "extra_payment")]
    extra_monthly_payment: Option<f64>,
}

impl LoanPayload {
    fn params(&self) -> LoanParameters {
        LoanParameters {
            principal: self.principal.unwrap_or(DEFAULT_LOAN_PRINCIPAL),
            annual_rate_percent: self.annual_rate_percent.unwrap_or(DEFAULT_LOAN_RATE_PERCENT),
            tenure_months: self.tenure_months.unwrap_or(DEFAULT_TENURE_MONTHS),
            extra_monthly_payment: self.extra_monthly_payment.unwrap_or(0.0),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct GoalPayload {
    #[serde(alias = "current_amount")]
    current_amount: Option<f64>,
    #[serde(alias = "target_amount")]
    target_amount: Option<f64>,
    #[serde(alias = "monthly_contribution")]
    monthly_contribution: Option<f64>,
    #[serde(alias = "expectedReturn", alias = "expected_return")]
    annual_rate_percent: Option<f64>,
    years: Option<u32>,
}

impl GoalPayload {
    fn goal_params(&self) -> GoalParameters {
        GoalParameters {
            current_amount: self.current_amount.unwrap_or(DEFAULT_GOAL_CURRENT),
            target_amount: self.target_amount.unwrap_or(DEFAULT_GOAL_TARGET),
            monthly_contribution: self
                .monthly_contribution
                .unwrap_or(DEFAULT_MONTHLY_CONTRIBUTION),
            annual_rate_percent: self.annual_rate_percent.unwrap_or(DEFAULT_RETURN_PERCENT),
        }
    }

    fn target_params(&self) -> TargetParameters {
        TargetParameters {
            current_amount: self.current_amount.unwrap_or(DEFAULT_GOAL_CURRENT),
            target_amount: self.target_amount.unwrap_or(DEFAULT_GOAL_TARGET),
            years: self.years.unwrap_or(DEFAULT_YEARS as u32),
            annual_rate_percent: self.annual_rate_percent.unwrap_or(DEFAULT_RETURN_PERCENT),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct CompoundInterestPayload {
    principal: Option<f64>,
    #[serde(alias = "annualRate", alias = "annual_rate")]
    annual_rate_percent: Option<f64>,
    years: Option<f64>,
    #[serde(alias = "compoundingFrequency", alias = "compounding_frequency")]
    compounding_per_year: Option<u32>,
}

impl CompoundInterestPayload {
    fn params(&self) -> CompoundInterestParameters {
        CompoundInterestParameters {
            principal: self.principal.unwrap_or(DEFAULT_LUMP_SUM),
            annual_rate_percent: self.annual_rate_percent.unwrap_or(DEFAULT_RETURN_PERCENT),
            years: self.years.unwrap_or(DEFAULT_YEARS),
            compounding_per_year: self
                .compounding_per_year
                .unwrap_or(DEFAULT_COMPOUNDING_PER_YEAR),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ScenarioPayload {
    #[serde(alias = "current_amount")]
    current_amount: Option<f64>,
    #[serde(alias = "target_amount")]
    target_amount: Option<f64>,
    #[serde(alias = "monthly_contribution")]
    monthly_contribution: Option<f64>,
    #[serde(alias = "expectedReturn", alias = "expected_return")]
    annual_rate_percent: Option<f64>,
    years: Option<u32>,
    #[serde(alias = "returnRates", alias = "return_rates")]
    annual_rates_percent: Option<Vec<f64>>,
    #[serde(alias = "contributionAmounts", alias = "contribution_amounts")]
    monthly_contributions: Option<Vec<f64>>,
}

impl ScenarioPayload {
    fn return_params(&self) -> ReturnScenarioParameters {
        ReturnScenarioParameters {
            current_amount: self.current_amount.unwrap_or(0.0),
            monthly_contribution: self
                .monthly_contribution
                .unwrap_or(DEFAULT_MONTHLY_CONTRIBUTION),
            years: self.years.unwrap_or(DEFAULT_YEARS as u32),
            annual_rates_percent: self
                .annual_rates_percent
                .clone()
                .unwrap_or_else(|| DEFAULT_SCENARIO_RATES.to_vec()),
        }
    }

    fn contribution_params(&self) -> ContributionScenarioParameters {
        ContributionScenarioParameters {
            current_amount: self.current_amount.unwrap_or(0.0),
            target_amount: self.target_amount.unwrap_or(DEFAULT_GOAL_TARGET),
            annual_rate_percent: self.annual_rate_percent.unwrap_or(DEFAULT_RETURN_PERCENT),
            years: self.years.unwrap_or(DEFAULT_YEARS as u32),
            monthly_contributions: self
                .monthly_contributions
                .clone()
                .unwrap_or_else(|| DEFAULT_SCENARIO_CONTRIBUTIONS.to_vec()),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProgressQuery {
    current_amount: f64,
    target_amount: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ProgressResponse {
    progress_percent: f64,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

pub fn router() -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/api/calculators/growth", post(growth_handler))
        .route("/api/calculators/inflation", post(inflation_handler))
        .route("/api/calculators/retirement", post(retirement_handler))
        .route("/api/calculators/loan", post(loan_handler))
        .route("/api/calculators/loan/compare", post(loan_compare_handler))
        .route(
            "/api/calculators/compound-interest",
            post(compound_interest_handler),
        )
        .route("/api/goals/time-to-target", post(time_to_target_handler))
        .route(
            "/api/goals/minimum-contribution",
            post(minimum_contribution_handler),
        )
        .route("/api/goals/progress", get(progress_handler))
        .route(
            "/api/simulations/what-if/returns",
            post(what_if_returns_handler),
        )
        .route(
            "/api/simulations/what-if/contributions",
            post(what_if_contributions_handler),
        )
        .fallback(not_found_handler)
}

pub async fn run_http_server(addr: SocketAddr) -> std::io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    log::info!("projection API listening on http://{addr}");
    log::info!("local access: http://127.0.0.1:{}/health", addr.port());

    axum::serve(listener, router()).await
}

async fn health_handler() -> Response {
    json_response(StatusCode::OK, HealthResponse { status: "ok" })
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

async fn growth_handler(Json(payload): Json<GrowthPayload>) -> Response {
    calculation_response("growth", compute_growth(&payload.growth_params()))
}

async fn inflation_handler(Json(payload): Json<GrowthPayload>) -> Response {
    calculation_response(
        "inflation",
        compute_inflation_adjusted_growth(&payload.inflation_params()),
    )
}

async fn retirement_handler(Json(payload): Json<RetirementPayload>) -> Response {
    let result = payload
        .params()
        .and_then(|params| compute_retirement_plan(&params));
    calculation_response("retirement", result)
}

async fn loan_handler(Json(payload): Json<LoanPayload>) -> Response {
    calculation_response("loan", compute_loan_amortization(&payload.params()))
}

async fn loan_compare_handler(Json(payload): Json<LoanPayload>) -> Response {
    calculation_response("loan comparison", compare_extra_payment(&payload.params()))
}

async fn compound_interest_handler(Json(payload): Json<CompoundInterestPayload>) -> Response {
    calculation_response(
        "compound interest",
        compute_compound_interest(&payload.params()),
    )
}

async fn what_if_returns_handler(Json(payload): Json<ScenarioPayload>) -> Response {
    calculation_response(
        "what-if returns",
        compare_return_rates(&payload.return_params()),
    )
}

async fn what_if_contributions_handler(Json(payload): Json<ScenarioPayload>) -> Response {
    calculation_response(
        "what-if contributions",
        compare_contributions(&payload.contribution_params()),
    )
}

async fn time_to_target_handler(Json(payload): Json<GoalPayload>) -> Response {
    calculation_response("time to target", compute_time_to_goal(&payload.goal_params()))
}

async fn minimum_contribution_handler(Json(payload): Json<GoalPayload>) -> Response {
    calculation_response(
        "minimum contribution",
        compute_minimum_contribution(&payload.target_params()),
    )
}

async fn progress_handler(Query(query): Query<ProgressQuery>) -> Response {
    let result = goal_progress(query.current_amount, query.target_amount)
        .map(|progress_percent| ProgressResponse { progress_percent });
    calculation_response("goal progress", result)
}

fn calculation_response<T: Serialize>(
    calculator: &str,
    result: Result<T, InvalidParameterError>,
) -> Response {
    match result {
        Ok(body) => {
            log::info!("served {calculator} calculation");
            json_response(StatusCode::OK, body)
        }
        Err(err) => {
            log::warn!("rejected {calculator} request: {err}");
            error_response(StatusCode::BAD_REQUEST, &err.to_string())
        }
    }
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    let mut response = (status, Json(body)).into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        header::HeaderValue::from_static("no-store"),
    );
    response
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_approx(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn growth_payload_accepts_calculator_form_keys() {
        let payload: GrowthPayload = serde_json::from_str(
            r#"{"monthly_investment": 5000, "expected_return_rate": 12, "time_period_years": 10}"#,
        )
        .expect("valid json");
        let params = payload.growth_params();
        assert_approx(params.monthly_contribution, 5_000.0);
        assert_approx(params.annual_rate_percent, 12.0);
        assert_approx(params.years, 10.0);
        assert_approx(params.principal, 0.0);
    }

    #[test]
    fn empty_growth_payload_uses_form_defaults() {
        let payload: GrowthPayload = serde_json::from_str("{}").expect("valid json");
        let params = payload.inflation_params();
        assert_approx(params.growth.monthly_contribution, DEFAULT_MONTHLY_CONTRIBUTION);
        assert_approx(params.growth.years, DEFAULT_YEARS);
        assert_approx(params.inflation_percent, DEFAULT_INFLATION_PERCENT);
    }

    #[test]
    fn retirement_payload_requires_horizon() {
        let payload: RetirementPayload =
            serde_json::from_str(r#"{"currentAge": 35, "retirementAge": 60}"#)
                .expect("valid json");
        let err = payload.params().expect_err("horizon is required");
        assert_eq!(err.to_string(), "yearsInRetirement is required");
    }

    #[test]
    fn retirement_payload_parses_camel_and_snake_keys() {
        let payload: RetirementPayload = serde_json::from_str(
            r#"{"current_age": 40, "retirementAge": 65, "monthly_expense": 2000,
                "currentSavings": 10000, "expected_return_rate": 8,
                "inflationPercent": 3, "yearsInRetirement": 30}"#,
        )
        .expect("valid json");
        let params = payload.params().expect("complete payload");
        assert_eq!(params.current_age, 40);
        assert_eq!(params.retirement_age, 65);
        assert_approx(params.monthly_expenses_today, 2_000.0);
        assert_approx(params.expected_return_percent, 8.0);
        assert_approx(params.inflation_percent, 3.0);
        assert_eq!(params.years_in_retirement, 30);
    }

    #[test]
    fn loan_payload_maps_snake_case_field_names() {
        let payload: LoanPayload = serde_json::from_str(
            r#"{"principal": 500000, "annual_interest_rate": 9.5, "tenure_months": 120, "extra_payment": 1000}"#,
        )
        .expect("valid json");
        let params = payload.params();
        assert_approx(params.principal, 500_000.0);
        assert_approx(params.annual_rate_percent, 9.5);
        assert_eq!(params.tenure_months, 120);
        assert_approx(params.extra_monthly_payment, 1_000.0);
    }

    #[test]
    fn empty_retirement_payload_uses_form_defaults() {
        let payload: RetirementPayload =
            serde_json::from_str(r#"{"yearsInRetirement": 20}"#).expect("valid json");
        let params = payload.params().expect("horizon given");
        assert_eq!(params.current_age, DEFAULT_CURRENT_AGE);
        assert_eq!(params.retirement_age, DEFAULT_RETIREMENT_AGE);
        assert_approx(params.monthly_expenses_today, DEFAULT_MONTHLY_EXPENSES);
        assert_approx(params.current_savings, DEFAULT_CURRENT_SAVINGS);
    }

    #[test]
    fn scenario_payload_accepts_simulation_form_keys() {
        let payload: ScenarioPayload = serde_json::from_str(
            r#"{"current_amount": 5000, "target_amount": 90000, "expected_return": 10,
                "years": 7, "return_rates": [6, 9], "contribution_amounts": [1000, 2000, 3000]}"#,
        )
        .expect("valid json");
        let returns = payload.return_params();
        assert_eq!(returns.annual_rates_percent, vec![6.0, 9.0]);
        assert_eq!(returns.years, 7);
        let contributions = payload.contribution_params();
        assert_eq!(contributions.monthly_contributions, vec![1_000.0, 2_000.0, 3_000.0]);
        assert_approx(contributions.target_amount, 90_000.0);
        assert_approx(contributions.annual_rate_percent, 10.0);
    }

    #[test]
    fn empty_scenario_payload_uses_default_lists() {
        let payload: ScenarioPayload = serde_json::from_str("{}").expect("valid json");
        assert_eq!(
            payload.return_params().annual_rates_percent,
            DEFAULT_SCENARIO_RATES.to_vec()
        );
        assert_eq!(
            payload.contribution_params().monthly_contributions,
            DEFAULT_SCENARIO_CONTRIBUTIONS.to_vec()
        );
    }

    #[test]
    fn compound_interest_payload_maps_frequency() {
        let payload: CompoundInterestPayload = serde_json::from_str(
            r#"{"principal": 2000, "annual_rate": 6, "years": 3, "compounding_frequency": 4}"#,
        )
        .expect("valid json");
        let params = payload.params();
        assert_eq!(params.compounding_per_year, 4);
        assert_approx(params.annual_rate_percent, 6.0);
    }

    #[test]
    fn goal_payload_feeds_both_solvers() {
        let payload: GoalPayload = serde_json::from_str(
            r#"{"current_amount": 1000, "target_amount": 50000, "expected_return": 7, "years": 5}"#,
        )
        .expect("valid json");
        let goal = payload.goal_params();
        assert_approx(goal.target_amount, 50_000.0);
        assert_approx(goal.annual_rate_percent, 7.0);
        let target = payload.target_params();
        assert_eq!(target.years, 5);
        assert_approx(target.current_amount, 1_000.0);
    }
}
