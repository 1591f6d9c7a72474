use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrowthParameters {
    pub principal: f64,
    pub monthly_contribution: f64,
    pub annual_rate_percent: f64,
    /// Whole years; a fractional part is carried as extra months.
    pub years: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InflationParameters {
    #[serde(flatten)]
    pub growth: GrowthParameters,
    pub inflation_percent: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetirementParameters {
    pub current_age: u32,
    pub retirement_age: u32,
    pub monthly_expenses_today: f64,
    pub current_savings: f64,
    pub expected_return_percent: f64,
    pub inflation_percent: f64,
    pub years_in_retirement: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanParameters {
    pub principal: f64,
    pub annual_rate_percent: f64,
    pub tenure_months: u32,
    pub extra_monthly_payment: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalParameters {
    pub current_amount: f64,
    pub target_amount: f64,
    pub monthly_contribution: f64,
    pub annual_rate_percent: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetParameters {
    pub current_amount: f64,
    pub target_amount: f64,
    pub years: u32,
    pub annual_rate_percent: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YearProjection {
    pub year: u32,
    pub invested_to_date: f64,
    pub value_at_year_end: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionResult {
    pub total_invested: f64,
    pub total_returns: f64,
    pub future_value: f64,
    pub wealth_gained_percent: f64,
    pub yearly_breakdown: Vec<YearProjection>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InflationAdjustedResult {
    pub nominal: ProjectionResult,
    pub real_rate_percent: f64,
    pub real_future_value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RetirementResult {
    pub years_to_retirement: u32,
    pub inflated_monthly_expenses: f64,
    pub corpus_needed: f64,
    pub projected_savings_at_retirement: f64,
    pub shortfall: f64,
    pub additional_monthly_investment_needed: f64,
    pub sustainable_monthly_income: f64,
    pub is_sufficient: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AmortizationEntry {
    pub month: u32,
    pub principal_paid: f64,
    pub interest_paid: f64,
    pub remaining_balance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanResult {
    pub monthly_payment: f64,
    pub total_payment: f64,
    pub total_interest: f64,
    pub schedule: Vec<AmortizationEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanComparison {
    pub baseline: LoanResult,
    pub accelerated: LoanResult,
    pub months_saved: u32,
    pub interest_saved: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeToGoalResult {
    pub reachable: bool,
    pub months: u32,
    pub years: f64,
    pub final_amount: f64,
    pub total_invested: f64,
    pub total_returns: f64,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MinimumContributionResult {
    pub monthly_contribution: f64,
    pub total_to_invest: f64,
    pub expected_returns: f64,
    pub target_years: u32,
    pub already_met: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompoundInterestParameters {
    pub principal: f64,
    pub annual_rate_percent: f64,
    pub years: f64,
    /// Compounding periods per year: 12 monthly, 4 quarterly, 1 yearly.
    pub compounding_per_year: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompoundInterestResult {
    pub periods: u32,
    pub final_amount: f64,
    pub interest_earned: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReturnScenarioParameters {
    pub current_amount: f64,
    pub monthly_contribution: f64,
    pub years: u32,
    pub annual_rates_percent: Vec<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReturnScenario {
    pub annual_rate_percent: f64,
    pub future_value: f64,
    pub total_invested: f64,
    pub total_returns: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionScenarioParameters {
    pub current_amount: f64,
    pub target_amount: f64,
    pub annual_rate_percent: f64,
    pub years: u32,
    pub monthly_contributions: Vec<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionScenario {
    pub monthly_contribution: f64,
    pub future_value: f64,
    pub goal_achievable: bool,
    pub shortfall: f64,
}
