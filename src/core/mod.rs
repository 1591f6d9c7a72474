mod engine;
mod error;
pub mod formulas;
mod loan;
mod solver;
mod types;

pub use engine::{
    compute_compound_interest, compute_growth, compute_inflation_adjusted_growth,
    compute_retirement_plan,
};
pub use error::InvalidParameterError;
pub use loan::{compare_extra_payment, compute_loan_amortization};
pub use solver::{
    compare_contributions, compare_return_rates, compute_minimum_contribution,
    compute_time_to_goal, goal_progress,
};
pub use types::{
    AmortizationEntry, CompoundInterestParameters, CompoundInterestResult, ContributionScenario,
    ContributionScenarioParameters, GoalParameters, GrowthParameters, InflationAdjustedResult,
    InflationParameters, LoanComparison, LoanParameters, LoanResult, MinimumContributionResult,
    ProjectionResult, RetirementParameters, RetirementResult, ReturnScenario,
    ReturnScenarioParameters, TargetParameters, TimeToGoalResult, YearProjection,
};
