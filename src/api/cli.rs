use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::net::{IpAddr, SocketAddr};
use thiserror::Error;

use crate::core::{
    CompoundInterestParameters, ContributionScenarioParameters, GoalParameters, GrowthParameters,
    InflationParameters, InvalidParameterError, LoanParameters, RetirementParameters,
    ReturnScenarioParameters, TargetParameters, compare_contributions, compare_extra_payment,
    compare_return_rates, compute_compound_interest, compute_growth,
    compute_inflation_adjusted_growth, compute_loan_amortization, compute_minimum_contribution,
    compute_retirement_plan, compute_time_to_goal, goal_progress,
};

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    InvalidParameter(#[from] InvalidParameterError),
    #[error("failed to encode output: {0}")]
    Output(#[from] serde_json::Error),
    #[error("server error: {0}")]
    Server(#[from] std::io::Error),
}

#[derive(Parser, Debug)]
#[command(
    name = "wealth",
    version,
    about = "Growth, retirement, loan and savings-goal projections"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Serve the calculators as a JSON HTTP API
    Serve(ServeArgs),
    #[command(flatten)]
    Calculate(Calculation),
}

#[derive(Args, Debug)]
pub struct ServeArgs {
    #[arg(long, env = "WEALTH_HOST", default_value = "0.0.0.0")]
    pub host: IpAddr,
    #[arg(long, env = "WEALTH_PORT", default_value_t = 8080)]
    pub port: u16,
}

impl ServeArgs {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

#[derive(Subcommand, Debug)]
pub enum Calculation {
    /// Future value of a lump sum plus monthly contributions
    Growth(GrowthArgs),
    /// Nominal growth alongside its inflation-adjusted value
    Inflation {
        #[command(flatten)]
        growth: GrowthArgs,
        #[arg(long, help = "Annual inflation in percent, e.g. 6")]
        inflation: f64,
    },
    /// Corpus needed at retirement and the monthly saving that funds it
    Retirement(RetirementArgs),
    /// Monthly installment and amortization schedule
    Loan(LoanArgs),
    /// Months until savings reach a target
    TimeToGoal(GoalArgs),
    /// Monthly contribution needed to reach a target in time
    MinContribution(TargetArgs),
    /// Lump sum compounded at a chosen frequency
    CompoundInterest(CompoundInterestArgs),
    /// Future value of one savings plan across several annual returns
    WhatIfReturns(ReturnScenarioArgs),
    /// Future value and shortfall against a target across several contributions
    WhatIfContributions(ContributionScenarioArgs),
    /// Share of a goal already funded
    Progress {
        #[arg(long)]
        current: f64,
        #[arg(long)]
        target: f64,
    },
}

#[derive(Args, Debug, Clone)]
pub struct GrowthArgs {
    #[arg(long, default_value_t = 0.0, help = "Lump sum invested at the start")]
    pub principal: f64,
    #[arg(long)]
    pub monthly_contribution: f64,
    #[arg(long, help = "Expected annual return in percent, e.g. 12")]
    pub annual_rate: f64,
    #[arg(long, help = "Investment horizon in years; fractions become months")]
    pub years: f64,
}

impl From<&GrowthArgs> for GrowthParameters {
    fn from(args: &GrowthArgs) -> Self {
        GrowthParameters {
            principal: args.principal,
            monthly_contribution: args.monthly_contribution,
            annual_rate_percent: args.annual_rate,
            years: args.years,
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct RetirementArgs {
    #[arg(long)]
    pub current_age: u32,
    #[arg(long)]
    pub retirement_age: u32,
    #[arg(long, help = "Monthly expenses in today's money")]
    pub monthly_expenses: f64,
    #[arg(long, default_value_t = 0.0)]
    pub current_savings: f64,
    #[arg(long, help = "Expected annual return in percent, e.g. 12")]
    pub expected_return: f64,
    #[arg(long, help = "Annual inflation in percent, e.g. 6")]
    pub inflation: f64,
    #[arg(long, help = "Years the corpus must fund after retiring")]
    pub years_in_retirement: u32,
}

impl From<&RetirementArgs> for RetirementParameters {
    fn from(args: &RetirementArgs) -> Self {
        RetirementParameters {
            current_age: args.current_age,
            retirement_age: args.retirement_age,
            monthly_expenses_today: args.monthly_expenses,
            current_savings: args.current_savings,
            expected_return_percent: args.expected_return,
            inflation_percent: args.inflation,
            years_in_retirement: args.years_in_retirement,
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct LoanArgs {
    #[arg(long)]
    pub principal: f64,
    #[arg(long, help = "Annual interest rate in percent, e.g. 8")]
    pub annual_rate: f64,
    #[arg(long)]
    pub tenure_months: u32,
    #[arg(long, default_value_t = 0.0)]
    pub extra_payment: f64,
    #[arg(long, help = "Also run the loan without the extra payment and report savings")]
    pub compare: bool,
}

impl From<&LoanArgs> for LoanParameters {
    fn from(args: &LoanArgs) -> Self {
        LoanParameters {
            principal: args.principal,
            annual_rate_percent: args.annual_rate,
            tenure_months: args.tenure_months,
            extra_monthly_payment: args.extra_payment,
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct GoalArgs {
    #[arg(long, default_value_t = 0.0)]
    pub current: f64,
    #[arg(long)]
    pub target: f64,
    #[arg(long)]
    pub monthly_contribution: f64,
    #[arg(long, help = "Expected annual return in percent, e.g. 12")]
    pub annual_rate: f64,
}

#[derive(Args, Debug, Clone)]
pub struct TargetArgs {
    #[arg(long, default_value_t = 0.0)]
    pub current: f64,
    #[arg(long)]
    pub target: f64,
    #[arg(long)]
    pub years: u32,
    #[arg(long, help = "Expected annual return in percent, e.g. 12")]
    pub annual_rate: f64,
}

#[derive(Args, Debug, Clone)]
pub struct CompoundInterestArgs {
    #[arg(long)]
    pub principal: f64,
    #[arg(long, help = "Annual interest rate in percent, e.g. 8")]
    pub annual_rate: f64,
    #[arg(long)]
    pub years: f64,
    #[arg(long, default_value_t = 12, help = "Compounding periods per year: 12, 4 or 1")]
    pub per_year: u32,
}

#[derive(Args, Debug, Clone)]
pub struct ReturnScenarioArgs {
    #[arg(long, default_value_t = 0.0)]
    pub current: f64,
    #[arg(long)]
    pub monthly_contribution: f64,
    #[arg(long)]
    pub years: u32,
    #[arg(
        long,
        value_delimiter = ',',
        required = true,
        allow_negative_numbers = true,
        help = "Comma-separated annual returns in percent, e.g. 8,10,12"
    )]
    pub rates: Vec<f64>,
}

#[derive(Args, Debug, Clone)]
pub struct ContributionScenarioArgs {
    #[arg(long, default_value_t = 0.0)]
    pub current: f64,
    #[arg(long)]
    pub target: f64,
    #[arg(long, help = "Expected annual return in percent, e.g. 12")]
    pub annual_rate: f64,
    #[arg(long)]
    pub years: u32,
    #[arg(
        long,
        value_delimiter = ',',
        required = true,
        help = "Comma-separated monthly contributions, e.g. 5000,10000"
    )]
    pub contributions: Vec<f64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ProgressOutput {
    progress_percent: f64,
}

/// Runs one calculation and renders the result as pretty JSON.
pub fn calculate(calculation: &Calculation) -> Result<String, CliError> {
    let rendered = match calculation {
        Calculation::Growth(args) => render(&compute_growth(&GrowthParameters::from(args))?)?,
        Calculation::Inflation { growth, inflation } => {
            let params = InflationParameters {
                growth: GrowthParameters::from(growth),
                inflation_percent: *inflation,
            };
            render(&compute_inflation_adjusted_growth(&params)?)?
        }
        Calculation::Retirement(args) => {
            render(&compute_retirement_plan(&RetirementParameters::from(args))?)?
        }
        Calculation::Loan(args) if args.compare => {
            render(&compare_extra_payment(&LoanParameters::from(args))?)?
        }
        Calculation::Loan(args) => {
            render(&compute_loan_amortization(&LoanParameters::from(args))?)?
        }
        Calculation::TimeToGoal(args) => {
            let params = GoalParameters {
                current_amount: args.current,
                target_amount: args.target,
                monthly_contribution: args.monthly_contribution,
                annual_rate_percent: args.annual_rate,
            };
            render(&compute_time_to_goal(&params)?)?
        }
        Calculation::MinContribution(args) => {
            let params = TargetParameters {
                current_amount: args.current,
                target_amount: args.target,
                years: args.years,
                annual_rate_percent: args.annual_rate,
            };
            render(&compute_minimum_contribution(&params)?)?
        }
        Calculation::CompoundInterest(args) => {
            let params = CompoundInterestParameters {
                principal: args.principal,
                annual_rate_percent: args.annual_rate,
                years: args.years,
                compounding_per_year: args.per_year,
            };
            render(&compute_compound_interest(&params)?)?
        }
        Calculation::WhatIfReturns(args) => {
            let params = ReturnScenarioParameters {
                current_amount: args.current,
                monthly_contribution: args.monthly_contribution,
                years: args.years,
                annual_rates_percent: args.rates.clone(),
            };
            render(&compare_return_rates(&params)?)?
        }
        Calculation::WhatIfContributions(args) => {
            let params = ContributionScenarioParameters {
                current_amount: args.current,
                target_amount: args.target,
                annual_rate_percent: args.annual_rate,
                years: args.years,
                monthly_contributions: args.contributions.clone(),
            };
            render(&compare_contributions(&params)?)?
        }
        Calculation::Progress { current, target } => render(&ProgressOutput {
            progress_percent: goal_progress(*current, *target)?,
        })?,
    };
    Ok(rendered)
}

fn render<T: Serialize>(value: &T) -> Result<String, CliError> {
    Ok(serde_json::to_string_pretty(value)?)
}
