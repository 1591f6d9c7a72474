//! Closed-form formulas shared by every calculator.
//!
//! Contributions follow the annuity-due convention throughout: each periodic
//! payment is deposited at the start of its period and earns that period's
//! growth. Growth, retirement and goal calculators all go through
//! [`annuity_due_factor`], so the convention cannot drift between them.

/// Rates closer to zero than this use the limiting (linear) formulas.
pub const RATE_EPSILON: f64 = 1e-12;

pub fn monthly_rate(annual_rate_percent: f64) -> f64 {
    annual_rate_percent / 12.0 / 100.0
}

pub fn is_zero_rate(rate: f64) -> bool {
    rate.abs() < RATE_EPSILON
}

/// `(1 + rate)^periods`
pub fn compound_factor(rate: f64, periods: u32) -> f64 {
    match i32::try_from(periods) {
        Ok(n) => (1.0 + rate).powi(n),
        Err(_) => (1.0 + rate).powf(f64::from(periods)),
    }
}

/// Future value of one unit paid at the start of each of `periods` periods.
///
/// `((1 + r)^n - 1) / r * (1 + r)`, or `n` when `r` is zero.
pub fn annuity_due_factor(rate: f64, periods: u32) -> f64 {
    if is_zero_rate(rate) {
        return periods as f64;
    }
    (compound_factor(rate, periods) - 1.0) / rate * (1.0 + rate)
}

/// Principal compounded for `periods` plus the annuity-due value of the
/// contributions.
pub fn future_value(principal: f64, contribution: f64, rate: f64, periods: u32) -> f64 {
    principal * compound_factor(rate, periods) + contribution * annuity_due_factor(rate, periods)
}

/// Present value, at the first payment date, of one unit paid at the start
/// of each of `periods` periods.
///
/// `(1 - (1 + r)^-n) / r * (1 + r)`, or `n` when `r` is zero.
pub fn annuity_due_present_value_factor(rate: f64, periods: u32) -> f64 {
    if is_zero_rate(rate) {
        return periods as f64;
    }
    (1.0 - compound_factor(rate, periods).recip()) / rate * (1.0 + rate)
}

/// Real rate in percent from nominal and inflation rates in percent:
/// `(1 + n) = (1 + real)(1 + i)`. Results within [`RATE_EPSILON`] of zero
/// come back as exactly zero.
pub fn fisher_real_rate_percent(nominal_percent: f64, inflation_percent: f64) -> f64 {
    let real = (1.0 + nominal_percent / 100.0) / (1.0 + inflation_percent / 100.0) - 1.0;
    if is_zero_rate(real) { 0.0 } else { real * 100.0 }
}

/// Equated periodic installment for an amortizing loan.
///
/// Written as `P * r / (1 - (1 + r)^-n)` so that a growth factor too large
/// to represent falls back to the interest-only limit `P * r`.
pub fn installment(principal: f64, rate: f64, periods: u32) -> f64 {
    if is_zero_rate(rate) {
        return principal / periods as f64;
    }
    principal * rate / (1.0 - compound_factor(rate, periods).recip())
}
