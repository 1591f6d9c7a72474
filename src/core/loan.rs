use super::error::{
    InvalidParameterError, ensure_finite, ensure_non_negative, ensure_representable,
};
use super::formulas::{installment, monthly_rate};
use super::types::{AmortizationEntry, LoanComparison, LoanParameters, LoanResult};

pub const MAX_TENURE_MONTHS: u32 = 12_000;

pub fn compute_loan_amortization(
    params: &LoanParameters,
) -> Result<LoanResult, InvalidParameterError> {
    validate_loan(params)?;

    let rate = monthly_rate(params.annual_rate_percent);
    let monthly_payment = installment(params.principal, rate, params.tenure_months);
    ensure_representable("annualRatePercent", monthly_payment)?;

    let mut schedule = Vec::with_capacity(params.tenure_months as usize);
    let mut balance = params.principal;
    let mut total_payment = 0.0;

    for month in 1..=params.tenure_months {
        let interest_paid = balance * rate;
        let mut principal_paid = monthly_payment - interest_paid + params.extra_monthly_payment;
        // The last scheduled month settles whatever rounding left behind.
        if principal_paid >= balance || month == params.tenure_months {
            principal_paid = balance;
        }
        balance -= principal_paid;
        total_payment += interest_paid + principal_paid;

        schedule.push(AmortizationEntry {
            month,
            principal_paid,
            interest_paid,
            remaining_balance: balance,
        });

        if balance <= 0.0 {
            break;
        }
    }

    ensure_representable("annualRatePercent", total_payment)?;
    let total_interest = total_payment - params.principal;
    log::debug!(
        "loan of {:.2} repaid in {} of {} months, interest {total_interest:.2}",
        params.principal,
        schedule.len(),
        params.tenure_months
    );

    Ok(LoanResult {
        monthly_payment,
        total_payment,
        total_interest,
        schedule,
    })
}

/// Runs the loan with and without the extra monthly payment.
pub fn compare_extra_payment(
    params: &LoanParameters,
) -> Result<LoanComparison, InvalidParameterError> {
    let accelerated = compute_loan_amortization(params)?;
    let baseline = compute_loan_amortization(&LoanParameters {
        extra_monthly_payment: 0.0,
        ..*params
    })?;

    let months_saved = baseline.schedule.len().saturating_sub(accelerated.schedule.len()) as u32;
    let interest_saved = baseline.total_interest - accelerated.total_interest;

    Ok(LoanComparison {
        baseline,
        accelerated,
        months_saved,
        interest_saved,
    })
}

fn validate_loan(params: &LoanParameters) -> Result<(), InvalidParameterError> {
    ensure_finite("principal", params.principal)?;
    if params.principal <= 0.0 {
        return Err(InvalidParameterError::new("principal", "must be > 0"));
    }
    if params.tenure_months == 0 {
        return Err(InvalidParameterError::new("tenureMonths", "must be > 0"));
    }
    if params.tenure_months > MAX_TENURE_MONTHS {
        return Err(InvalidParameterError::new("tenureMonths", "must be <= 12000"));
    }
    ensure_finite("annualRatePercent", params.annual_rate_percent)?;
    if params.annual_rate_percent < 0.0 {
        return Err(InvalidParameterError::new("annualRatePercent", "must be >= 0"));
    }
    ensure_non_negative("extraMonthlyPayment", params.extra_monthly_payment)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::{prop_assert, prop_assert_eq, proptest};

    fn assert_close(actual: f64, expected: f64, tol: f64) {
        assert!(
            (actual - expected).abs() <= tol,
            "expected {expected}, got {actual}, tolerance {tol}"
        );
    }

    fn home_loan() -> LoanParameters {
        LoanParameters {
            principal: 1_000_000.0,
            annual_rate_percent: 8.0,
            tenure_months: 240,
            extra_monthly_payment: 0.0,
        }
    }

    #[test]
    fn home_loan_reference_figures() {
        let result = compute_loan_amortization(&home_loan()).expect("valid params");
        assert_close(result.monthly_payment, 8_364.0, 1.0);
        assert!(
            ((result.total_interest - 1_007_360.0) / 1_007_360.0).abs() < 0.005,
            "total interest {}",
            result.total_interest
        );
        assert_eq!(result.schedule.len(), 240);
        let last = result.schedule.last().expect("non-empty schedule");
        assert_eq!(last.month, 240);
        assert_eq!(last.remaining_balance, 0.0);
    }

    #[test]
    fn first_month_splits_interest_and_principal() {
        let result = compute_loan_amortization(&home_loan()).expect("valid params");
        let first = result.schedule[0];
        assert_close(first.interest_paid, 1_000_000.0 * 0.08 / 12.0, 1e-6);
        assert_close(
            first.principal_paid,
            result.monthly_payment - first.interest_paid,
            1e-6,
        );
        assert_close(first.remaining_balance, 1_000_000.0 - first.principal_paid, 1e-6);
    }

    #[test]
    fn zero_rate_loan_divides_principal_evenly() {
        let params = LoanParameters {
            principal: 12_000.0,
            annual_rate_percent: 0.0,
            tenure_months: 12,
            extra_monthly_payment: 0.0,
        };
        let result = compute_loan_amortization(&params).expect("valid params");
        assert_close(result.monthly_payment, 1_000.0, 1e-9);
        assert_close(result.total_interest, 0.0, 1e-9);
        assert!(result.schedule.iter().all(|entry| entry.interest_paid == 0.0));
    }

    #[test]
    fn extra_payment_finishes_early_and_caps_final_month() {
        let params = LoanParameters {
            principal: 12_000.0,
            annual_rate_percent: 0.0,
            tenure_months: 12,
            extra_monthly_payment: 500.0,
        };
        let result = compute_loan_amortization(&params).expect("valid params");
        assert_eq!(result.schedule.len(), 8);
        let last = result.schedule[7];
        assert_close(last.principal_paid, 1_500.0, 1e-9);
        assert_eq!(last.remaining_balance, 0.0);
        assert_close(result.total_payment, 12_000.0, 1e-9);
    }

    #[test]
    fn comparison_reports_months_and_interest_saved() {
        let params = LoanParameters {
            extra_monthly_payment: 5_000.0,
            ..home_loan()
        };
        let comparison = compare_extra_payment(&params).expect("valid params");
        assert_eq!(comparison.baseline.schedule.len(), 240);
        assert!(comparison.accelerated.schedule.len() < 240);
        assert_eq!(
            comparison.months_saved as usize,
            240 - comparison.accelerated.schedule.len()
        );
        assert!(comparison.interest_saved > 0.0);
        assert_eq!(comparison.baseline.monthly_payment, comparison.accelerated.monthly_payment);
    }

    #[test]
    fn zero_tenure_is_rejected_with_field_name() {
        let params = LoanParameters {
            tenure_months: 0,
            ..home_loan()
        };
        let err = compute_loan_amortization(&params).expect_err("must reject");
        assert_eq!(err.field, "tenureMonths");
        assert!(err.to_string().contains("tenureMonths"));
    }

    #[test]
    fn loan_rejects_invalid_inputs() {
        let cases = [
            (LoanParameters { principal: 0.0, ..home_loan() }, "principal"),
            (LoanParameters { principal: -5.0, ..home_loan() }, "principal"),
            (
                LoanParameters {
                    annual_rate_percent: -1.0,
                    ..home_loan()
                },
                "annualRatePercent",
            ),
            (
                LoanParameters {
                    extra_monthly_payment: -1.0,
                    ..home_loan()
                },
                "extraMonthlyPayment",
            ),
            (
                LoanParameters {
                    tenure_months: MAX_TENURE_MONTHS + 1,
                    ..home_loan()
                },
                "tenureMonths",
            ),
        ];
        for (params, field) in cases {
            let err = compute_loan_amortization(&params).expect_err("must reject");
            assert_eq!(err.field, field, "unexpected error {err}");
        }
    }

    #[test]
    fn high_rate_longest_tenure_still_repays_exactly() {
        let params = LoanParameters {
            principal: 100_000.0,
            annual_rate_percent: 100.0,
            tenure_months: MAX_TENURE_MONTHS,
            extra_monthly_payment: 0.0,
        };
        let result = compute_loan_amortization(&params).expect("valid params");
        assert!(result.monthly_payment.is_finite());
        assert_close(result.monthly_payment, 100_000.0 * monthly_rate(100.0), 1e-6);
        assert!(result.total_interest.is_finite());
        assert_eq!(result.schedule.len(), MAX_TENURE_MONTHS as usize);
        let repaid: f64 = result.schedule.iter().map(|entry| entry.principal_paid).sum();
        assert_close(repaid, 100_000.0, 1e-6);
        let last = result.schedule.last().expect("non-empty schedule");
        assert_eq!(last.remaining_balance, 0.0);
    }

    #[test]
    fn unrepresentable_installment_is_rejected() {
        let params = LoanParameters {
            annual_rate_percent: 1e306,
            ..home_loan()
        };
        let err = compute_loan_amortization(&params).expect_err("payment overflows");
        assert_eq!(err.field, "annualRatePercent");
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(48))]

        #[test]
        fn prop_schedule_repays_exact_principal(
            principal in 1_000u32..5_000_000,
            rate_bp in 0u32..2_400,
            tenure in 1u32..480,
            extra in 0u32..20_000
        ) {
            let params = LoanParameters {
                principal: principal as f64,
                annual_rate_percent: rate_bp as f64 / 100.0,
                tenure_months: tenure,
                extra_monthly_payment: extra as f64,
            };
            let result = compute_loan_amortization(&params).expect("valid params");
            let repaid: f64 = result.schedule.iter().map(|entry| entry.principal_paid).sum();
            prop_assert!((repaid - params.principal).abs() <= 1e-6 * params.principal);
            let last = result.schedule.last().expect("non-empty schedule");
            prop_assert_eq!(last.remaining_balance, 0.0);
            prop_assert!(result.schedule.len() as u32 <= tenure);
            let interest: f64 = result.schedule.iter().map(|entry| entry.interest_paid).sum();
            prop_assert!((interest - result.total_interest).abs() <= 1e-6 * params.principal);
        }

        #[test]
        fn prop_extra_payment_never_lengthens_the_loan(
            principal in 1_000u32..5_000_000,
            rate_bp in 0u32..2_400,
            tenure in 1u32..480,
            extra in 1u32..20_000
        ) {
            let base = LoanParameters {
                principal: principal as f64,
                annual_rate_percent: rate_bp as f64 / 100.0,
                tenure_months: tenure,
                extra_monthly_payment: 0.0,
            };
            let with_extra = LoanParameters { extra_monthly_payment: extra as f64, ..base };
            let plain = compute_loan_amortization(&base).expect("valid params");
            let faster = compute_loan_amortization(&with_extra).expect("valid params");
            prop_assert!(faster.schedule.len() <= plain.schedule.len());
        }

        #[test]
        fn prop_extreme_rates_and_tenures_stay_conserved(
            principal in 1_000u32..5_000_000,
            rate_bp in 0u32..100_000,
            tenure in 1u32..=MAX_TENURE_MONTHS
        ) {
            let params = LoanParameters {
                principal: principal as f64,
                annual_rate_percent: rate_bp as f64 / 100.0,
                tenure_months: tenure,
                extra_monthly_payment: 0.0,
            };
            let result = compute_loan_amortization(&params).expect("valid params");
            prop_assert!(result.monthly_payment.is_finite());
            prop_assert!(result.total_interest.is_finite());
            let repaid: f64 = result.schedule.iter().map(|entry| entry.principal_paid).sum();
            prop_assert!((repaid - params.principal).abs() <= 1e-6 * params.principal);
            let last = result.schedule.last().expect("non-empty schedule");
            prop_assert_eq!(last.remaining_balance, 0.0);
        }
    }
}
