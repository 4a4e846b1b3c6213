use loan_sim_core::amortization::{self, LoanParameters, SimulationWarning};
use loan_sim_core::LoanSimError;
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// Fixtures
// ===========================================================================

fn reference_loan() -> LoanParameters {
    // 1200 with 200 down at 12% p.a. => 1% per month on 1000
    LoanParameters {
        principal: dec!(1200),
        down_payment: dec!(200),
        annual_interest_rate: dec!(12),
        repayment: dec!(100),
        months: 12,
    }
}

fn varied_loans() -> Vec<LoanParameters> {
    vec![
        reference_loan(),
        LoanParameters {
            principal: dec!(250_000),
            down_payment: dec!(50_000),
            annual_interest_rate: dec!(6.5),
            repayment: dec!(1_500),
            months: 360,
        },
        LoanParameters {
            principal: dec!(18_999.99),
            down_payment: dec!(1_000),
            annual_interest_rate: dec!(7.25),
            repayment: dec!(333.33),
            months: 72,
        },
        LoanParameters {
            principal: dec!(5_000),
            down_payment: Decimal::ZERO,
            annual_interest_rate: dec!(3),
            repayment: dec!(200),
            months: 12,
        },
    ]
}

// ===========================================================================
// Reference schedule
// ===========================================================================

#[test]
fn test_reference_schedule_closing_balances() {
    let result = amortization::simulate(&reference_loan()).unwrap();

    let closing: Vec<Decimal> = result.periods.iter().map(|p| p.closing_balance).collect();
    assert_eq!(
        closing,
        vec![
            dec!(910.00),
            dec!(819.10),
            dec!(727.29),
            dec!(634.56),
            dec!(540.91),
            dec!(446.32),
            dec!(350.78),
            dec!(254.29),
            dec!(156.83),
            dec!(58.40),
            dec!(0),
        ]
    );
}

#[test]
fn test_reference_schedule_totals() {
    let result = amortization::simulate(&reference_loan()).unwrap();

    assert_eq!(result.initial_balance, dec!(1000));
    assert_eq!(result.total_interest_paid, dec!(58.98));
    assert_eq!(result.total_paid, dec!(1058.98));
    assert_eq!(result.final_balance, Decimal::ZERO);
    assert!(result.converged);

    let last = result.periods.last().unwrap();
    assert_eq!(last.accumulated_interest, result.total_interest_paid);
    assert_eq!(last.total_paid, result.total_paid);
}

// ===========================================================================
// Schedule invariants
// ===========================================================================

#[test]
fn test_balance_identity_holds_for_every_period() {
    for params in varied_loans() {
        let result = amortization::simulate(&params).unwrap();
        let mut expected_opening = params.initial_balance();
        for p in &result.periods {
            assert_eq!(p.opening_balance, expected_opening, "period {}", p.period);
            assert_eq!(
                p.closing_balance,
                p.opening_balance + p.interest - p.payment,
                "period {}",
                p.period
            );
            assert_eq!(p.principal_paid, p.payment - p.interest);
            expected_opening = p.closing_balance;
        }
    }
}

#[test]
fn test_convergent_balances_are_non_increasing_to_zero() {
    for params in varied_loans() {
        let result = amortization::simulate(&params).unwrap();
        if !result.converged {
            continue;
        }
        let mut previous = result.initial_balance;
        for p in &result.periods {
            assert!(p.closing_balance >= Decimal::ZERO);
            assert!(p.closing_balance <= previous);
            previous = p.closing_balance;
        }
        assert_eq!(result.periods.last().unwrap().closing_balance, Decimal::ZERO);
    }
}

#[test]
fn test_principal_paid_sums_to_balance_reduction() {
    for params in varied_loans() {
        let result = amortization::simulate(&params).unwrap();
        assert_eq!(
            result.total_principal_paid(),
            result.initial_balance - result.final_balance
        );
    }
}

#[test]
fn test_periods_are_numbered_consecutively() {
    let result = amortization::simulate(&varied_loans()[1]).unwrap();
    for (i, p) in result.periods.iter().enumerate() {
        assert_eq!(p.period as usize, i + 1);
    }
    assert!(result.periods.len() <= 360);
}

#[test]
fn test_zero_rate_has_no_interest() {
    let params = LoanParameters {
        principal: dec!(1_250),
        down_payment: dec!(50),
        annual_interest_rate: Decimal::ZERO,
        repayment: dec!(100),
        months: 24,
    };
    let result = amortization::simulate(&params).unwrap();

    assert_eq!(result.periods.len(), 12);
    for p in &result.periods {
        assert_eq!(p.interest, Decimal::ZERO);
        assert_eq!(p.principal_paid, p.payment);
    }
    assert_eq!(result.total_interest_paid, Decimal::ZERO);
    assert_eq!(result.total_paid, dec!(1_200));
}

// ===========================================================================
// Non-convergent loans
// ===========================================================================

#[test]
fn test_repayment_below_interest_grows_balance() {
    let params = LoanParameters {
        principal: dec!(10_000),
        down_payment: Decimal::ZERO,
        annual_interest_rate: dec!(12),
        repayment: dec!(10),
        months: 12,
    };
    let result = amortization::simulate(&params).unwrap();

    assert_eq!(result.periods.len(), 12);
    assert!(!result.converged);
    assert!(result.final_balance >= result.initial_balance);
    assert_eq!(result.final_balance, dec!(11_141.43));
    assert_eq!(result.total_interest_paid, dec!(1_261.43));
    assert_eq!(result.total_paid, dec!(120));

    match &result.warnings[..] {
        [SimulationWarning::NonConvergent { period, interest, .. }] => {
            assert_eq!(*period, 1);
            assert_eq!(*interest, dec!(100.00));
        }
        other => panic!("expected a single NonConvergent warning, got {other:?}"),
    }
}

#[test]
fn test_repayment_just_above_interest_still_reduces_balance() {
    // Repayment clears the interest by one cent, so principal shrinks slowly
    let params = LoanParameters {
        principal: dec!(1_000),
        down_payment: Decimal::ZERO,
        annual_interest_rate: dec!(12),
        repayment: dec!(10.01),
        months: 6,
    };
    let result = amortization::simulate(&params).unwrap();
    assert!(!result.is_non_convergent());
    for p in &result.periods {
        assert!(p.closing_balance < p.opening_balance);
    }
}

#[test]
fn test_growing_balance_over_longest_term_completes() {
    let params = LoanParameters {
        principal: dec!(1_000),
        down_payment: Decimal::ZERO,
        annual_interest_rate: dec!(100),
        repayment: dec!(1),
        months: amortization::MAX_MONTHS,
    };
    let result = amortization::simulate(&params).unwrap();

    assert!(!result.converged);
    assert!(result.final_balance > result.initial_balance);
    assert!(matches!(
        result.warnings.first(),
        Some(SimulationWarning::NonConvergent { period: 1, .. })
    ));
    assert!(matches!(
        result.warnings.last(),
        Some(SimulationWarning::BalanceOverflow { .. })
    ));

    // Balances grow monotonically up to the cut-off
    for pair in result.periods.windows(2) {
        assert!(pair[1].opening_balance > pair[0].opening_balance);
    }
}

#[test]
fn test_slow_growth_over_longest_term_runs_full_schedule() {
    let params = LoanParameters {
        principal: dec!(1_000),
        down_payment: Decimal::ZERO,
        annual_interest_rate: dec!(12),
        repayment: dec!(5),
        months: amortization::MAX_MONTHS,
    };
    let result = amortization::simulate(&params).unwrap();

    assert_eq!(result.periods.len(), 1200);
    assert!(!result.converged);
    assert_eq!(result.warnings.len(), 1);
    assert!(result.is_non_convergent());
}

// ===========================================================================
// Determinism and validation
// ===========================================================================

#[test]
fn test_simulate_is_deterministic() {
    for params in varied_loans() {
        let a = amortization::simulate(&params).unwrap();
        let b = amortization::simulate(&params).unwrap();
        assert_eq!(a, b);
    }
}

#[test]
fn test_down_payment_exceeding_principal_is_rejected() {
    let mut params = reference_loan();
    params.down_payment = dec!(1_500);
    let err = amortization::simulate(&params).unwrap_err();
    match err {
        LoanSimError::InvalidParameters { field, .. } => assert_eq!(field, "down_payment"),
        other => panic!("expected InvalidParameters, got {other:?}"),
    }
}

#[test]
fn test_result_serializes_to_json() {
    let output = amortization::run_simulation(&reference_loan()).unwrap();
    let value = serde_json::to_value(&output).unwrap();
    assert_eq!(value["result"]["periods"].as_array().unwrap().len(), 11);
    assert_eq!(value["result"]["converged"], true);
    assert!(value["warnings"].as_array().unwrap().is_empty());
}
