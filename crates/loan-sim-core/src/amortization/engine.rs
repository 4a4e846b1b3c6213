use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Instant;
use tracing::{debug, warn};

use super::params::LoanParameters;
use crate::{LoanSimResult, types::*};

const MONTHS_PER_YEAR: Decimal = dec!(12);
const PERCENT: Decimal = dec!(100);
const CURRENCY_DP: u32 = 2;

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// One simulated month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodRecord {
    pub period: u32,
    pub opening_balance: Money,
    pub interest: Money,
    /// Negative when the payment does not cover the interest.
    pub principal_paid: Money,
    pub payment: Money,
    pub closing_balance: Money,
    pub accumulated_interest: Money,
    pub total_paid: Money,
}

/// Conditions worth surfacing that do not stop the simulation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SimulationWarning {
    /// The repayment stopped covering the monthly interest from `period` on.
    NonConvergent {
        period: u32,
        repayment: Money,
        interest: Money,
    },
    /// The term ran out before the balance reached zero.
    BalanceOutstanding { months: u32, balance: Money },
    /// The growing balance left the representable range in `period`; the
    /// schedule stops at the last period that could be computed.
    BalanceOverflow { period: u32 },
}

impl fmt::Display for SimulationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimulationWarning::NonConvergent {
                period,
                repayment,
                interest,
            } => write!(
                f,
                "Repayment {repayment:.2} does not exceed the monthly interest {interest:.2} \
                 (period {period}); the balance will never reach zero"
            ),
            SimulationWarning::BalanceOutstanding { months, balance } => write!(
                f,
                "Balance of {balance:.2} still outstanding after {months} months"
            ),
            SimulationWarning::BalanceOverflow { period } => write!(
                f,
                "Balance exceeds the representable range in period {period}; \
                 schedule truncated"
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub initial_balance: Money,
    pub periods: Vec<PeriodRecord>,
    pub total_interest_paid: Money,
    pub total_paid: Money,
    pub final_balance: Money,
    /// Total interest as a percentage of everything paid.
    pub interest_share: Rate,
    /// True when the balance reached zero within the term.
    pub converged: bool,
    pub warnings: Vec<SimulationWarning>,
}

impl SimulationResult {
    pub fn total_principal_paid(&self) -> Money {
        self.periods.iter().map(|p| p.principal_paid).sum()
    }

    pub fn is_non_convergent(&self) -> bool {
        self.warnings
            .iter()
            .any(|w| matches!(w, SimulationWarning::NonConvergent { .. }))
    }
}

/// Simulation loop state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoanState {
    /// Balance is positive and months remain.
    Accruing,
    /// Balance is zero or the term is exhausted.
    Done,
}

impl LoanState {
    fn evaluate(balance: Money, elapsed: u32, months: u32) -> Self {
        if balance > Decimal::ZERO && elapsed < months {
            LoanState::Accruing
        } else {
            LoanState::Done
        }
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Convert an annual percentage rate into a monthly decimal rate.
pub fn monthly_rate(annual_pct: Rate) -> Rate {
    annual_pct / PERCENT / MONTHS_PER_YEAR
}

/// Round to cents, midpoint away from zero.
pub fn round_currency(value: Money) -> Money {
    value.round_dp_with_strategy(CURRENCY_DP, RoundingStrategy::MidpointAwayFromZero)
}

/// Run the month-by-month amortization for `params`.
///
/// Interest is computed on the opening balance and rounded to cents before it
/// accrues, so `closing = opening + interest - payment` holds exactly for every
/// record. The final payment is trimmed to the remaining balance plus its
/// interest. A repayment that does not exceed the interest is not an error: the
/// full term is still emitted and a [`SimulationWarning::NonConvergent`] is
/// attached. If the balance grows past what `Decimal` can hold, the schedule is
/// cut short with a [`SimulationWarning::BalanceOverflow`].
pub fn simulate(params: &LoanParameters) -> LoanSimResult<SimulationResult> {
    params.validate()?;

    let initial_balance = params.initial_balance();
    let rate = monthly_rate(params.annual_interest_rate);

    let mut periods = Vec::new();
    let mut warnings = Vec::new();
    let mut balance = initial_balance;
    let mut accumulated_interest = Decimal::ZERO;
    let mut total_paid = Decimal::ZERO;
    let mut non_convergent = false;
    let mut overflowed = false;
    let mut elapsed = 0u32;

    let mut state = LoanState::evaluate(balance, elapsed, params.months);
    while state == LoanState::Accruing {
        elapsed += 1;
        let opening = balance;

        let Some((interest, owed, payment, interest_to_date, paid_to_date)) =
            accrue(opening, rate, params.repayment, accumulated_interest, total_paid)
        else {
            overflowed = true;
            warn!(period = elapsed, "balance exceeds representable range");
            warnings.push(SimulationWarning::BalanceOverflow { period: elapsed });
            break;
        };

        if params.repayment <= interest && !non_convergent {
            non_convergent = true;
            warn!(
                period = elapsed,
                repayment = %params.repayment,
                interest = %interest,
                "repayment does not cover monthly interest"
            );
            warnings.push(SimulationWarning::NonConvergent {
                period: elapsed,
                repayment: params.repayment,
                interest,
            });
        }

        let closing = owed - payment;
        accumulated_interest = interest_to_date;
        total_paid = paid_to_date;

        debug!(
            period = elapsed,
            opening = %opening,
            interest = %interest,
            payment = %payment,
            closing = %closing,
            "period simulated"
        );

        periods.push(PeriodRecord {
            period: elapsed,
            opening_balance: opening,
            interest,
            principal_paid: payment - interest,
            payment,
            closing_balance: closing,
            accumulated_interest,
            total_paid,
        });

        balance = closing;
        state = LoanState::evaluate(balance, elapsed, params.months);
    }

    if balance > Decimal::ZERO && !non_convergent && !overflowed {
        warnings.push(SimulationWarning::BalanceOutstanding {
            months: params.months,
            balance,
        });
    }

    let interest_share = if total_paid.is_zero() {
        Decimal::ZERO
    } else {
        accumulated_interest
            .checked_div(total_paid)
            .and_then(|ratio| ratio.checked_mul(PERCENT))
            .map_or(Decimal::MAX, |share| share.round_dp(CURRENCY_DP))
    };

    Ok(SimulationResult {
        initial_balance,
        periods,
        total_interest_paid: accumulated_interest,
        total_paid,
        final_balance: balance,
        interest_share,
        converged: balance.is_zero(),
        warnings,
    })
}

/// One month of accrual: interest, amount owed, payment and the updated
/// running totals. `None` when any figure overflows `Decimal`.
fn accrue(
    opening: Money,
    rate: Rate,
    repayment: Money,
    accumulated_interest: Money,
    total_paid: Money,
) -> Option<(Money, Money, Money, Money, Money)> {
    let interest = round_currency(opening.checked_mul(rate)?);
    let owed = opening.checked_add(interest)?;
    // Never more than what is owed; equals the repayment when it falls short of the interest
    let payment = repayment.min(owed);
    Some((
        interest,
        owed,
        payment,
        accumulated_interest.checked_add(interest)?,
        total_paid.checked_add(payment)?,
    ))
}

/// [`simulate`] wrapped in the standard computation envelope.
pub fn run_simulation(
    params: &LoanParameters,
) -> LoanSimResult<ComputationOutput<SimulationResult>> {
    let start = Instant::now();

    let result = simulate(params)?;
    let warnings: Vec<String> = result.warnings.iter().map(|w| w.to_string()).collect();

    let elapsed = start.elapsed().as_micros() as u64;
    let assumptions = serde_json::json!({
        "monthly_rate": monthly_rate(params.annual_interest_rate).to_string(),
        "interest_basis": "opening balance, accrued monthly",
        "rounding": "interest rounded to 2dp, midpoint away from zero",
    });

    Ok(with_metadata(
        "Fixed-rate monthly amortization",
        &assumptions,
        warnings,
        elapsed,
        result,
    ))
}
