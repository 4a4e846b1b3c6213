use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{LoanSimError, LoanSimResult, types::*};

/// Longest supported term (100 years).
pub const MAX_MONTHS: u32 = 1200;

/// Inputs for a single fixed-rate loan simulation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanParameters {
    /// Loan amount before the down payment.
    pub principal: Money,
    /// Paid up front, deducted from the principal before interest accrues.
    #[serde(default, alias = "downpayment")]
    pub down_payment: Money,
    /// Annual rate as a percentage (12 means 12% p.a.).
    pub annual_interest_rate: Rate,
    /// Nominal monthly repayment.
    pub repayment: Money,
    /// Length of the term in months.
    pub months: u32,
}

impl LoanParameters {
    /// Balance on which interest starts accruing.
    pub fn initial_balance(&self) -> Money {
        self.principal - self.down_payment
    }

    pub fn validate(&self) -> LoanSimResult<()> {
        if self.principal <= Decimal::ZERO {
            return Err(LoanSimError::invalid(
                "principal",
                "Principal must be greater than zero",
            ));
        }
        if self.down_payment < Decimal::ZERO {
            return Err(LoanSimError::invalid(
                "down_payment",
                "Down payment cannot be negative",
            ));
        }
        if self.initial_balance() < Decimal::ZERO {
            return Err(LoanSimError::invalid(
                "down_payment",
                format!(
                    "Down payment {} exceeds the principal {}",
                    self.down_payment, self.principal
                ),
            ));
        }
        if self.annual_interest_rate < Decimal::ZERO {
            return Err(LoanSimError::invalid(
                "annual_interest_rate",
                "Interest rate cannot be negative",
            ));
        }
        if self.repayment <= Decimal::ZERO {
            return Err(LoanSimError::invalid(
                "repayment",
                "Repayment must be greater than zero",
            ));
        }
        if self.months > MAX_MONTHS {
            return Err(LoanSimError::invalid(
                "months",
                format!("Term cannot exceed {MAX_MONTHS} months"),
            ));
        }
        Ok(())
    }
}
