//! Per-run loan state

use crate::loan::Loan;

/// Mutable state of one schedule computation
///
/// Built fresh from a [`Loan`] for every run and never handed to callers;
/// only the finished rows leave the engine.
#[derive(Debug, Clone)]
pub struct LoanState {
    /// Current schedule month (1-indexed, 0 before the first step)
    pub month: u32,

    /// Outstanding principal
    pub balance: f64,

    /// Fixed scheduled monthly payment, set once from the original principal
    pub monthly_rate: f64,

    /// Interest accumulated over all months so far
    pub cumulative_interest: f64,
}

impl LoanState {
    /// Initialize state from a loan at schedule start
    pub fn from_loan(loan: &Loan) -> Self {
        Self {
            month: 0,
            balance: loan.principal,
            monthly_rate: loan.monthly_rate(),
            cumulative_interest: 0.0,
        }
    }

    /// Advance to next month
    pub fn advance_month(&mut self) {
        self.month += 1;
    }
}
