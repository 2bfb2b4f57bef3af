//! Loan parameters and extra-payment plans

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Parameters of an annuity loan
///
/// Both rates are annual percentages in [0, 100]; the monthly figures are
/// equal 1/12 slices of the annual amounts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Loan {
    /// Loan amount
    pub principal: f64,

    /// Annual redemption rate in percent of the principal
    pub redemption_rate: f64,

    /// Nominal annual interest rate in percent
    pub interest_rate: f64,

    /// First calendar month of the loan, used only by loaders and
    /// presentation; the schedule itself is calendar-agnostic
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
}

impl Loan {
    /// Create a validated loan
    pub fn new(principal: f64, redemption_rate: f64, interest_rate: f64) -> EngineResult<Self> {
        let loan = Self {
            principal,
            redemption_rate,
            interest_rate,
            start_date: None,
        };
        loan.validate()?;
        Ok(loan)
    }

    /// Attach the first calendar month of the loan
    pub fn with_start_date(mut self, start_date: NaiveDate) -> Self {
        self.start_date = Some(start_date);
        self
    }

    /// Check that all parameters are inside their stated domains
    pub fn validate(&self) -> EngineResult<()> {
        if !self.principal.is_finite() || self.principal < 0.0 {
            return Err(EngineError::invalid_argument(format!(
                "principal must be a non-negative amount, got {}",
                self.principal
            )));
        }
        for (name, rate) in [
            ("redemption rate", self.redemption_rate),
            ("interest rate", self.interest_rate),
        ] {
            if !rate.is_finite() || !(0.0..=100.0).contains(&rate) {
                return Err(EngineError::invalid_argument(format!(
                    "{name} must be a percentage in [0, 100], got {rate}"
                )));
            }
        }
        Ok(())
    }

    /// Fixed scheduled monthly payment (interest plus scheduled redemption)
    ///
    /// Computed once from the original principal; the split between interest
    /// and redemption shifts over the life of the loan, the sum does not.
    pub fn monthly_rate(&self) -> f64 {
        (self.principal * self.redemption_rate / 100.0 + self.principal * self.interest_rate / 100.0)
            / 12.0
    }
}

/// Unscheduled extra redemptions keyed by relative month offset
///
/// Keys are 0-based: offset 0 is the first month of the loan. At most one
/// extra payment per month; amounts must be positive. Calendar dates are
/// translated to offsets before they get here (see [`crate::loan::loader`]).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtraPayments(BTreeMap<u32, f64>);

impl ExtraPayments {
    /// Create an empty plan
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Add an extra payment for the given month offset
    ///
    /// Rejects non-positive amounts and a second payment in the same month.
    pub fn add(&mut self, month_offset: u32, amount: f64) -> EngineResult<()> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(EngineError::invalid_argument(format!(
                "extra payment in month {month_offset} must be a positive amount, got {amount}"
            )));
        }
        if self.0.contains_key(&month_offset) {
            return Err(EngineError::invalid_argument(format!(
                "duplicate extra payment for month {month_offset}"
            )));
        }
        self.0.insert(month_offset, amount);
        Ok(())
    }

    /// Extra amount requested for the given month offset, 0.0 if none
    pub fn amount_for(&self, month_offset: u32) -> f64 {
        self.0.get(&month_offset).copied().unwrap_or(0.0)
    }

    /// True when the plan holds no payments
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of months with an extra payment
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Sum of all extra amounts in the plan
    pub fn total(&self) -> f64 {
        self.0.values().sum()
    }

    /// Iterate over (month offset, amount) pairs in month order
    pub fn iter(&self) -> impl Iterator<Item = (u32, f64)> + '_ {
        self.0.iter().map(|(&month, &amount)| (month, amount))
    }
}
