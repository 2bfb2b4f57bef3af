//! Schedule output structures

use serde::{Deserialize, Serialize};

/// A single row of the amortization schedule, one per month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleRow {
    /// Month number, 1-based and gapless
    pub month: u32,

    /// Interest charged this month
    pub interest: f64,

    /// Scheduled principal redemption this month, excluding the extra payment
    pub scheduled_redemption: f64,

    /// Extra redemption applied this month (after final-month clamping)
    pub extra_payment: f64,

    /// Balance remaining after this month's total redemption
    pub balance: f64,
}

impl ScheduleRow {
    /// Total principal repaid this month
    pub fn total_redemption(&self) -> f64 {
        self.scheduled_redemption + self.extra_payment
    }

    /// Total amount transferred this month, interest included
    pub fn payment(&self) -> f64 {
        self.interest + self.total_redemption()
    }
}

/// Complete amortization schedule for one loan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleResult {
    /// Monthly rows in month order
    pub rows: Vec<ScheduleRow>,
}

impl ScheduleResult {
    pub fn new() -> Self {
        Self { rows: Vec::new() }
    }

    /// Append a monthly row
    pub fn add_row(&mut self, row: ScheduleRow) {
        self.rows.push(row);
    }

    /// Number of months until full payoff
    pub fn term_months(&self) -> u32 {
        self.rows.last().map(|row| row.month).unwrap_or(0)
    }

    /// Get summary statistics
    pub fn summary(&self) -> ScheduleSummary {
        let total_interest: f64 = self.rows.iter().map(|r| r.interest).sum();
        let total_scheduled_redemption: f64 =
            self.rows.iter().map(|r| r.scheduled_redemption).sum();
        let total_extra_payments: f64 = self.rows.iter().map(|r| r.extra_payment).sum();

        // the fixed scheduled rate; extra payments do not change it
        let monthly_rate = self
            .rows
            .first()
            .map(|r| r.interest + r.scheduled_redemption)
            .unwrap_or(0.0);

        let term_months = self.term_months();
        let final_balance = self.rows.last().map(|r| r.balance).unwrap_or(0.0);

        ScheduleSummary {
            term_months,
            term_years: term_months / 12,
            term_remainder_months: term_months % 12,
            monthly_rate,
            total_interest,
            total_scheduled_redemption,
            total_extra_payments,
            total_paid: total_interest + total_scheduled_redemption + total_extra_payments,
            final_balance,
        }
    }
}

impl Default for ScheduleResult {
    fn default() -> Self {
        Self::new()
    }
}

/// Summary statistics for a schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleSummary {
    pub term_months: u32,
    pub term_years: u32,
    pub term_remainder_months: u32,
    pub monthly_rate: f64,
    pub total_interest: f64,
    pub total_scheduled_redemption: f64,
    pub total_extra_payments: f64,
    pub total_paid: f64,
    pub final_balance: f64,
}
