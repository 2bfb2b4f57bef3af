//! Amortization System - payoff schedules for annuity loans with unscheduled redemptions
//!
//! This library provides:
//! - Month-by-month amortization schedules for annuity-style loans
//! - Unscheduled extra redemptions keyed by relative month offset
//! - Derived loan figures (fixed monthly rate, total interest, payoff term)
//! - Whole-month calendar arithmetic for translating payment dates
//! - A scenario runner for comparing extra-payment plans

pub mod dates;
pub mod error;
pub mod loan;
pub mod scenario;
pub mod schedule;

// Re-export commonly used types
pub use error::{EngineError, EngineResult};
pub use loan::{ExtraPayments, Loan};
pub use scenario::ScenarioRunner;
pub use schedule::{AmortizationEngine, ScheduleConfig, ScheduleResult, ScheduleRow, ScheduleSummary};
