//! Amortization engine for month-by-month payoff schedules

mod engine;
mod rows;
mod state;

pub use engine::{AmortizationEngine, ScheduleConfig, MAX_TERM_MONTHS};
pub use rows::{ScheduleResult, ScheduleRow, ScheduleSummary};
pub use state::LoanState;
