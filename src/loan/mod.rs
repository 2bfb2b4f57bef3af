//! Loan input data structures and extra-payment loading

mod data;
pub mod loader;

pub use data::{ExtraPayments, Loan};
pub use loader::{load_extra_payments, load_extra_payments_from_reader};
