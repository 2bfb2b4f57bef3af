//! Error types for schedule computation

use thiserror::Error;

/// Result type for engine operations
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors that can occur while computing an amortization schedule
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// Malformed or out-of-domain input
    #[error("invalid argument: {reason}")]
    InvalidArgument {
        /// Why the input was rejected
        reason: String,
    },

    /// The safety bound on the schedule length was exceeded
    #[error("computation aborted after {months} months with {balance:.2} still outstanding")]
    ComputationAborted {
        /// Months computed before aborting
        months: u32,
        /// Balance still outstanding at the abort point
        balance: f64,
    },
}

impl EngineError {
    /// Create a new invalid-argument error
    pub fn invalid_argument(reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            reason: reason.into(),
        }
    }

    /// Create a new aborted-computation error
    pub fn aborted(months: u32, balance: f64) -> Self {
        Self::ComputationAborted { months, balance }
    }
}
