//! Scenario runner for comparing extra-payment plans
//!
//! Validates and stores the loan once, then allows running many schedules
//! with different extra-payment plans against it.

use crate::error::EngineResult;
use crate::loan::{ExtraPayments, Loan};
use crate::schedule::{AmortizationEngine, ScheduleConfig, ScheduleResult};

/// Pre-built runner for re-computing one loan under many plans
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::new(Loan::new(300_000.0, 1.0, 1.5)?);
///
/// for plan in plans {
///     let result = runner.run(&plan)?;
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    base_loan: Loan,
    config: ScheduleConfig,
}

impl ScenarioRunner {
    /// Create a runner with the default schedule config
    pub fn new(loan: Loan) -> Self {
        Self {
            base_loan: loan,
            config: ScheduleConfig::default(),
        }
    }

    /// Create a runner with a specific schedule config
    pub fn with_config(loan: Loan, config: ScheduleConfig) -> Self {
        Self {
            base_loan: loan,
            config,
        }
    }

    /// Run a single schedule with the given extra-payment plan
    pub fn run(&self, extras: &ExtraPayments) -> EngineResult<ScheduleResult> {
        let engine = AmortizationEngine::new(self.config.clone());
        engine.compute(&self.base_loan, extras)
    }

    /// Run schedules for multiple plans against the same loan
    pub fn run_plans(&self, plans: &[ExtraPayments]) -> EngineResult<Vec<ScheduleResult>> {
        let engine = AmortizationEngine::new(self.config.clone());
        plans
            .iter()
            .map(|plan| engine.compute(&self.base_loan, plan))
            .collect()
    }

    /// Get reference to the base loan for inspection
    pub fn loan(&self) -> &Loan {
        &self.base_loan
    }

    /// Get mutable reference to the base loan for customization
    pub fn loan_mut(&mut self) -> &mut Loan {
        &mut self.base_loan
    }
}
