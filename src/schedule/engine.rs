//! Core amortization engine for annuity loans

use super::rows::{ScheduleRow, ScheduleResult};
use super::state::LoanState;
use crate::error::{EngineError, EngineResult};
use crate::loan::{ExtraPayments, Loan};

/// Default safety bound on the schedule length, in months
pub const MAX_TERM_MONTHS: u32 = 1200;

/// Balances below this snap to zero so float residue cannot spawn a
/// phantom final month
const BALANCE_EPSILON: f64 = 1e-9;

/// Configuration for a schedule run
#[derive(Debug, Clone)]
pub struct ScheduleConfig {
    /// Abort with [`EngineError::ComputationAborted`] if the loan is not
    /// paid off after this many months
    pub max_term_months: u32,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            max_term_months: MAX_TERM_MONTHS,
        }
    }
}

/// Main amortization engine
///
/// Each call to [`compute`](Self::compute) is an independent, side-effect-free
/// run over its own state; schedules for different plans may be computed
/// concurrently from the same engine.
#[derive(Debug, Clone, Default)]
pub struct AmortizationEngine {
    config: ScheduleConfig,
}

impl AmortizationEngine {
    /// Create a new engine with the given config
    pub fn new(config: ScheduleConfig) -> Self {
        Self { config }
    }

    /// Compute the full amortization schedule for a loan
    ///
    /// Extra payments are keyed by 0-based month offset: offset 0 lands in
    /// the first month of the loan. The schedule runs until the balance
    /// reaches exactly zero; a failed run returns no partial schedule.
    pub fn compute(&self, loan: &Loan, extras: &ExtraPayments) -> EngineResult<ScheduleResult> {
        loan.validate()?;
        self.validate_plan(loan, extras)?;

        let mut result = ScheduleResult::new();

        if loan.principal == 0.0 {
            result.add_row(ScheduleRow {
                month: 1,
                interest: 0.0,
                scheduled_redemption: 0.0,
                extra_payment: 0.0,
                balance: 0.0,
            });
            return Ok(result);
        }

        let mut state = LoanState::from_loan(loan);

        while state.balance > 0.0 {
            if state.month >= self.config.max_term_months {
                return Err(EngineError::aborted(state.month, state.balance));
            }

            state.advance_month();
            let requested_extra = extras.amount_for(state.month - 1);
            let row = self.calculate_month(loan, &mut state, requested_extra);
            result.add_row(row);
        }

        Ok(result)
    }

    fn validate_plan(&self, loan: &Loan, extras: &ExtraPayments) -> EngineResult<()> {
        // ExtraPayments::add already enforces positive amounts; re-check here
        // so a deserialized plan cannot smuggle bad values past the boundary
        for (month, amount) in extras.iter() {
            if !amount.is_finite() || amount <= 0.0 {
                return Err(EngineError::invalid_argument(format!(
                    "extra payment in month {month} must be a positive amount, got {amount}"
                )));
            }
        }
        if loan.principal > 0.0 && loan.redemption_rate == 0.0 && extras.is_empty() {
            return Err(EngineError::invalid_argument(
                "a redemption rate of 0% with no extra payments never pays off",
            ));
        }
        Ok(())
    }

    /// Calculate one month of the schedule and advance the balance
    fn calculate_month(
        &self,
        loan: &Loan,
        state: &mut LoanState,
        requested_extra: f64,
    ) -> ScheduleRow {
        let balance_before = state.balance;

        // interest accrues on the already-reduced balance; the scheduled
        // redemption is whatever the fixed rate leaves after interest, so it
        // grows as the interest share shrinks
        let interest = balance_before * loan.interest_rate / 100.0 / 12.0;
        let scheduled = (state.monthly_rate - interest).min(balance_before);

        // cap rule: the scheduled redemption is satisfied first, the extra
        // payment is clamped to the remaining headroom; a clamped month pays
        // the balance off exactly
        let headroom = balance_before - scheduled;
        let (extra, total_redemption) = if requested_extra >= headroom {
            (headroom, balance_before)
        } else {
            (
                requested_extra,
                (scheduled + requested_extra).min(balance_before),
            )
        };

        state.balance = balance_before - total_redemption;
        if state.balance < BALANCE_EPSILON {
            state.balance = 0.0;
        }
        state.cumulative_interest += interest;

        ScheduleRow {
            month: state.month,
            interest,
            scheduled_redemption: scheduled,
            extra_payment: extra,
            balance: state.balance,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn reference_loan() -> Loan {
        Loan::new(300_000.0, 1.0, 1.5).unwrap()
    }

    fn compute(loan: &Loan, extras: &ExtraPayments) -> ScheduleResult {
        AmortizationEngine::new(ScheduleConfig::default())
            .compute(loan, extras)
            .unwrap()
    }

    #[test]
    fn test_reference_loan_first_row() {
        let schedule = compute(&reference_loan(), &ExtraPayments::new());
        let first = &schedule.rows[0];

        assert_eq!(first.month, 1);
        assert_relative_eq!(first.interest, 375.0);
        assert_relative_eq!(first.scheduled_redemption, 250.0);
        assert_relative_eq!(first.extra_payment, 0.0);
        assert_relative_eq!(first.balance, 299_750.0);
        assert_relative_eq!(schedule.summary().monthly_rate, 625.0);
    }

    #[test]
    fn test_balance_decreasing_and_paid_off_exactly() {
        let schedule = compute(&reference_loan(), &ExtraPayments::new());

        for pair in schedule.rows.windows(2) {
            assert!(pair[1].balance < pair[0].balance);
        }
        assert_abs_diff_eq!(schedule.rows.last().unwrap().balance, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_month_sequence_is_gapless() {
        let schedule = compute(&reference_loan(), &ExtraPayments::new());

        for (index, row) in schedule.rows.iter().enumerate() {
            assert_eq!(row.month, index as u32 + 1);
        }
    }

    #[test]
    fn test_total_interest_matches_row_sum() {
        let schedule = compute(&reference_loan(), &ExtraPayments::new());
        let summed: f64 = schedule.rows.iter().map(|r| r.interest).sum();

        assert_relative_eq!(schedule.summary().total_interest, summed);
    }

    #[test]
    fn test_redemption_grows_as_interest_falls() {
        let schedule = compute(&reference_loan(), &ExtraPayments::new());
        let first = &schedule.rows[0];
        let mid = &schedule.rows[schedule.rows.len() / 2];

        assert!(mid.interest < first.interest);
        assert!(mid.scheduled_redemption > first.scheduled_redemption);
        // the scheduled rate itself stays fixed
        assert_relative_eq!(
            mid.interest + mid.scheduled_redemption,
            first.interest + first.scheduled_redemption,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_extra_payment_never_lengthens_term() {
        let loan = reference_loan();
        let baseline = compute(&loan, &ExtraPayments::new());

        let mut extras = ExtraPayments::new();
        extras.add(12, 10_000.0).unwrap();
        let accelerated = compute(&loan, &extras);

        assert!(accelerated.term_months() <= baseline.term_months());
        assert!(accelerated.summary().total_interest < baseline.summary().total_interest);
    }

    #[test]
    fn test_empty_plan_reproduces_baseline_exactly() {
        let loan = reference_loan();
        let baseline = compute(&loan, &ExtraPayments::new());

        // an intervening run with extras must not disturb later baseline runs
        let mut extras = ExtraPayments::new();
        extras.add(0, 50_000.0).unwrap();
        let _ = compute(&loan, &extras);

        let again = compute(&loan, &ExtraPayments::new());
        assert_eq!(baseline, again);
    }

    #[test]
    fn test_zero_principal_gives_single_degenerate_row() {
        let loan = Loan::new(0.0, 1.0, 1.5).unwrap();
        let schedule = compute(&loan, &ExtraPayments::new());

        assert_eq!(schedule.term_months(), 1);
        let row = &schedule.rows[0];
        assert_relative_eq!(row.interest, 0.0);
        assert_relative_eq!(row.scheduled_redemption, 0.0);
        assert_relative_eq!(row.extra_payment, 0.0);
        assert_relative_eq!(row.balance, 0.0);
    }

    #[test]
    fn test_full_redemption_rate_amortizes_in_twelve_slices() {
        // 100% annual redemption at 0% interest pays 1/12 of the principal
        // each month, the final slice capped to the residual balance
        let loan = Loan::new(10_000.0, 100.0, 0.0).unwrap();
        let schedule = compute(&loan, &ExtraPayments::new());

        assert_eq!(schedule.term_months(), 12);
        assert_abs_diff_eq!(schedule.rows[0].scheduled_redemption, 10_000.0 / 12.0);
        assert_relative_eq!(schedule.rows.last().unwrap().balance, 0.0);
        assert_relative_eq!(schedule.summary().total_interest, 0.0);
    }

    #[test]
    fn test_oversized_extra_payment_is_clamped_in_final_month() {
        let loan = Loan::new(10_000.0, 1.0, 0.0).unwrap();
        let mut extras = ExtraPayments::new();
        extras.add(5, 50_000.0).unwrap();
        let schedule = compute(&loan, &extras);

        assert_eq!(schedule.term_months(), 6);
        let last = schedule.rows.last().unwrap();
        assert_relative_eq!(last.balance, 0.0);
        // the recorded extra is the applied amount, not the requested one
        assert!(last.extra_payment < 50_000.0);
        assert!(last.extra_payment > 0.0);
        assert!(last.scheduled_redemption >= 0.0);
        assert_abs_diff_eq!(
            last.scheduled_redemption + last.extra_payment,
            schedule.rows[schedule.rows.len() - 2].balance,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_extra_payment_in_first_month_uses_offset_zero() {
        let loan = reference_loan();
        let mut extras = ExtraPayments::new();
        extras.add(0, 1_000.0).unwrap();
        let schedule = compute(&loan, &extras);

        assert_relative_eq!(schedule.rows[0].extra_payment, 1_000.0);
        assert_relative_eq!(schedule.rows[0].balance, 300_000.0 - 250.0 - 1_000.0);
        assert_relative_eq!(schedule.rows[1].extra_payment, 0.0);
    }

    #[test]
    fn test_payoff_by_extras_alone() {
        // redemption rate 0% is allowed as long as extras retire the loan
        let loan = Loan::new(10_000.0, 0.0, 1.5).unwrap();
        let mut extras = ExtraPayments::new();
        extras.add(0, 4_000.0).unwrap();
        extras.add(1, 8_000.0).unwrap();
        let schedule = compute(&loan, &extras);

        assert_eq!(schedule.term_months(), 2);
        assert_relative_eq!(schedule.rows.last().unwrap().balance, 0.0);
    }

    #[test]
    fn test_rejects_zero_redemption_without_extras() {
        let loan = Loan::new(10_000.0, 0.0, 1.5).unwrap();
        let result =
            AmortizationEngine::new(ScheduleConfig::default()).compute(&loan, &ExtraPayments::new());

        assert!(matches!(result, Err(EngineError::InvalidArgument { .. })));
    }

    #[test]
    fn test_rejects_negative_principal() {
        let loan = Loan {
            principal: -5.0,
            redemption_rate: 1.0,
            interest_rate: 1.5,
            start_date: None,
        };
        let result =
            AmortizationEngine::new(ScheduleConfig::default()).compute(&loan, &ExtraPayments::new());

        assert!(matches!(result, Err(EngineError::InvalidArgument { .. })));
    }

    #[test]
    fn test_aborts_when_term_bound_is_hit() {
        let engine = AmortizationEngine::new(ScheduleConfig {
            max_term_months: 120,
        });
        let result = engine.compute(&reference_loan(), &ExtraPayments::new());

        assert!(matches!(
            result,
            Err(EngineError::ComputationAborted { months: 120, .. })
        ));
    }

    #[test]
    fn test_longest_zero_interest_loan_fits_default_bound() {
        // 1% redemption at 0% interest runs exactly 1200 months
        let loan = Loan::new(120_000.0, 1.0, 0.0).unwrap();
        let schedule = compute(&loan, &ExtraPayments::new());

        assert_eq!(schedule.term_months(), MAX_TERM_MONTHS);
        assert_relative_eq!(schedule.rows.last().unwrap().balance, 0.0);
    }
}
