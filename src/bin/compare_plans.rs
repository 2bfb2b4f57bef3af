//! Sweep single extra payments over a grid of months and amounts
//!
//! Outputs a comparison CSV of term and interest saved per plan

use amortization_system::{AmortizationEngine, ExtraPayments, Loan, ScheduleConfig};
use rayon::prelude::*;
use std::fs::File;
use std::io::Write;
use std::time::Instant;

/// Outcome of one extra-payment plan against the baseline
#[derive(Debug, Clone)]
struct PlanOutcome {
    month_offset: u32,
    amount: f64,
    term_months: u32,
    total_interest: f64,
    months_saved: i64,
    interest_saved: f64,
}

fn main() {
    env_logger::init();

    let start = Instant::now();
    let loan = Loan::new(300_000.0, 1.0, 1.5).expect("valid loan");
    let engine = AmortizationEngine::new(ScheduleConfig::default());

    let baseline = engine
        .compute(&loan, &ExtraPayments::new())
        .expect("baseline schedule");
    let baseline_summary = baseline.summary();
    println!(
        "Baseline: {} months, total interest {:.2}",
        baseline_summary.term_months, baseline_summary.total_interest
    );

    // one extra payment at the start of each of the first ten years
    let plans: Vec<(u32, f64)> = (0..10)
        .flat_map(|year| {
            [5_000.0, 10_000.0, 20_000.0]
                .into_iter()
                .map(move |amount| (year * 12, amount))
        })
        .collect();

    println!("Running {} plans...", plans.len());
    let run_start = Instant::now();

    let outcomes: Vec<PlanOutcome> = plans
        .par_iter()
        .map(|&(month_offset, amount)| {
            let mut extras = ExtraPayments::new();
            extras.add(month_offset, amount).expect("valid extra payment");
            let summary = engine
                .compute(&loan, &extras)
                .expect("plan schedule")
                .summary();

            PlanOutcome {
                month_offset,
                amount,
                term_months: summary.term_months,
                total_interest: summary.total_interest,
                months_saved: i64::from(baseline_summary.term_months)
                    - i64::from(summary.term_months),
                interest_saved: baseline_summary.total_interest - summary.total_interest,
            }
        })
        .collect();

    println!("Plans complete in {:?}", run_start.elapsed());

    // Write comparison CSV
    let csv_path = "plan_comparison.csv";
    let mut file = File::create(csv_path).expect("Unable to create CSV file");
    writeln!(
        file,
        "MonthOffset,Amount,TermMonths,TotalInterest,MonthsSaved,InterestSaved"
    )
    .unwrap();
    for outcome in &outcomes {
        writeln!(
            file,
            "{},{:.2},{},{:.2},{},{:.2}",
            outcome.month_offset,
            outcome.amount,
            outcome.term_months,
            outcome.total_interest,
            outcome.months_saved,
            outcome.interest_saved,
        )
        .unwrap();
    }
    println!("Comparison written to: {}", csv_path);

    // Print the best plan per amount
    for &amount in &[5_000.0, 10_000.0, 20_000.0] {
        if let Some(best) = outcomes
            .iter()
            .filter(|o| o.amount == amount)
            .max_by(|a, b| a.interest_saved.total_cmp(&b.interest_saved))
        {
            println!(
                "Best {:.0} plan: month {:>3} saves {} months and {:.2} interest",
                amount, best.month_offset, best.months_saved, best.interest_saved
            );
        }
    }

    println!("Total runtime: {:?}", start.elapsed());
}
