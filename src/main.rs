//! Amortization System CLI
//!
//! Command-line interface for computing annuity-loan payoff schedules

use amortization_system::{
    dates,
    loan::load_extra_payments,
    AmortizationEngine, ExtraPayments, Loan, ScheduleConfig,
};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

/// Amortization schedules for annuity loans with unscheduled redemptions
#[derive(Parser)]
#[command(name = "amortization_system", version)]
struct Cli {
    /// Loan amount
    #[arg(long, default_value_t = 300_000.0)]
    principal: f64,

    /// Annual redemption rate in percent
    #[arg(long, default_value_t = 1.0)]
    redemption: f64,

    /// Nominal annual interest rate in percent
    #[arg(long, default_value_t = 1.5)]
    interest: f64,

    /// First month of the loan (MM/YYYY); enables the date column
    #[arg(long)]
    start: Option<String>,

    /// CSV file with unscheduled redemptions (Date,Amount)
    #[arg(long)]
    extras: Option<PathBuf>,

    /// Path for the full schedule CSV
    #[arg(long, default_value = "schedule_output.csv")]
    csv: PathBuf,

    /// Also write the full schedule as JSON
    #[arg(long)]
    json: Option<PathBuf>,

    /// Number of months echoed to the console
    #[arg(long, default_value_t = 24)]
    months_shown: usize,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    println!("Amortization System v0.1.0");
    println!("==========================\n");

    let start = match &cli.start {
        Some(text) => Some(
            dates::parse_month(text).with_context(|| format!("invalid --start value {text:?}"))?,
        ),
        None => None,
    };

    let mut loan = Loan::new(cli.principal, cli.redemption, cli.interest)?;
    if let Some(date) = start {
        loan = loan.with_start_date(date);
    }

    let extras = match (&cli.extras, start) {
        (Some(path), Some(date)) => load_extra_payments(path, date)
            .map_err(anyhow::Error::from_boxed)
            .with_context(|| format!("failed to load extra payments from {}", path.display()))?,
        (Some(_), None) => {
            anyhow::bail!("--extras requires --start to anchor the payment dates")
        }
        (None, _) => ExtraPayments::new(),
    };

    println!("Loan:");
    println!("  Principal: {:.2}", loan.principal);
    println!("  Redemption: {:.2}%", loan.redemption_rate);
    println!("  Interest: {:.2}%", loan.interest_rate);
    if !extras.is_empty() {
        println!("  Extra payments: {} totalling {:.2}", extras.len(), extras.total());
    }
    println!();

    let engine = AmortizationEngine::new(ScheduleConfig::default());
    let result = engine.compute(&loan, &extras)?;

    // Print header
    println!("Schedule ({} months):", result.rows.len());
    println!(
        "{:>5} {:>8} {:>12} {:>12} {:>12} {:>14}",
        "Month", "Date", "Interest", "Redemption", "Extra", "Balance"
    );
    println!("{}", "-".repeat(68));

    for row in result.rows.iter().take(cli.months_shown) {
        println!(
            "{:>5} {:>8} {:>12.2} {:>12.2} {:>12.2} {:>14.2}",
            row.month,
            month_label(loan.start_date, row.month),
            row.interest,
            row.scheduled_redemption,
            row.extra_payment,
            row.balance,
        );
    }

    if result.rows.len() > cli.months_shown {
        println!("... ({} more months)", result.rows.len() - cli.months_shown);
    }

    // Write full results to CSV
    let mut file = File::create(&cli.csv)
        .with_context(|| format!("unable to create {}", cli.csv.display()))?;
    writeln!(file, "Month,Date,Interest,Redemption,ExtraPayment,Balance")?;
    for row in &result.rows {
        writeln!(
            file,
            "{},{},{:.2},{:.2},{:.2},{:.2}",
            row.month,
            month_label(loan.start_date, row.month),
            row.interest,
            row.scheduled_redemption,
            row.extra_payment,
            row.balance,
        )?;
    }
    println!("\nFull schedule written to: {}", cli.csv.display());

    if let Some(path) = &cli.json {
        let file =
            File::create(path).with_context(|| format!("unable to create {}", path.display()))?;
        serde_json::to_writer_pretty(file, &result)?;
        println!("JSON schedule written to: {}", path.display());
    }

    // Print summary
    let summary = result.summary();
    println!("\nSummary:");
    println!("  Monthly rate: {:.2}", summary.monthly_rate);
    println!(
        "  Term: {} years {} months",
        summary.term_years, summary.term_remainder_months
    );
    println!("  Total interest: {:.2}", summary.total_interest);
    println!("  Total extra payments: {:.2}", summary.total_extra_payments);
    println!("  Total paid: {:.2}", summary.total_paid);

    Ok(())
}

/// Calendar month of a schedule row as MM/YYYY, empty without a start date
fn month_label(start: Option<NaiveDate>, month: u32) -> String {
    start
        .and_then(|date| dates::month_offset(date, month - 1))
        .map(|date| date.format("%m/%Y").to_string())
        .unwrap_or_default()
}
