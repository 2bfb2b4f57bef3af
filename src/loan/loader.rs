//! Load date-keyed extra payments from CSV
//!
//! The file carries one extra redemption per row as `Date,Amount` with the
//! date given as `MM/YYYY`. Dates are translated to 0-based month offsets
//! relative to the loan's first month before the plan reaches the engine.

use std::error::Error;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use csv::Reader;

use super::ExtraPayments;
use crate::dates::{month_span, parse_month};

type LoaderError = Box<dyn Error + Send + Sync>;

/// Raw CSV row matching the extra-payments file columns
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Amount")]
    amount: f64,
}

/// Load an extra-payment plan from a CSV file
///
/// `start` is the first calendar month of the loan; a payment dated in that
/// month gets offset 0.
pub fn load_extra_payments<P: AsRef<Path>>(
    path: P,
    start: NaiveDate,
) -> Result<ExtraPayments, LoaderError> {
    let mut reader = Reader::from_path(path)?;
    collect_payments(&mut reader, start)
}

/// Load an extra-payment plan from any reader (for tests and in-memory data)
pub fn load_extra_payments_from_reader<R: Read>(
    reader: R,
    start: NaiveDate,
) -> Result<ExtraPayments, LoaderError> {
    let mut reader = Reader::from_reader(reader);
    collect_payments(&mut reader, start)
}

fn collect_payments<R: Read>(
    reader: &mut Reader<R>,
    start: NaiveDate,
) -> Result<ExtraPayments, LoaderError> {
    let mut extras = ExtraPayments::new();
    for record in reader.deserialize() {
        let row: CsvRow = record?;
        let date = parse_month(&row.date)?;
        if month_span(start, date) > 0 && date < start {
            return Err(format!(
                "extra payment dated {} lies before the loan start",
                row.date
            )
            .into());
        }
        extras.add(month_span(start, date), row.amount)?;
    }
    log::debug!("loaded {} extra payments", extras.len());
    Ok(extras)
}
