//! Whole-month calendar arithmetic
//!
//! The engine works on relative month offsets only; these helpers translate
//! between calendar dates and offsets for loaders and presentation. All
//! arithmetic ignores the day of month.

use chrono::{Datelike, NaiveDate};

use crate::error::{EngineError, EngineResult};

/// Absolute difference between two dates in whole months
///
/// The day of month is neglected, so 31.01. to 01.02. counts as one month.
/// The order of the arguments does not matter.
pub fn month_span(first: NaiveDate, second: NaiveDate) -> u32 {
    (linear_month(second) - linear_month(first)).unsigned_abs()
}

/// First-of-month date `months` whole months after `start`
///
/// Returns `None` only when the resulting year leaves the supported
/// calendar range.
pub fn month_offset(start: NaiveDate, months: u32) -> Option<NaiveDate> {
    let total = i64::from(linear_month(start)) + i64::from(months);
    let year = i32::try_from(total.div_euclid(12)).ok()?;
    let month = total.rem_euclid(12) as u32 + 1;
    NaiveDate::from_ymd_opt(year, month, 1)
}

/// Parse a `MM/YYYY` month into the first day of that month
pub fn parse_month(text: &str) -> EngineResult<NaiveDate> {
    let (month_text, year_text) = text
        .split_once('/')
        .ok_or_else(|| EngineError::invalid_argument(format!("expected MM/YYYY, got {text:?}")))?;
    let month: u32 = month_text
        .trim()
        .parse()
        .map_err(|_| EngineError::invalid_argument(format!("invalid month in {text:?}")))?;
    let year: i32 = year_text
        .trim()
        .parse()
        .map_err(|_| EngineError::invalid_argument(format!("invalid year in {text:?}")))?;
    NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| EngineError::invalid_argument(format!("no such month: {text:?}")))
}

fn linear_month(date: NaiveDate) -> i32 {
    date.year() * 12 + date.month0() as i32
}
