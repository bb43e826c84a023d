//! Calendar arithmetic for contract and policy validity periods.

pub mod coverage;

pub use coverage::{check_minimum_coverage, CoverageCheck};

use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::errors::FieldError;

/// Flat month length used when a duration is inferred from two dates.
pub const DAYS_PER_MONTH: f64 = 30.0;

const INPUT_DATE_FORMAT: &str = "%Y-%m-%d";

/// What happens when the start day does not exist in the target month.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum MonthOverflow {
    /// Excess days spill into the next month: Jan 31 + 1 month = Mar 2 (leap
    /// year) or Mar 3.
    #[default]
    Rollover,
    /// Clamp to the last day of the target month: Jan 31 + 1 month = Feb 29.
    Clamp,
}

/// A start date plus a duration in whole calendar months.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateSpan {
    pub start: NaiveDate,
    pub months: u32,
}

impl DateSpan {
    pub fn new(start: NaiveDate, months: u32) -> Self {
        Self { start, months }
    }

    pub fn end_date(&self) -> Option<NaiveDate> {
        add_calendar_months(self.start, self.months)
    }

    pub fn end_date_with(&self, overflow: MonthOverflow) -> Option<NaiveDate> {
        add_calendar_months_with(self.start, self.months, overflow)
    }
}

/// Adds calendar months using [`MonthOverflow::Rollover`]. `None` only when the
/// result leaves chrono's supported range.
pub fn add_calendar_months(start: NaiveDate, months: u32) -> Option<NaiveDate> {
    add_calendar_months_with(start, months, MonthOverflow::Rollover)
}

pub fn add_calendar_months_with(
    start: NaiveDate,
    months: u32,
    overflow: MonthOverflow,
) -> Option<NaiveDate> {
    match overflow {
        MonthOverflow::Clamp => start.checked_add_months(Months::new(months)),
        MonthOverflow::Rollover => {
            let first_of_target = start
                .with_day(1)?
                .checked_add_months(Months::new(months))?;
            first_of_target.checked_add_days(Days::new(u64::from(start.day() - 1)))
        }
    }
}

/// Approximates the number of months between two dates as elapsed days over
/// [`DAYS_PER_MONTH`], rounded half up.
pub fn estimate_months_between(start: NaiveDate, end: NaiveDate) -> i64 {
    let days = (end - start).num_days() as f64;
    (days / DAYS_PER_MONTH + 0.5).floor() as i64
}

/// Renders a date the way `<input type="date">` expects it.
pub fn format_input_date(date: NaiveDate) -> String {
    date.format(INPUT_DATE_FORMAT).to_string()
}

pub fn parse_input_date(text: &str) -> Result<NaiveDate, FieldError> {
    NaiveDate::parse_from_str(text.trim(), INPUT_DATE_FORMAT)
        .map_err(|_| FieldError::InvalidDate(text.to_string()))
}

/// Reads the leading integer of a duration field (`"12"`, `"12 meses"`).
/// Empty, signed or non-numeric input yields `None`.
pub fn parse_month_count(text: &str) -> Option<u32> {
    let trimmed = text.trim_start();
    let end = trimmed
        .find(|ch: char| !ch.is_ascii_digit())
        .unwrap_or(trimmed.len());
    if end == 0 {
        return None;
    }
    trimmed[..end].parse().ok()
}
