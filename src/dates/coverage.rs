use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{add_calendar_months, format_input_date};

/// Outcome of checking a policy's expiration against a required duration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CoverageCheck {
    pub ok: bool,
    pub notes: Vec<String>,
}

/// Checks that `actual_end` reaches at least `required_months` calendar months
/// past `start`.
pub fn check_minimum_coverage(
    start: NaiveDate,
    actual_end: NaiveDate,
    required_months: u32,
) -> CoverageCheck {
    let Some(expected_end) = add_calendar_months(start, required_months) else {
        return CoverageCheck {
            ok: false,
            notes: vec![format!(
                "Required coverage of {} months from {} is out of the supported date range",
                required_months,
                format_input_date(start)
            )],
        };
    };

    let ok = actual_end >= expected_end;
    let mut notes = Vec::new();
    if !ok {
        notes.push(format!(
            "Insufficient coverage. Required until: {}, actual: {}",
            format_input_date(expected_end),
            format_input_date(actual_end)
        ));
    }
    CoverageCheck { ok, notes }
}
