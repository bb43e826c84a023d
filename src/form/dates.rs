use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
    dates::{
        add_calendar_months_with, estimate_months_between, format_input_date, parse_input_date,
        parse_month_count, MonthOverflow,
    },
    errors::FieldError,
};

use super::Document;

/// Element ids of a start date, a duration in months and an end date.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateTriadIds {
    pub start: String,
    pub months: String,
    pub end: String,
}

impl DateTriadIds {
    pub fn new(start: impl Into<String>, months: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            months: months.into(),
            end: end.into(),
        }
    }
}

/// Keeps an end date in step with its start date and duration, and infers the
/// duration back when the end date is picked by hand.
#[derive(Debug, Clone)]
pub struct DateTriad {
    ids: DateTriadIds,
    overflow: MonthOverflow,
}

impl DateTriad {
    /// Fails with [`FieldError::MissingElement`] naming the first id that is
    /// not on the page.
    pub fn bind(
        doc: &dyn Document,
        ids: DateTriadIds,
        overflow: MonthOverflow,
    ) -> Result<Self, FieldError> {
        for id in [&ids.start, &ids.months, &ids.end] {
            if !doc.contains(id) {
                return Err(FieldError::MissingElement(id.clone()));
            }
        }
        Ok(Self { ids, overflow })
    }

    /// Binds the triad and fills in the end date straight away when the page
    /// already carries a start date and a duration.
    pub fn wire(
        doc: &mut dyn Document,
        ids: DateTriadIds,
        overflow: MonthOverflow,
    ) -> Result<Self, FieldError> {
        let triad = Self::bind(&*doc, ids, overflow)?;
        if let Some(end) = triad.recompute_end(doc)? {
            tracing::debug!(id = %triad.ids.end, %end, "initial end date computed");
        }
        Ok(triad)
    }

    pub fn ids(&self) -> &DateTriadIds {
        &self.ids
    }

    /// Start date or duration changed. Writes and returns the new end date, or
    /// `None` without touching the page when either input is blank or invalid.
    pub fn recompute_end(&self, doc: &mut dyn Document) -> Result<Option<NaiveDate>, FieldError> {
        let Some(start) = read_date(doc, &self.ids.start) else {
            return Ok(None);
        };
        let Some(months) = doc.value(&self.ids.months).as_deref().and_then(parse_month_count)
        else {
            tracing::debug!(id = %self.ids.months, "duration blank or invalid, end date kept");
            return Ok(None);
        };
        let Some(end) = add_calendar_months_with(start, months, self.overflow) else {
            tracing::warn!(%start, months, "end date out of range");
            return Ok(None);
        };
        doc.set_value(&self.ids.end, &format_input_date(end))?;
        Ok(Some(end))
    }

    /// End date changed. Writes the estimated duration when it is positive.
    pub fn recompute_months(&self, doc: &mut dyn Document) -> Result<Option<u32>, FieldError> {
        let (Some(start), Some(end)) = (
            read_date(doc, &self.ids.start),
            read_date(doc, &self.ids.end),
        ) else {
            return Ok(None);
        };
        let estimate = estimate_months_between(start, end);
        let Ok(months) = u32::try_from(estimate) else {
            return Ok(None);
        };
        if months == 0 {
            return Ok(None);
        }
        doc.set_value(&self.ids.months, &months.to_string())?;
        Ok(Some(months))
    }
}

fn read_date(doc: &dyn Document, id: &str) -> Option<NaiveDate> {
    let raw = doc.value(id)?;
    if raw.trim().is_empty() {
        return None;
    }
    match parse_input_date(&raw) {
        Ok(date) => Some(date),
        Err(err) => {
            tracing::debug!(id, %err, "ignoring unparsable date");
            None
        }
    }
}
