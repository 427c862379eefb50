use anyhow::Result;
use chrono::{Datelike, NaiveDate};

use crate::error::MosaicError;

/// Filter a list of dates down to those whose month and year are both wanted.
/// Keeps the input order; errors when nothing survives.
pub fn filter_dates(dates: &[NaiveDate], months: &[u32], years: &[i32]) -> Result<Vec<NaiveDate>> {
    let filtered: Vec<NaiveDate> = dates
        .iter()
        .copied()
        .filter(|date| months.contains(&date.month()) && years.contains(&date.year()))
        .collect();

    if filtered.is_empty() {
        return Err(MosaicError::NoDatesInCalendar.into());
    }
    Ok(filtered)
}
