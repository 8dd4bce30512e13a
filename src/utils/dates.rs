use chrono::{Local, NaiveDate};

use crate::client::{DATE_FORMAT, DateRange};
use crate::error::PortalError;

pub fn parse_date(value: &str) -> Result<NaiveDate, PortalError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .map_err(|_| PortalError::BadRequest(format!("Invalid date '{}', expected YYYY-MM-DD", value)))
}

/// Requested day, or today in local time when none was given.
pub fn date_or_today(value: Option<&str>) -> Result<NaiveDate, PortalError> {
    match value {
        Some(v) if !v.trim().is_empty() => parse_date(v),
        _ => Ok(Local::now().date_naive()),
    }
}

/// A range is only applied when both ends are given; otherwise the full
/// history is requested.
pub fn optional_range(
    start: Option<&str>,
    end: Option<&str>,
) -> Result<Option<DateRange>, PortalError> {
    let (Some(start), Some(end)) = (start, end) else {
        return Ok(None);
    };
    let range = DateRange {
        start: parse_date(start)?,
        end: parse_date(end)?,
    };
    if range.start > range.end {
        return Err(PortalError::BadRequest(
            "start_date cannot be after end_date".to_string(),
        ));
    }
    Ok(Some(range))
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}
