//! Resolving the caller's time selection into a concrete UTC time range.

use crate::error::FmiError;
use chrono::{DateTime, Duration, DurationRound, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Earliest moment observation queries reach back to when only an end date is given.
pub const EPOCH_FLOOR: (i32, u32, u32) = (2018, 1, 1);

/// An inclusive range of UTC timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeRange {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// Whole hours between start and end, rounded down.
    pub fn whole_hours(&self) -> i64 {
        (self.end - self.start).num_hours()
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.start.to_rfc3339(), self.end.to_rfc3339())
    }
}

/// A calendar date given either as a `NaiveDate` or as `YYYY-MM-DD` text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateInput {
    Date(NaiveDate),
    Text(String),
}

impl DateInput {
    pub fn resolve(&self) -> Result<NaiveDate, FmiError> {
        match self {
            DateInput::Date(date) => Ok(*date),
            DateInput::Text(text) => NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d")
                .map_err(|_| FmiError::DateParsing(text.clone())),
        }
    }

    fn start_of_day(&self) -> Result<DateTime<Utc>, FmiError> {
        let date = self.resolve()?;
        Ok(Utc.from_utc_datetime(&date.and_time(chrono::NaiveTime::MIN)))
    }

    /// Last whole minute of the day, 23:59:00.
    fn end_of_day(&self) -> Result<DateTime<Utc>, FmiError> {
        let date = self.resolve()?;
        let Some(last_minute) = date.and_hms_opt(23, 59, 0) else {
            return Err(FmiError::DateParsing(date.to_string()));
        };
        Ok(Utc.from_utc_datetime(&last_minute))
    }
}

impl From<NaiveDate> for DateInput {
    fn from(date: NaiveDate) -> Self {
        DateInput::Date(date)
    }
}

impl From<&str> for DateInput {
    fn from(text: &str) -> Self {
        DateInput::Text(text.to_string())
    }
}

impl From<String> for DateInput {
    fn from(text: String) -> Self {
        DateInput::Text(text)
    }
}

/// The current UTC time truncated to the minute.
pub fn current_minute() -> DateTime<Utc> {
    let now = Utc::now();
    now.duration_trunc(Duration::minutes(1)).unwrap_or(now)
}

fn epoch_floor() -> DateTime<Utc> {
    let (year, month, day) = EPOCH_FLOOR;
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0)
        .single()
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

/// Infers the observation time range from any two (or one) of an hour count,
/// a start date and an end date.
///
/// * hours only: the `hours` preceding `now`.
/// * start only: from the start of that day until `now`.
/// * start and hours: `hours` from the start of that day.
/// * end only: from 2018-01-01 until the end of that day.
/// * end and hours: the `hours` preceding the end of that day.
/// * start and end: both days, inclusive.
///
/// The end is clamped to `now`, so future data is never requested. An hour
/// count of zero is treated as absent.
///
/// # Errors
///
/// [`FmiError::InvalidTimeSelection`] if none or all three are given or the
/// hour count reaches outside chrono's date range,
/// [`FmiError::DateParsing`] for malformed dates and
/// [`FmiError::StartAfterEnd`] if the start lies after the (clamped) end.
pub fn infer_time_range(
    hours: Option<u32>,
    start_date: Option<DateInput>,
    end_date: Option<DateInput>,
    now: DateTime<Utc>,
) -> Result<TimeRange, FmiError> {
    let span = hours.filter(|h| *h > 0).map(|h| Duration::hours(i64::from(h)));

    let (start, end) = match (span, start_date, end_date) {
        (None, None, None) => {
            return Err(FmiError::InvalidTimeSelection(
                "none of hours, start_date and end_date provided",
            ))
        }
        (Some(_), Some(_), Some(_)) => {
            return Err(FmiError::InvalidTimeSelection(
                "hours, start_date and end_date must not all be provided",
            ))
        }
        (Some(span), None, None) => (hours_before(now, span)?, now),
        (None, Some(start), None) => (start.start_of_day()?, now),
        (Some(span), Some(start), None) => {
            let start = start.start_of_day()?;
            // Past the representable range means past `now`, which is clamped below.
            (start, start.checked_add_signed(span).unwrap_or(now))
        }
        (None, None, Some(end)) => (epoch_floor(), end.end_of_day()?),
        (Some(span), None, Some(end)) => {
            let end = end.end_of_day()?;
            (hours_before(end, span)?, end)
        }
        (None, Some(start), Some(end)) => (start.start_of_day()?, end.end_of_day()?),
    };

    let end = end.min(now);
    if start > end {
        return Err(FmiError::StartAfterEnd { start, end });
    }
    Ok(TimeRange { start, end })
}

fn hours_before(end: DateTime<Utc>, span: Duration) -> Result<DateTime<Utc>, FmiError> {
    end.checked_sub_signed(span)
        .ok_or(FmiError::InvalidTimeSelection("hours reach before the earliest representable date"))
}
