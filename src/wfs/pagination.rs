//! Splitting long observation ranges into queries FMI accepts.
//!
//! FMI returns at most 744 hours (31 days) of hourly observations per stored
//! query. Longer ranges are fetched month by month: every chunk runs from its
//! start to the last hour of that start's calendar month, and the next chunk
//! begins one hour later, on the first hour of the following month.

use crate::types::time_range::TimeRange;
use crate::types::weather_frame::DataPoint;
use chrono::{DateTime, Datelike, Duration, NaiveTime, TimeZone, Utc};
use log::debug;
use std::future::Future;

/// The longest span, in whole hours, a single observation query may cover.
pub const MAX_QUERY_HOURS: i64 = 744;

/// Last hour (23:00) of the calendar month containing `dt`.
///
/// Every month has at least 28 days, so day 28 plus four days always lands
/// in the following month. Truncating that to the 1st at midnight and
/// stepping back one hour gives the final hour of `dt`'s month.
pub fn month_last_hour(dt: DateTime<Utc>) -> DateTime<Utc> {
    let day_28 = dt.date_naive().with_day(28).unwrap_or_else(|| dt.date_naive());
    let next_month = day_28 + Duration::days(4);
    let first_of_next = next_month.with_day(1).unwrap_or(next_month);
    Utc.from_utc_datetime(&first_of_next.and_time(NaiveTime::MIN)) - Duration::hours(1)
}

/// Splits `range` into the sub-ranges queried one by one.
///
/// A range of at most [`MAX_QUERY_HOURS`] whole hours is returned as is.
/// Longer ranges are cut at every month's last hour; the final chunk ends at
/// `range.end`. A start after 23:00 on a month's last day runs on to the end
/// of the following month, so no chunk ever ends before it starts.
pub fn plan_chunks(range: TimeRange) -> Vec<TimeRange> {
    if range.whole_hours() <= MAX_QUERY_HOURS {
        return vec![range];
    }

    let mut chunks = Vec::new();
    let mut start = range.start;
    loop {
        let mut boundary = month_last_hour(start);
        if boundary < start {
            // Starts within a month's final hour: fold it into the next month.
            boundary = month_last_hour(boundary + Duration::hours(1));
        }
        if range.end <= boundary {
            chunks.push(TimeRange::new(start, range.end));
            break;
        }
        chunks.push(TimeRange::new(start, boundary));
        start = boundary + Duration::hours(1);
    }
    debug!("Split {} into {} monthly chunks", range, chunks.len());
    chunks
}

/// Loads every chunk of `range` with `load`, strictly one after another, and
/// concatenates the rows in chunk order.
///
/// The first failing chunk aborts the whole fetch.
pub async fn fetch_chunked<F, Fut, E>(range: TimeRange, mut load: F) -> Result<Vec<DataPoint>, E>
where
    F: FnMut(TimeRange) -> Fut,
    Fut: Future<Output = Result<Vec<DataPoint>, E>>,
{
    let mut points = Vec::new();
    for chunk in plan_chunks(range) {
        let mut chunk_points = load(chunk).await?;
        debug!("Chunk {} returned {} rows", chunk, chunk_points.len());
        points.append(&mut chunk_points);
    }
    Ok(points)
}
