// ISO 8601 week arithmetic. Weeks start on Monday 00:00 UTC.

use chrono::{Datelike, NaiveDate, TimeZone, Utc, Weekday};

use crate::modules::time_entries::core::interval::TimeRange;

const WEEK_MILLIS: i64 = 7 * 24 * 60 * 60 * 1000;

/// Bounds of ISO week `week` of ISO year `year` as a half-open range, or
/// `None` when the pair does not name a real week (e.g. week 53 of a 52-week year).
pub fn week_bounds(year: i32, week: u32) -> Option<TimeRange> {
    let monday = NaiveDate::from_isoywd_opt(year, week, Weekday::Mon)?;
    let start = monday.and_hms_opt(0, 0, 0)?.and_utc().timestamp_millis();
    Some(TimeRange::new(start, start + WEEK_MILLIS))
}

/// ISO year and week containing the given instant.
pub fn week_of(millis: i64) -> Option<(i32, u32)> {
    let instant = Utc.timestamp_millis_opt(millis).single()?;
    let iso = instant.iso_week();
    Some((iso.year(), iso.week()))
}
