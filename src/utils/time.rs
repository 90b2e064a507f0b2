//! Calendar utilities for traffic aggregation
//!
//! Month lengths and month arithmetic follow calendar rules (variable month
//! length, leap years) through `chrono`, never fixed day counts.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};

/// Number of days in the given month.
///
/// # Examples
/// ```
/// use promo_traffic::utils::time::days_in_month;
/// assert_eq!(days_in_month(2024, 2), 29);
/// assert_eq!(days_in_month(2023, 2), 28);
/// assert_eq!(days_in_month(2024, 12), 31);
/// ```
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    match (
        NaiveDate::from_ymd_opt(year, month, 1),
        NaiveDate::from_ymd_opt(next_year, next_month, 1),
    ) {
        (Some(first), Some(next_first)) => (next_first - first).num_days() as u32,
        _ => 0,
    }
}

/// The calendar month before `(year, month)`, wrapping January to December.
///
/// # Examples
/// ```
/// use promo_traffic::utils::time::previous_month;
/// assert_eq!(previous_month(2024, 1), (2023, 12));
/// assert_eq!(previous_month(2024, 6), (2024, 5));
/// ```
pub fn previous_month(year: i32, month: u32) -> (i32, u32) {
    if month <= 1 {
        (year - 1, 12)
    } else {
        (year, month - 1)
    }
}

/// Weekday index with Monday = 0 … Sunday = 6
pub fn weekday_index(date: NaiveDate) -> usize {
    date.weekday().num_days_from_monday() as usize
}

/// Shift a wall-clock time into the promotion calendar
pub fn shift_hours(at: NaiveDateTime, offset_hours: i64) -> NaiveDateTime {
    at - Duration::hours(offset_hours)
}

/// Parse `YYYY-MM-DD HH:MM:SS`, `YYYY-MM-DDTHH:MM:SS` or a bare `YYYY-MM-DD`
///
/// # Examples
/// ```
/// use promo_traffic::utils::time::parse_datetime;
/// assert!(parse_datetime("2024-01-01 12:00:00").is_ok());
/// assert!(parse_datetime("2024-01-01T12:00:00").is_ok());
/// assert!(parse_datetime("2024-01-01").is_ok());
/// assert!(parse_datetime("yesterday").is_err());
/// ```
pub fn parse_datetime(s: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    let s = s.trim();
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S"))
        .or_else(|_| NaiveDate::parse_from_str(s, "%Y-%m-%d").map(|d| d.and_time(NaiveTime::MIN)))
}

/// Parse a `YYYY-MM-DD` date
pub fn parse_date(s: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
}
