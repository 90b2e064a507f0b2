//! Shared database helper functions
//!
//! Timestamps and dates are persisted as fixed-width text so lexical order
//! equals chronological order in range predicates.

use crate::errors::{AppError, AppResult};
use crate::types::TrafficSample;
use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::Row;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn format_timestamp(at: NaiveDateTime) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

pub fn parse_timestamp(s: &str) -> AppResult<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT)
        .map_err(|e| AppError::InvalidData(format!("Bad stored timestamp '{}': {}", s, e)))
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub fn parse_date(s: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(s, DATE_FORMAT)
        .map_err(|e| AppError::InvalidData(format!("Bad stored date '{}': {}", s, e)))
}

/// Construct a TrafficSample from five consecutive columns starting at `first`
///
/// Expects: unique_impressions, total_impressions, unique_clicks,
/// total_clicks, subscriptions (nullable).
pub fn sample_from_row(row: &Row, first: usize) -> rusqlite::Result<TrafficSample> {
    Ok(TrafficSample {
        unique_impressions: row.get::<_, i64>(first)?.max(0) as u64,
        total_impressions: row.get::<_, i64>(first + 1)?.max(0) as u64,
        unique_clicks: row.get::<_, i64>(first + 2)?.max(0) as u64,
        total_clicks: row.get::<_, i64>(first + 3)?.max(0) as u64,
        subscriptions: row
            .get::<_, Option<i64>>(first + 4)?
            .map(|s| s.max(0) as u64),
    })
}
