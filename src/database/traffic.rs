//! Traffic series queries.

use crate::database::helpers::{format_timestamp, parse_timestamp, sample_from_row};
use crate::database::traits::TrafficStore;
use crate::database::Database;
use crate::errors::AppResult;
use crate::types::{Resolution, SummaryKind, TimeBucket, TrafficSample, TrafficScope};
use chrono::NaiveDateTime;
use rusqlite::params;
use tracing::debug;

impl TrafficStore for Database {
    fn fetch_series(
        &self,
        resolution: Resolution,
        scope: &TrafficScope,
        start: Option<NaiveDateTime>,
        stop: Option<NaiveDateTime>,
    ) -> AppResult<Vec<(TimeBucket, TrafficSample)>> {
        let (scope_kind, subject_key) = scope.parts();
        let start = start.map(|s| format_timestamp(resolution.truncate(s)));
        let stop = stop.map(format_timestamp);

        let mut stmt = self.connection().prepare_cached(
            r#"SELECT bucket, unique_impressions, total_impressions, unique_clicks,
                      total_clicks, subscriptions
               FROM traffic_samples
               WHERE resolution = ?1 AND scope = ?2 AND subject_key = ?3
                 AND (?4 IS NULL OR bucket >= ?4)
                 AND (?5 IS NULL OR bucket <= ?5)
               ORDER BY bucket"#,
        )?;

        let rows = stmt.query_map(
            params![resolution.as_str(), scope_kind, subject_key, start, stop],
            |row| Ok((row.get::<_, String>(0)?, sample_from_row(row, 1)?)),
        )?;

        let mut series = Vec::new();
        for row in rows {
            let (bucket, sample) = row?;
            series.push((TimeBucket::new(resolution, parse_timestamp(&bucket)?), sample));
        }

        debug!(
            "Fetched {} {} rows for {}:{}",
            series.len(),
            resolution,
            scope_kind,
            subject_key
        );
        Ok(series)
    }

    /// Summaries are per-subject sums over the daily series
    fn fetch_summary(&self, kind: SummaryKind) -> AppResult<Vec<(String, TrafficSample)>> {
        let mut stmt = self.connection().prepare_cached(
            r#"SELECT subject_key,
                      COALESCE(SUM(unique_impressions), 0),
                      COALESCE(SUM(total_impressions), 0),
                      COALESCE(SUM(unique_clicks), 0),
                      COALESCE(SUM(total_clicks), 0),
                      SUM(subscriptions)
               FROM traffic_samples
               WHERE resolution = 'day' AND scope = ?1
               GROUP BY subject_key"#,
        )?;

        let rows = stmt.query_map(params![kind.as_str()], |row| {
            Ok((row.get::<_, String>(0)?, sample_from_row(row, 1)?))
        })?;

        let summary = rows.collect::<Result<Vec<_>, _>>()?;
        debug!("Fetched {} {} summaries", summary.len(), kind.as_str());
        Ok(summary)
    }
}
