//! Traffic report for a single promoted item
//!
//! Covers the item's promotion window hour by hour. The table and both charts
//! are derived from the same hourly rows; the `total` row uses the reconciled
//! totals, where total impressions and clicks come from the coarsest series
//! the store has for the item.

use crate::config::ReportingConfig;
use crate::database::{PromotionStore, TrafficStore};
use crate::errors::{AppError, AppResult};
use crate::types::{
    total_of, AggregatedRow, Cell, ChartSeries, PromotedItem, Resolution, Table, TimeBucket,
    TrafficSample, TrafficScope, Viewer,
};
use crate::utils::format::format_number;
use crate::utils::time::shift_hours;
use chrono::{Duration, NaiveDateTime};
use serde::Serialize;
use tracing::debug;

pub const PROMOTED_COLUMNS: [&str; 7] = [
    "date",
    "imp uniques",
    "imp total",
    "click uniques",
    "click total",
    "unique CTR",
    "total CTR",
];

/// Charts need more than this many hourly rows to be worth drawing
const MIN_CHART_ROWS: usize = 2;

#[derive(Debug, Clone, Serialize)]
pub struct PromotedTrafficReport {
    pub item: PromotedItem,
    pub window_start: NaiveDateTime,
    pub window_end: NaiveDateTime,
    /// Figures may still change until a grace period after the window ends
    pub preliminary: bool,
    pub hourly: Vec<(TimeBucket, TrafficSample)>,
    pub totals: TrafficSample,
    /// Whether the viewer may edit the item's traffic viewer list
    pub viewer_can_edit: bool,
}

pub struct PromotedTrafficAnalyser;

impl PromotedTrafficAnalyser {
    pub fn analyse<S>(
        store: &S,
        item_id: &str,
        viewer: &Viewer,
        now: NaiveDateTime,
        settings: &ReportingConfig,
    ) -> AppResult<PromotedTrafficReport>
    where
        S: TrafficStore + PromotionStore + ?Sized,
    {
        let item = store
            .promoted_item(item_id)?
            .ok_or_else(|| AppError::NotFound(format!("promoted item {}", item_id)))?;

        let offset = settings.timezone_offset_hours;
        let window_start = shift_hours(Resolution::Hour.truncate(item.created_at), offset);
        let window_end = shift_hours(item.promote_until, offset);
        let preliminary = now < window_end + Duration::days(settings.preliminary_grace_days);

        let scope = TrafficScope::Thing(item.item_id.clone());
        let hourly =
            store.fetch_series(Resolution::Hour, &scope, Some(window_start), Some(window_end))?;

        let mut coarse = store.fetch_series(Resolution::Month, &scope, None, None)?;
        if coarse.is_empty() {
            coarse = store.fetch_series(Resolution::Day, &scope, None, None)?;
        }
        let coarse_total = (!coarse.is_empty()).then(|| total_of(&coarse));
        let totals = Self::reconcile_totals(total_of(&hourly), coarse_total);

        debug!(
            "Promoted traffic for {}: {} hourly rows, preliminary={}",
            item.item_id,
            hourly.len(),
            preliminary
        );

        Ok(PromotedTrafficReport {
            viewer_can_edit: viewer.can_see(&item.owner_id),
            item,
            window_start,
            window_end,
            preliminary,
            hourly,
            totals,
        })
    }

    /// Overwrite the window's impression and click totals with the coarse ones
    pub fn reconcile_totals(window: TrafficSample, coarse: Option<TrafficSample>) -> TrafficSample {
        match coarse {
            Some(coarse) => TrafficSample {
                total_impressions: coarse.total_impressions,
                total_clicks: coarse.total_clicks,
                ..window
            },
            None => window,
        }
    }
}

impl PromotedTrafficReport {
    fn row(label: &str, sample: &TrafficSample) -> AggregatedRow {
        let ctr = |clicks: u64, impressions: u64| {
            if impressions == 0 {
                Cell::missing()
            } else {
                Cell::percent(100.0 * clicks as f64 / impressions as f64)
            }
        };
        AggregatedRow::new(
            label,
            vec![
                Cell::count(sample.unique_impressions),
                Cell::count(sample.total_impressions),
                Cell::count(sample.unique_clicks),
                Cell::count(sample.total_clicks),
                ctr(sample.unique_clicks, sample.unique_impressions),
                ctr(sample.total_clicks, sample.total_impressions),
            ],
        )
    }

    /// Hourly rows followed by the reconciled `total` row
    pub fn table(&self) -> AppResult<Table> {
        let mut table = Table::new(&PROMOTED_COLUMNS);
        for (bucket, sample) in &self.hourly {
            table.push(Self::row(&bucket.label(), sample))?;
        }
        table.push(Self::row("total", &self.totals))?;
        Ok(table)
    }

    /// Impressions and clicks charts; empty for short windows
    pub fn charts(&self) -> Vec<ChartSeries> {
        if self.hourly.len() <= MIN_CHART_ROWS {
            return Vec::new();
        }

        let x: Vec<String> = self.hourly.iter().map(|(b, _)| b.label()).collect();
        let column = |f: fn(&TrafficSample) -> u64| -> Vec<f64> {
            self.hourly.iter().map(|(_, s)| f(s) as f64).collect()
        };

        vec![
            ChartSeries::new(
                &format!("impressions ({})", format_number(self.totals.total_impressions as i64)),
                x.clone(),
            )
            .with_series("uniques", "#FF4500", column(|s| s.unique_impressions))
            .with_series("total", "#336699", column(|s| s.total_impressions)),
            ChartSeries::new(
                &format!("clicks ({})", format_number(self.totals.total_clicks as i64)),
                x,
            )
            .with_series("uniques", "#FF4500", column(|s| s.unique_clicks))
            .with_series("total", "#336699", column(|s| s.total_clicks)),
        ]
    }

    pub fn to_csv(&self) -> AppResult<String> {
        self.table()?.to_csv(false)
    }
}
