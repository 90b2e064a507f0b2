//! Traffic summaries over site time series
//!
//! Folds daily and monthly rows into weekday means and a month-over-month
//! table. The current month is projected from the days seen so far; a
//! projected cell carries the `gray` class so consumers can tell an estimate
//! from an observed total.
//!
//! Site samples carry uniques in `unique_impressions` and pageviews in
//! `total_impressions`.

use crate::errors::AppResult;
use crate::types::{AggregatedRow, Cell, CellClass, Table, TimeBucket, TrafficSample};
use crate::utils::math::{mean, percent_change};
use crate::utils::time::{days_in_month, previous_month, weekday_index};
use chrono::{Datelike, NaiveDate};
use serde::Serialize;

pub const MONTHLY_COLUMNS: [&str; 5] = [
    "month",
    "uniques",
    "impressions",
    "uniques change",
    "impressions change",
];

/// Per-weekday means, Monday first
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DayOfWeekMeans {
    pub uniques: [f64; 7],
    pub impressions: [f64; 7],
}

/// Month-projection inputs derived from daily rows
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MonthProjection {
    /// Ratio of this month's expected users to last month's
    pub user_scale: f64,
    pub month_len: u32,
    /// Whole days of the current month already reported (up to yesterday)
    pub days_elapsed: u32,
}

pub struct TrafficAggregator;

impl TrafficAggregator {
    /// Mean daily uniques and impressions; 0 for an empty series
    pub fn overall_means(days: &[(TimeBucket, TrafficSample)]) -> (f64, f64) {
        let uniques: Vec<f64> = days.iter().map(|(_, s)| s.unique_impressions as f64).collect();
        let impressions: Vec<f64> = days.iter().map(|(_, s)| s.total_impressions as f64).collect();
        (mean(&uniques), mean(&impressions))
    }

    /// Bucket daily rows by weekday and average each bucket
    pub fn day_of_week_means(days: &[(TimeBucket, TrafficSample)]) -> DayOfWeekMeans {
        let mut uniques: [Vec<f64>; 7] = Default::default();
        let mut impressions: [Vec<f64>; 7] = Default::default();

        for (bucket, sample) in days {
            let dow = weekday_index(bucket.date());
            uniques[dow].push(sample.unique_impressions as f64);
            impressions[dow].push(sample.total_impressions as f64);
        }

        let mut means = DayOfWeekMeans::default();
        for dow in 0..7 {
            means.uniques[dow] = mean(&uniques[dow]);
            means.impressions[dow] = mean(&impressions[dow]);
        }
        means
    }

    /// Projection parameters for the month containing `today`
    ///
    /// `None` on the 1st, when there is nothing of the month to project from.
    pub fn month_projection(
        days: &[(TimeBucket, TrafficSample)],
        today: NaiveDate,
    ) -> Option<MonthProjection> {
        if today.day() == 1 {
            return None;
        }

        let month_len = days_in_month(today.year(), today.month());
        let (last_year, last_month) = previous_month(today.year(), today.month());
        let last_month_len = days_in_month(last_year, last_month);

        let uniques_in = |year: i32, month: u32| -> Vec<f64> {
            days.iter()
                .filter(|(b, _)| b.date().year() == year && b.date().month() == month)
                .map(|(_, s)| s.unique_impressions as f64)
                .collect()
        };
        let last_days = uniques_in(last_year, last_month);
        let this_days = uniques_in(today.year(), today.month());

        let mut user_scale = 0.0;
        if !last_days.is_empty() && !this_days.is_empty() {
            let last_mean = mean(&last_days);
            let day_mean = mean(&this_days);
            if last_mean != 0.0 && day_mean != 0.0 {
                user_scale =
                    (day_mean * month_len as f64) / (last_mean * last_month_len as f64);
            }
        }

        Some(MonthProjection {
            user_scale,
            month_len,
            days_elapsed: today.day() - 1,
        })
    }

    /// Month-over-month table with deltas and a projected current month
    pub fn monthly_summary(
        months: &[(TimeBucket, TrafficSample)],
        days: &[(TimeBucket, TrafficSample)],
        today: NaiveDate,
    ) -> AppResult<Table> {
        let mut table = Table::new(&MONTHLY_COLUMNS);
        let projection = Self::month_projection(days, today);
        let last_month_users = months
            .len()
            .checked_sub(2)
            .map(|i| months[i].1.unique_impressions)
            .unwrap_or(0);

        for (x, (bucket, sample)) in months.iter().enumerate() {
            let current = [sample.unique_impressions, sample.total_impressions];
            let mut cells = vec![Cell::count(current[0]), Cell::count(current[1])];

            let is_current_month = bucket.date().year() == today.year()
                && bucket.date().month() == today.month();
            let projecting = x + 1 == months.len() && is_current_month;

            for (i, value) in current.iter().enumerate() {
                let cell = if x == 0 {
                    Cell::blank()
                } else if let (true, Some(p)) = (projecting, projection) {
                    let projected = if i == 0 {
                        (last_month_users as f64 * p.user_scale) as u64
                    } else {
                        value * p.month_len as u64 / p.days_elapsed.max(1) as u64
                    };
                    Cell::count(projected).with_class(CellClass::Gray)
                } else {
                    let previous = [months[x - 1].1.unique_impressions, months[x - 1].1.total_impressions];
                    Self::delta_cell(*value, previous[i])
                };
                cells.push(cell);
            }

            table.push(AggregatedRow::new(&bucket.label(), cells))?;
        }

        Ok(table)
    }

    /// Percentage change cell: `up`/`down` classed, placeholder when undefined
    pub fn delta_cell(current: u64, previous: u64) -> Cell {
        match percent_change(current, previous) {
            Some(change) => {
                let class = if change > 0.0 {
                    CellClass::Up
                } else {
                    CellClass::Down
                };
                Cell::percent(change).with_class(class)
            }
            None => Cell::missing(),
        }
    }
}
