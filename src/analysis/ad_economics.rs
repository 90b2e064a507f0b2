//! Advertising economics over the daily promotion series
//!
//! CTR, CPC and CPM per day, where a day's spend is the bids plus refunds the
//! ledger recorded for it. Every ratio is 0 on a zero denominator.

use crate::types::{BidHistoryPoint, Cents, ChartSeries, TimeBucket, TrafficSample};
use crate::utils::currency::cents_to_dollars;
use crate::utils::math::{mean, safe_ratio};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashMap;

const ECONOMICS_COLOUR: &str = "#336699";

/// Click-through rate in percent
pub fn ctr(clicks: u64, impressions: u64) -> f64 {
    safe_ratio(100.0 * clicks as f64, impressions as f64)
}

/// Cost per click in hundredths of the currency unit
pub fn cpc(spend: Cents, clicks: u64) -> f64 {
    safe_ratio(100.0 * cents_to_dollars(spend), clicks as f64)
}

/// Cost per thousand impressions in currency units
pub fn cpm(spend: Cents, impressions: u64) -> f64 {
    safe_ratio(1000.0 * cents_to_dollars(spend), impressions as f64)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EconomicsPoint {
    pub date: NaiveDate,
    pub impressions: u64,
    pub clicks: u64,
    pub spend_cents: Cents,
    pub ctr: f64,
    pub cpc: f64,
    pub cpm: f64,
}

/// Daily economics plus their means
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AdEconomics {
    pub points: Vec<EconomicsPoint>,
    pub mean_ctr: f64,
    pub mean_cpc: f64,
    pub mean_cpm: f64,
}

impl AdEconomics {
    /// Join the promos daily series with the bid ledger by date
    ///
    /// Promotion samples carry impressions in `total_impressions` and clicks
    /// in `total_clicks`. Ledger days without traffic are ignored.
    pub fn from_daily(
        promos: &[(TimeBucket, TrafficSample)],
        history: &[BidHistoryPoint],
    ) -> Self {
        let spend_by_day: HashMap<NaiveDate, Cents> = history
            .iter()
            .map(|p| (p.date, p.spend_cents()))
            .collect();

        let points: Vec<EconomicsPoint> = promos
            .iter()
            .map(|(bucket, sample)| {
                let date = bucket.date();
                let spend = spend_by_day.get(&date).copied().unwrap_or(0);
                let (impressions, clicks) = (sample.total_impressions, sample.total_clicks);
                EconomicsPoint {
                    date,
                    impressions,
                    clicks,
                    spend_cents: spend,
                    ctr: ctr(clicks, impressions),
                    cpc: cpc(spend, clicks),
                    cpm: cpm(spend, impressions),
                }
            })
            .collect();

        let column = |f: fn(&EconomicsPoint) -> f64| -> Vec<f64> { points.iter().map(f).collect() };
        let mean_ctr = mean(&column(|p| p.ctr));
        let mean_cpc = mean(&column(|p| p.cpc));
        let mean_cpm = mean(&column(|p| p.cpm));

        Self {
            points,
            mean_ctr,
            mean_cpc,
            mean_cpm,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// CPM values clipped at twice the mean
    pub fn capped_cpm(&self) -> Vec<f64> {
        Self::cap(self.points.iter().map(|p| p.cpm), self.mean_cpm)
    }

    /// CPC values clipped at twice the mean
    pub fn capped_cpc(&self) -> Vec<f64> {
        Self::cap(self.points.iter().map(|p| p.cpc), self.mean_cpc)
    }

    fn cap(values: impl Iterator<Item = f64>, mean: f64) -> Vec<f64> {
        values.map(|v| v.min(2.0 * mean)).collect()
    }

    /// CPM, CPC and CTR charts
    pub fn charts(&self) -> Vec<ChartSeries> {
        let x: Vec<String> = self
            .points
            .iter()
            .map(|p| p.date.format("%Y-%m-%d").to_string())
            .collect();

        vec![
            ChartSeries::new(
                &format!("cost per 1k impressions (${:.2} average)", self.mean_cpm),
                x.clone(),
            )
            .with_series("CPM ($)", ECONOMICS_COLOUR, self.capped_cpm()),
            ChartSeries::new(
                &format!("cost per click (${:.2} average)", self.mean_cpc / 100.0),
                x.clone(),
            )
            .with_series("CPC ($0.01)", ECONOMICS_COLOUR, self.capped_cpc()),
            ChartSeries::new("click through rate", x).with_series(
                "CTR (%)",
                ECONOMICS_COLOUR,
                self.points.iter().map(|p| p.ctr).collect(),
            ),
        ]
    }
}
