//! Site-wide and community traffic report
//!
//! Fetches hour, day (and for the whole site, month) series. The first empty
//! resolution ends fetching and leaves the report without data. Weekday and
//! overall means come from the daily series; the site-wide report adds the
//! monthly summary and a leaderboard of communities by impressions.

use crate::analysis::traffic_stats::{DayOfWeekMeans, TrafficAggregator, MONTHLY_COLUMNS};
use crate::database::{PromotionStore, TrafficStore};
use crate::errors::AppResult;
use crate::types::{
    AggregatedRow, Cell, ChartSeries, Resolution, SummaryKind, Table, TimeBucket, TrafficSample,
    TrafficScope,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use tracing::debug;

pub const DAILY_COLUMNS: [&str; 4] = ["date", "uniques", "impressions", "subscriptions"];

/// Summary keys for listings that are not communities
pub const SPECIAL_LISTINGS: [&str; 4] = ["frontpage", "friends", "all", "sub"];

const UNIQUES_COLOUR: &str = "#FF4500";
const IMPRESSIONS_COLOUR: &str = "#336699";
const SUBSCRIPTIONS_COLOUR: &str = "#00FF00";
const SECONDARY_COLOUR: &str = "#B0B0B0";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SiteScope {
    Sitewide,
    /// A community, or a domain listing when `is_domain`
    Community { name: String, is_domain: bool },
}

impl SiteScope {
    fn traffic_scope(&self) -> TrafficScope {
        match self {
            SiteScope::Sitewide => TrafficScope::Total,
            SiteScope::Community { name, .. } => TrafficScope::Community(name.clone()),
        }
    }

    fn resolutions(&self) -> &'static [Resolution] {
        match self {
            SiteScope::Sitewide => &[Resolution::Hour, Resolution::Day, Resolution::Month],
            SiteScope::Community { .. } => &[Resolution::Hour, Resolution::Day],
        }
    }

    fn is_domain(&self) -> bool {
        matches!(self, SiteScope::Community { is_domain: true, .. })
    }

    pub fn label(&self) -> &str {
        match self {
            SiteScope::Sitewide => "sitewide",
            SiteScope::Community { name, .. } => name,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ResolutionTraffic {
    pub resolution: Resolution,
    pub rows: Vec<(TimeBucket, TrafficSample)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ListingKind {
    Special,
    Community,
    Domain,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeaderboardEntry {
    pub name: String,
    pub kind: ListingKind,
    pub traffic: TrafficSample,
}

#[derive(Debug, Clone, Serialize)]
pub struct SiteTrafficReport {
    pub scope: SiteScope,
    pub has_data: bool,
    pub series: Vec<ResolutionTraffic>,
    pub day_of_week: DayOfWeekMeans,
    pub uniques_mean: f64,
    pub impressions_mean: f64,
    /// Month-over-month summary, site-wide only
    pub monthly: Option<Table>,
    /// Communities by impressions, site-wide only
    pub leaderboard: Vec<LeaderboardEntry>,
}

pub struct SiteTrafficAnalyser;

impl SiteTrafficAnalyser {
    pub fn analyse<S>(store: &S, scope: SiteScope, today: NaiveDate) -> AppResult<SiteTrafficReport>
    where
        S: TrafficStore + PromotionStore + ?Sized,
    {
        let traffic_scope = scope.traffic_scope();
        let mut series = Vec::new();
        let mut has_data = true;

        for &resolution in scope.resolutions() {
            let rows = store.fetch_series(resolution, &traffic_scope, None, None)?;
            if rows.is_empty() {
                debug!("No {} traffic for {}", resolution, scope.label());
                has_data = false;
                break;
            }
            series.push(ResolutionTraffic { resolution, rows });
        }

        let mut report = SiteTrafficReport {
            scope,
            has_data,
            series,
            day_of_week: DayOfWeekMeans::default(),
            uniques_mean: 0.0,
            impressions_mean: 0.0,
            monthly: None,
            leaderboard: Vec::new(),
        };

        if has_data {
            let days = report.rows(Resolution::Day);
            let day_of_week = TrafficAggregator::day_of_week_means(days);
            let (uniques_mean, impressions_mean) = TrafficAggregator::overall_means(days);
            let monthly = if report.scope == SiteScope::Sitewide {
                Some(TrafficAggregator::monthly_summary(
                    report.rows(Resolution::Month),
                    days,
                    today,
                )?)
            } else {
                None
            };

            report.day_of_week = day_of_week;
            report.uniques_mean = uniques_mean;
            report.impressions_mean = impressions_mean;
            report.monthly = monthly;
        }

        if report.scope == SiteScope::Sitewide {
            report.leaderboard = Self::community_leaderboard(store)?;
        }

        Ok(report)
    }

    /// Community summaries by impressions, each key resolved to its listing kind
    pub fn community_leaderboard<S>(store: &S) -> AppResult<Vec<LeaderboardEntry>>
    where
        S: TrafficStore + PromotionStore + ?Sized,
    {
        let mut summary = store.fetch_summary(SummaryKind::Community)?;
        summary.sort_by(|a, b| {
            (Reverse(a.1.total_impressions), &a.0).cmp(&(Reverse(b.1.total_impressions), &b.0))
        });

        summary
            .into_iter()
            .map(|(name, traffic)| -> AppResult<LeaderboardEntry> {
                let kind = if SPECIAL_LISTINGS.contains(&name.as_str()) {
                    ListingKind::Special
                } else if store.community_exists(&name)? {
                    ListingKind::Community
                } else {
                    ListingKind::Domain
                };
                Ok(LeaderboardEntry {
                    name,
                    kind,
                    traffic,
                })
            })
            .collect()
    }
}

impl SiteTrafficReport {
    /// Rows fetched at `resolution`; empty when not fetched
    pub fn rows(&self, resolution: Resolution) -> &[(TimeBucket, TrafficSample)] {
        self.series
            .iter()
            .find(|s| s.resolution == resolution)
            .map(|s| s.rows.as_slice())
            .unwrap_or(&[])
    }

    /// Uniques and impressions per fetched resolution, plus daily subscriptions
    /// for communities
    pub fn charts(&self) -> Vec<ChartSeries> {
        let domain = self.scope.is_domain();
        let mut charts = Vec::new();

        for traffic in &self.series {
            let x: Vec<String> = traffic.rows.iter().map(|(b, _)| b.label()).collect();
            let column = |f: fn(&TrafficSample) -> u64| -> Vec<f64> {
                traffic.rows.iter().map(|(_, s)| f(s) as f64).collect()
            };
            let res = traffic.resolution.as_str();

            let mut uniques = ChartSeries::new(&format!("uniques by {}", res), x.clone())
                .with_series("uniques", UNIQUES_COLOUR, column(|s| s.unique_impressions));
            let mut impressions = ChartSeries::new(&format!("impressions by {}", res), x.clone())
                .with_series("impressions", IMPRESSIONS_COLOUR, column(|s| s.total_impressions));
            if domain {
                uniques = uniques.with_series(
                    "uniques (secondary)",
                    SECONDARY_COLOUR,
                    column(|s| s.unique_clicks),
                );
                impressions = impressions.with_series(
                    "impressions (secondary)",
                    SECONDARY_COLOUR,
                    column(|s| s.total_clicks),
                );
            }
            charts.push(uniques);
            charts.push(impressions);

            if traffic.resolution == Resolution::Day && self.scope != SiteScope::Sitewide {
                charts.push(
                    ChartSeries::new("subscriptions by day", x).with_series(
                        "subscriptions",
                        SUBSCRIPTIONS_COLOUR,
                        column(|s| s.subscriptions.unwrap_or(0)),
                    ),
                );
            }
        }

        charts
    }

    /// Monthly summary for the site, daily rows for a community
    pub fn table(&self) -> AppResult<Table> {
        if self.scope == SiteScope::Sitewide {
            return Ok(self
                .monthly
                .clone()
                .unwrap_or_else(|| Table::new(&MONTHLY_COLUMNS)));
        }

        let mut table = Table::new(&DAILY_COLUMNS);
        for (bucket, sample) in self.rows(Resolution::Day) {
            let subscriptions = sample.subscriptions.map(Cell::count).unwrap_or_else(Cell::blank);
            table.push(AggregatedRow::new(
                &bucket.label(),
                vec![
                    Cell::count(sample.unique_impressions),
                    Cell::count(sample.total_impressions),
                    subscriptions,
                ],
            ))?;
        }
        Ok(table)
    }

    pub fn to_csv(&self) -> AppResult<String> {
        self.table()?.to_csv(false)
    }
}
