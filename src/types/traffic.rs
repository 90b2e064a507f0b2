//! Time-series traffic types
//!
//! Buckets, samples and the scopes they are fetched under. Samples are
//! produced by the store and only ever summed, never mutated in place.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::Add;
use std::str::FromStr;

/// Granularity of a traffic series
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Resolution {
    Hour,
    Day,
    Month,
}

impl Resolution {
    /// Storage/CLI token
    pub fn as_str(&self) -> &'static str {
        match self {
            Resolution::Hour => "hour",
            Resolution::Day => "day",
            Resolution::Month => "month",
        }
    }

    /// Truncate a timestamp to the start of its bucket at this resolution
    pub fn truncate(&self, at: NaiveDateTime) -> NaiveDateTime {
        match self {
            Resolution::Hour => at.date().and_time(
                NaiveTime::from_hms_opt(at.hour(), 0, 0).unwrap_or(NaiveTime::MIN),
            ),
            Resolution::Day => at.date().and_time(NaiveTime::MIN),
            Resolution::Month => at
                .date()
                .with_day(1)
                .unwrap_or(at.date())
                .and_time(NaiveTime::MIN),
        }
    }

    fn label_format(&self) -> &'static str {
        match self {
            Resolution::Hour => "%Y-%m-%d %H:%M",
            Resolution::Day => "%Y-%m-%d",
            Resolution::Month => "%Y-%m",
        }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Resolution {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hour" => Ok(Resolution::Hour),
            "day" => Ok(Resolution::Day),
            "month" => Ok(Resolution::Month),
            _ => Err(format!("Unknown resolution: {}", s)),
        }
    }
}

/// A discrete point in a fixed-resolution time series
///
/// Constructed through [`TimeBucket::new`], which truncates, so two buckets
/// compare equal whenever their truncated timestamps match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TimeBucket {
    start: NaiveDateTime,
    resolution: Resolution,
}

impl TimeBucket {
    pub fn new(resolution: Resolution, at: NaiveDateTime) -> Self {
        Self {
            start: resolution.truncate(at),
            resolution,
        }
    }

    pub fn day(date: NaiveDate) -> Self {
        Self::new(Resolution::Day, date.and_time(NaiveTime::MIN))
    }

    pub fn month(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1)
            .map(|d| Self::new(Resolution::Month, d.and_time(NaiveTime::MIN)))
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub fn date(&self) -> NaiveDate {
        self.start.date()
    }

    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    /// Display label used for chart x-values and table rows
    pub fn label(&self) -> String {
        self.start
            .format(self.resolution.label_format())
            .to_string()
    }
}

/// Immutable traffic counters attached to one bucket
///
/// For promoted items the fields carry impressions and clicks. Site traffic
/// reuses the layout as (uniques, pageviews, secondary uniques, secondary
/// pageviews, subscriptions), where the secondary pair is only filled for
/// domain listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrafficSample {
    pub unique_impressions: u64,
    pub total_impressions: u64,
    pub unique_clicks: u64,
    pub total_clicks: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscriptions: Option<u64>,
}

impl TrafficSample {
    pub fn new(
        unique_impressions: u64,
        total_impressions: u64,
        unique_clicks: u64,
        total_clicks: u64,
    ) -> Self {
        Self {
            unique_impressions,
            total_impressions,
            unique_clicks,
            total_clicks,
            subscriptions: None,
        }
    }

    pub fn with_subscriptions(mut self, subscriptions: u64) -> Self {
        self.subscriptions = Some(subscriptions);
        self
    }
}

impl Add for TrafficSample {
    type Output = TrafficSample;

    fn add(self, other: TrafficSample) -> TrafficSample {
        let subscriptions = match (self.subscriptions, other.subscriptions) {
            (None, None) => None,
            (a, b) => Some(a.unwrap_or(0) + b.unwrap_or(0)),
        };
        TrafficSample {
            unique_impressions: self.unique_impressions + other.unique_impressions,
            total_impressions: self.total_impressions + other.total_impressions,
            unique_clicks: self.unique_clicks + other.unique_clicks,
            total_clicks: self.total_clicks + other.total_clicks,
            subscriptions,
        }
    }
}

impl Sum for TrafficSample {
    fn sum<I: Iterator<Item = TrafficSample>>(iter: I) -> Self {
        iter.fold(TrafficSample::default(), |acc, s| acc + s)
    }
}

/// Ordered series as returned by the store
pub type TrafficSeries = Vec<(TimeBucket, TrafficSample)>;

/// What a series is keyed on
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrafficScope {
    /// Site-wide totals
    Total,
    /// All promoted items combined
    Promos,
    /// A single item by its key
    Thing(String),
    /// A community (or domain listing) by name
    Community(String),
}

impl TrafficScope {
    /// (scope kind, subject key) as persisted
    pub fn parts(&self) -> (&'static str, &str) {
        match self {
            TrafficScope::Total => ("total", ""),
            TrafficScope::Promos => ("promos", ""),
            TrafficScope::Thing(key) => ("thing", key),
            TrafficScope::Community(name) => ("community", name),
        }
    }

    pub fn from_parts(kind: &str, key: &str) -> Result<Self, String> {
        match kind {
            "total" => Ok(TrafficScope::Total),
            "promos" => Ok(TrafficScope::Promos),
            "thing" => Ok(TrafficScope::Thing(key.to_string())),
            "community" => Ok(TrafficScope::Community(key.to_string())),
            _ => Err(format!("Unknown traffic scope: {}", kind)),
        }
    }
}

/// Subject kinds available as cross-subject summaries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SummaryKind {
    Thing,
    Community,
}

impl SummaryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SummaryKind::Thing => "thing",
            SummaryKind::Community => "community",
        }
    }
}

/// Sum every sample of a series field-wise
pub fn total_of(series: &[(TimeBucket, TrafficSample)]) -> TrafficSample {
    series.iter().map(|(_, s)| *s).sum()
}
