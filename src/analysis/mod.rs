//! Report assembly for promotion and site traffic
//!
//! The analysis module is organised around the [`ReportAssembler`], which
//! builds three kinds of report from a store:
//!
//! - **Promoted item traffic** - hourly traffic over one item's promotion window
//! - **Site traffic** - site-wide or per-community traffic with weekday means,
//!   a projected monthly summary and a community leaderboard
//! - **Promotion schedule** - market occupancy, layout chains, recent item
//!   traffic, bid history and promotion economics
//!
//! Every report exposes chart series, a table and CSV, all derived from the
//! same rows. Formatting for display lives in [`reports`].
//!
//! ## Usage
//!
//! ```rust,no_run
//! use promo_traffic::analysis::{ReportAssembler, ReportKind};
//! use promo_traffic::config::ReportingConfig;
//! use promo_traffic::errors::AppResult;
//! use promo_traffic::types::Viewer;
//!
//! fn example() -> AppResult<()> {
//!     let assembler = ReportAssembler::open("./promo_traffic.db", ReportingConfig::default())?;
//!     let viewer = Viewer::new("alice", false);
//!     let now = chrono::Utc::now().naive_utc();
//!
//!     let report = assembler.build_report(&ReportKind::PromotionSchedule, &viewer, now)?;
//!     println!("{}", report.to_csv()?);
//!     Ok(())
//! }
//! ```

pub mod ad_economics;
pub mod block_packing;
pub mod market;
pub mod promote_schedule;
pub mod promoted_traffic;
pub mod reports;
pub mod site_traffic;
pub mod traffic_stats;

pub use ad_economics::AdEconomics;
pub use block_packing::ContiguousBlockPacker;
pub use market::IntervalAccumulator;
pub use promote_schedule::{PromoteScheduleAnalyser, PromoteScheduleReport};
pub use promoted_traffic::{PromotedTrafficAnalyser, PromotedTrafficReport};
pub use reports::{OutputFormat, ReportFormatter};
pub use site_traffic::{SiteScope, SiteTrafficAnalyser, SiteTrafficReport};
pub use traffic_stats::{DayOfWeekMeans, TrafficAggregator};

use crate::config::ReportingConfig;
use crate::database::{Database, PromotionStore, TrafficStore};
use crate::errors::AppResult;
use crate::types::{ChartSeries, Table, Viewer};
use chrono::NaiveDateTime;
use serde::Serialize;
use tracing::info;

/// Which report to build
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportKind {
    /// Traffic for one promoted item, by item id
    PromotedItem(String),
    Site(SiteScope),
    PromotionSchedule,
}

/// A fully materialised report
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Report {
    PromotedItem(PromotedTrafficReport),
    Site(SiteTrafficReport),
    PromotionSchedule(PromoteScheduleReport),
}

impl Report {
    pub fn charts(&self) -> Vec<ChartSeries> {
        match self {
            Report::PromotedItem(r) => r.charts(),
            Report::Site(r) => r.charts(),
            Report::PromotionSchedule(r) => r.charts(),
        }
    }

    pub fn table(&self) -> AppResult<Table> {
        match self {
            Report::PromotedItem(r) => r.table(),
            Report::Site(r) => r.table(),
            Report::PromotionSchedule(r) => r.table(),
        }
    }

    /// Table rows as CSV without a header, numbers unlocalized
    pub fn to_csv(&self) -> AppResult<String> {
        match self {
            Report::PromotedItem(r) => r.to_csv(),
            Report::Site(r) => r.to_csv(),
            Report::PromotionSchedule(r) => r.to_csv(),
        }
    }
}

/// Main entry point for building reports over a store
pub struct ReportAssembler<S> {
    store: S,
    settings: ReportingConfig,
}

impl ReportAssembler<Database> {
    /// Open the SQLite store at `database_path`
    pub fn open(database_path: &str, settings: ReportingConfig) -> AppResult<Self> {
        let database = Database::new(database_path)?;
        Ok(Self::new(database, settings))
    }
}

impl<S> ReportAssembler<S>
where
    S: TrafficStore + PromotionStore,
{
    pub fn new(store: S, settings: ReportingConfig) -> Self {
        Self { store, settings }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn settings(&self) -> &ReportingConfig {
        &self.settings
    }

    /// Build `kind` for `viewer` as of `now` (UTC)
    ///
    /// Missing data yields an empty report; only an unknown promoted item is
    /// an error.
    pub fn build_report(
        &self,
        kind: &ReportKind,
        viewer: &Viewer,
        now: NaiveDateTime,
    ) -> AppResult<Report> {
        info!("Building {:?} report for {}", kind, viewer.viewer_id);

        let report = match kind {
            ReportKind::PromotedItem(item_id) => Report::PromotedItem(
                PromotedTrafficAnalyser::analyse(&self.store, item_id, viewer, now, &self.settings)?,
            ),
            ReportKind::Site(scope) => Report::Site(SiteTrafficAnalyser::analyse(
                &self.store,
                scope.clone(),
                now.date(),
            )?),
            ReportKind::PromotionSchedule => Report::PromotionSchedule(
                PromoteScheduleAnalyser::analyse(&self.store, viewer, now, &self.settings)?,
            ),
        };

        Ok(report)
    }
}
