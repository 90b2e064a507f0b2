//! Store trait abstractions.
//!
//! The report core only consumes these read interfaces; [`super::Database`]
//! is the SQLite implementation. Empty results mean "no data", never an error.

use crate::errors::AppResult;
use crate::types::{
    BidHistoryPoint, PromotedItem, PromoterTotal, PromotionRecord, Resolution, SummaryKind,
    TimeBucket, TrafficSample, TrafficScope,
};
use chrono::{NaiveDate, NaiveDateTime};

/// Read access to traffic counters
pub trait TrafficStore {
    /// Ordered series for a scope, optionally bounded by `[start, stop]`
    fn fetch_series(
        &self,
        resolution: Resolution,
        scope: &TrafficScope,
        start: Option<NaiveDateTime>,
        stop: Option<NaiveDateTime>,
    ) -> AppResult<Vec<(TimeBucket, TrafficSample)>>;

    /// Unordered per-subject totals for leaderboard-style reports
    fn fetch_summary(&self, kind: SummaryKind) -> AppResult<Vec<(String, TrafficSample)>>;
}

/// Read access to promotion schedules and the bid ledger
pub trait PromotionStore {
    /// Promotion date ranges overlapping `[start, end)`
    fn promotions_in_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> AppResult<Vec<PromotionRecord>>;

    /// Look up an item; `None` when the record is stale
    fn promoted_item(&self, item_id: &str) -> AppResult<Option<PromotedItem>>;

    /// Daily bid/refund totals since `since`, ordered by date
    fn bid_history(&self, since: NaiveDate) -> AppResult<Vec<BidHistoryPoint>>;

    /// Owners ranked by money committed since `since`
    fn top_promoters(&self, since: NaiveDate, limit: usize) -> AppResult<Vec<PromoterTotal>>;

    /// Whether a community with this name exists
    fn community_exists(&self, name: &str) -> AppResult<bool>;
}

/// Write operations used by the CSV importer and test seeding
pub trait ImportOperations {
    fn insert_traffic_batch(
        &mut self,
        batch: &[(TrafficScope, TimeBucket, TrafficSample)],
    ) -> AppResult<usize>;

    fn upsert_promoted_items(&mut self, items: &[PromotedItem]) -> AppResult<usize>;

    fn insert_promotion_records(&mut self, records: &[PromotionRecord]) -> AppResult<usize>;

    fn insert_bid_history(&mut self, entries: &[(String, BidHistoryPoint)]) -> AppResult<usize>;

    fn insert_communities(&mut self, names: &[String]) -> AppResult<usize>;
}
