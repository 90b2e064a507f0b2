//! Promotion schedule types
//!
//! Money is carried as integer cents throughout so that daily bid splits and
//! market sums stay exact.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Amount of money in hundredths of the currency unit
pub type Cents = i64;

/// Lifecycle state of a promoted item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PromoteStatus {
    Unpaid,
    Unseen,
    Accepted,
    Rejected,
    Pending,
    Promoted,
    Finished,
}

impl PromoteStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PromoteStatus::Unpaid => "unpaid",
            PromoteStatus::Unseen => "unseen",
            PromoteStatus::Accepted => "accepted",
            PromoteStatus::Rejected => "rejected",
            PromoteStatus::Pending => "pending",
            PromoteStatus::Promoted => "promoted",
            PromoteStatus::Finished => "finished",
        }
    }

    /// Rejected and unpaid campaigns never occupy the market
    pub fn occupies_market(&self) -> bool {
        !matches!(self, PromoteStatus::Rejected | PromoteStatus::Unpaid)
    }
}

impl fmt::Display for PromoteStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PromoteStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "unpaid" => Ok(PromoteStatus::Unpaid),
            "unseen" => Ok(PromoteStatus::Unseen),
            "accepted" => Ok(PromoteStatus::Accepted),
            "rejected" => Ok(PromoteStatus::Rejected),
            "pending" => Ok(PromoteStatus::Pending),
            "promoted" => Ok(PromoteStatus::Promoted),
            "finished" => Ok(PromoteStatus::Finished),
            _ => Err(format!("Unknown promote status: {}", s)),
        }
    }
}

/// A promotable item as known to the store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromotedItem {
    pub item_id: String,
    pub owner_id: String,
    pub title: String,
    pub bid_cents: Cents,
    pub status: PromoteStatus,
    /// Whether the item is still flagged as a promotion at all
    pub promoted: bool,
    pub created_at: NaiveDateTime,
    pub promote_until: NaiveDateTime,
    /// Net votes (ups minus downs)
    pub score: i64,
}

impl PromotedItem {
    /// Whether the item should appear in the market and block layout
    pub fn is_schedulable(&self) -> bool {
        self.promoted && self.status.occupies_market()
    }
}

/// Raw row from the promotion date-range query, before item lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromotionRecord {
    pub item_id: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Explicit identity of whoever the report is built for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewer {
    pub viewer_id: String,
    pub is_sponsor: bool,
}

impl Viewer {
    pub fn new(viewer_id: &str, is_sponsor: bool) -> Self {
        Self {
            viewer_id: viewer_id.to_string(),
            is_sponsor,
        }
    }

    /// Sponsors see every campaign; everyone else sees their own
    pub fn can_see(&self, owner_id: &str) -> bool {
        self.is_sponsor || self.viewer_id == owner_id
    }
}

/// A scheduled item's active window with its bid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromotionInterval {
    pub item_id: String,
    pub start_date: NaiveDate,
    /// Exclusive
    pub end_date: NaiveDate,
    pub bid_cents: Cents,
    pub owner_id: String,
}

impl PromotionInterval {
    pub fn from_record(record: &PromotionRecord, item: &PromotedItem) -> Self {
        Self {
            item_id: record.item_id.clone(),
            start_date: record.start_date,
            end_date: record.end_date,
            bid_cents: item.bid_cents,
            owner_id: item.owner_id.clone(),
        }
    }

    /// Length in days, floored at one so a same-day campaign still divides
    pub fn duration_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days().max(1)
    }

    pub fn daily_bid(&self) -> Cents {
        self.bid_cents / self.duration_days()
    }
}

/// Report date range expressed as a start date plus a day count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportWindow {
    pub start_date: NaiveDate,
    pub size_days: i64,
}

impl ReportWindow {
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            start_date,
            size_days: (end_date - start_date).num_days().max(0),
        }
    }

    pub fn end_date(&self) -> NaiveDate {
        self.start_date + chrono::Duration::days(self.size_days)
    }

    /// Clip a date range to `[0, size)` offsets; `None` when nothing overlaps
    pub fn clip(&self, start: NaiveDate, end: NaiveDate) -> Option<(i64, i64)> {
        let starti = (start - self.start_date).num_days().max(0);
        let endi = (end - self.start_date).num_days().min(self.size_days);
        (endi > starti).then_some((starti, endi))
    }
}

/// Per-offset bid totals across the report window
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketOccupancy {
    /// Sum of daily bids of every campaign covering the offset
    pub market: BTreeMap<i64, Cents>,
    /// Same, restricted to campaigns the viewer may see
    pub my_market: BTreeMap<i64, Cents>,
    /// Number of campaigns covering the offset
    pub count: BTreeMap<i64, u32>,
}

impl MarketOccupancy {
    pub fn market_at(&self, offset: i64) -> Cents {
        self.market.get(&offset).copied().unwrap_or(0)
    }

    pub fn my_market_at(&self, offset: i64) -> Cents {
        self.my_market.get(&offset).copied().unwrap_or(0)
    }

    pub fn count_at(&self, offset: i64) -> u32 {
        self.count.get(&offset).copied().unwrap_or(0)
    }
}

/// A placed interval resolved to window offsets
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutBlock<T> {
    pub item: T,
    pub start: i64,
    /// Exclusive
    pub end: i64,
}

impl<T> LayoutBlock<T> {
    pub fn new(item: T, start: i64, end: i64) -> Self {
        Self { item, start, end }
    }

    pub fn duration(&self) -> i64 {
        self.end - self.start
    }
}

/// One day of the bid ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BidHistoryPoint {
    pub date: NaiveDate,
    pub bid_cents: Cents,
    pub refund_cents: Cents,
}

impl BidHistoryPoint {
    /// Money committed that day, refunds included
    pub fn spend_cents(&self) -> Cents {
        self.bid_cents + self.refund_cents
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromoterTotal {
    pub owner_id: String,
    pub total_cents: Cents,
    /// Ledger rows (owner-days) behind the total
    pub ledger_days: u32,
}
