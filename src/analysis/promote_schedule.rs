//! Promotion schedule report
//!
//! A window of days around today in promotion time. Promotion records whose
//! item is gone, no longer promoted, rejected or unpaid are dropped before
//! anything is accumulated. The viewer's own campaigns (every campaign for a
//! sponsor) are packed into layout chains.

use crate::analysis::ad_economics::AdEconomics;
use crate::analysis::block_packing::ContiguousBlockPacker;
use crate::analysis::market::IntervalAccumulator;
use crate::config::ReportingConfig;
use crate::database::{PromotionStore, TrafficStore};
use crate::errors::AppResult;
use crate::types::{
    AggregatedRow, BidHistoryPoint, Cell, ChartSeries, LayoutBlock, MarketOccupancy,
    PromotedItem, PromoterTotal, PromotionInterval, ReportWindow, Resolution, SummaryKind, Table,
    TimeBucket, TrafficSample, TrafficScope, Viewer,
};
use crate::utils::currency::cents_to_dollars;
use crate::utils::time::shift_hours;
use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::Serialize;
use std::collections::HashMap;
use tracing::{debug, info};

pub const RECENT_COLUMNS: [&str; 8] = [
    "date",
    "imp uniques",
    "imp total",
    "click uniques",
    "click total",
    "score",
    "bid",
    "title",
];

#[derive(Debug, Clone, Serialize)]
pub struct RecentTraffic {
    pub item: PromotedItem,
    pub traffic: TrafficSample,
}

#[derive(Debug, Clone, Serialize)]
pub struct PromoteScheduleReport {
    /// Today in promotion time
    pub today: NaiveDate,
    pub window: ReportWindow,
    /// Surviving campaigns, by start date
    pub promotions: Vec<PromotionInterval>,
    pub market: MarketOccupancy,
    /// Layout chains of item ids
    pub blocks: Vec<Vec<LayoutBlock<String>>>,
    pub recent: Vec<RecentTraffic>,
    pub bid_history: Vec<BidHistoryPoint>,
    pub total_sales_cents: i64,
    pub total_refunds_cents: i64,
    pub top_promoters: Vec<PromoterTotal>,
    pub promo_traffic: Vec<(TimeBucket, TrafficSample)>,
    pub economics: AdEconomics,
}

pub struct PromoteScheduleAnalyser;

impl PromoteScheduleAnalyser {
    pub fn analyse<S>(
        store: &S,
        viewer: &Viewer,
        now: NaiveDateTime,
        settings: &ReportingConfig,
    ) -> AppResult<PromoteScheduleReport>
    where
        S: TrafficStore + PromotionStore + ?Sized,
    {
        let promo_now = shift_hours(now, settings.timezone_offset_hours);
        let today = promo_now.date();
        let start = today - Duration::days(settings.schedule_days_before);
        let end = today + Duration::days(settings.schedule_days_after);
        let window = ReportWindow::new(start, end);

        let promotions = Self::scheduled_promotions(store, start, end)?;
        let market = IntervalAccumulator::accumulate(&promotions, &window, viewer);

        let blocks: Vec<LayoutBlock<String>> = promotions
            .iter()
            .filter(|p| viewer.can_see(&p.owner_id))
            .filter_map(|p| {
                window
                    .clip(p.start_date, p.end_date)
                    .map(|(s, e)| LayoutBlock::new(p.item_id.clone(), s, e))
            })
            .collect();
        let blocks = ContiguousBlockPacker::pack(blocks);

        let recent = Self::recent_traffic(store, &settings.item_key_prefix)?;

        let since = today - Duration::days(settings.bid_history_days);
        let bid_history = store.bid_history(since)?;
        let top_promoters = if bid_history.is_empty() {
            Vec::new()
        } else {
            store.top_promoters(since, settings.top_promoters_limit)?
        };
        let total_sales_cents = bid_history.iter().map(|p| p.bid_cents).sum();
        let total_refunds_cents = bid_history.iter().map(|p| p.refund_cents).sum();

        let promo_traffic = store.fetch_series(Resolution::Day, &TrafficScope::Promos, None, None)?;
        let economics = AdEconomics::from_daily(&promo_traffic, &bid_history);

        info!(
            "Schedule {} to {}: {} promotions in {} chains",
            start,
            end,
            promotions.len(),
            blocks.len()
        );

        Ok(PromoteScheduleReport {
            today,
            window,
            promotions,
            market,
            blocks,
            recent,
            bid_history,
            total_sales_cents,
            total_refunds_cents,
            top_promoters,
            promo_traffic,
            economics,
        })
    }

    /// Overlapping records resolved to intervals, unschedulable ones dropped
    fn scheduled_promotions<S>(
        store: &S,
        start: NaiveDate,
        end: NaiveDate,
    ) -> AppResult<Vec<PromotionInterval>>
    where
        S: PromotionStore + ?Sized,
    {
        let mut records = store.promotions_in_range(start, end)?;
        records.sort_by_key(|r| r.start_date);

        let mut items: HashMap<String, Option<PromotedItem>> = HashMap::new();
        let mut intervals = Vec::with_capacity(records.len());

        for record in &records {
            if !items.contains_key(&record.item_id) {
                let item = store.promoted_item(&record.item_id)?;
                items.insert(record.item_id.clone(), item);
            }
            match items.get(&record.item_id).and_then(Option::as_ref) {
                None => debug!("Dropping stale promotion record for {}", record.item_id),
                Some(item) if !item.is_schedulable() => {
                    debug!("Skipping {} promotion {}", item.status, record.item_id)
                }
                Some(item) => intervals.push(PromotionInterval::from_record(record, item)),
            }
        }

        Ok(intervals)
    }

    /// Item summaries joined to their items, oldest item first
    fn recent_traffic<S>(store: &S, prefix: &str) -> AppResult<Vec<RecentTraffic>>
    where
        S: TrafficStore + PromotionStore + ?Sized,
    {
        let mut recent = Vec::new();
        for (key, traffic) in store.fetch_summary(SummaryKind::Thing)? {
            if !key.starts_with(prefix) {
                continue;
            }
            match store.promoted_item(&key)? {
                Some(item) => recent.push(RecentTraffic { item, traffic }),
                None => debug!("No item for traffic summary {}", key),
            }
        }
        recent.sort_by(|a, b| {
            (a.item.created_at, &a.item.item_id).cmp(&(b.item.created_at, &b.item.item_id))
        });
        Ok(recent)
    }
}

impl PromoteScheduleReport {
    pub fn table(&self) -> AppResult<Table> {
        let mut table = Table::new(&RECENT_COLUMNS);
        for row in &self.recent {
            let t = &row.traffic;
            table.push(AggregatedRow::new(
                &row.item.created_at.format("%Y-%m-%d").to_string(),
                vec![
                    Cell::count(t.unique_impressions),
                    Cell::count(t.total_impressions),
                    Cell::count(t.unique_clicks),
                    Cell::count(t.total_clicks),
                    Cell::signed(row.item.score),
                    Cell::money(row.item.bid_cents),
                    Cell::text(&row.item.title),
                ],
            ))?;
        }
        Ok(table)
    }

    /// Stacked bids/refunds over the bid history window
    pub fn money_chart(&self) -> Option<ChartSeries> {
        if self.bid_history.is_empty() {
            return None;
        }
        let x = self
            .bid_history
            .iter()
            .map(|p| p.date.format("%Y-%m-%d").to_string())
            .collect();
        let title = format!(
            "monthly sales (${:.2} total, ${:.2} credits)",
            cents_to_dollars(self.total_sales_cents),
            cents_to_dollars(self.total_refunds_cents)
        );
        Some(
            ChartSeries::new(&title, x)
                .with_series(
                    "bids ($)",
                    "#008800",
                    self.bid_history.iter().map(|p| cents_to_dollars(p.bid_cents)).collect(),
                )
                .with_series(
                    "refunds ($)",
                    "#FF0000",
                    self.bid_history.iter().map(|p| cents_to_dollars(p.refund_cents)).collect(),
                )
                .stacked(),
        )
    }

    /// Money chart, then promotion impressions, clicks and economics
    pub fn charts(&self) -> Vec<ChartSeries> {
        let mut charts: Vec<ChartSeries> = self.money_chart().into_iter().collect();
        if self.promo_traffic.is_empty() {
            return charts;
        }

        let x: Vec<String> = self.promo_traffic.iter().map(|(b, _)| b.label()).collect();
        charts.push(ChartSeries::new("impressions", x.clone()).with_series(
            "total",
            "#336699",
            self.promo_traffic.iter().map(|(_, s)| s.total_impressions as f64).collect(),
        ));
        charts.push(ChartSeries::new("clicks", x).with_series(
            "total",
            "#336699",
            self.promo_traffic.iter().map(|(_, s)| s.total_clicks as f64).collect(),
        ));
        charts.extend(self.economics.charts());
        charts
    }

    pub fn to_csv(&self) -> AppResult<String> {
        self.table()?.to_csv(false)
    }
}
