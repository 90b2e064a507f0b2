//! Batch write operations.
//!
//! Each batch is one atomic transaction. Traffic rows replace an existing
//! row for the same (resolution, scope, key, bucket).

use crate::database::helpers::{format_date, format_timestamp};
use crate::database::traits::ImportOperations;
use crate::database::Database;
use crate::errors::AppResult;
use crate::types::{BidHistoryPoint, PromotedItem, PromotionRecord, TimeBucket, TrafficSample, TrafficScope};
use rusqlite::params;
use tracing::debug;

impl ImportOperations for Database {
    fn insert_traffic_batch(
        &mut self,
        batch: &[(TrafficScope, TimeBucket, TrafficSample)],
    ) -> AppResult<usize> {
        self.execute_transaction(|tx| {
            let mut stmt = tx.prepare_cached(
                r#"INSERT OR REPLACE INTO traffic_samples
                   (resolution, scope, subject_key, bucket, unique_impressions,
                    total_impressions, unique_clicks, total_clicks, subscriptions)
                   VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)"#,
            )?;

            for (scope, bucket, sample) in batch {
                let (scope_kind, subject_key) = scope.parts();
                stmt.execute(params![
                    bucket.resolution().as_str(),
                    scope_kind,
                    subject_key,
                    format_timestamp(bucket.start()),
                    sample.unique_impressions as i64,
                    sample.total_impressions as i64,
                    sample.unique_clicks as i64,
                    sample.total_clicks as i64,
                    sample.subscriptions.map(|s| s as i64),
                ])?;
            }

            debug!("Inserted {} traffic rows", batch.len());
            Ok(batch.len())
        })
    }

    fn upsert_promoted_items(&mut self, items: &[PromotedItem]) -> AppResult<usize> {
        self.execute_transaction(|tx| {
            let mut stmt = tx.prepare_cached(
                r#"INSERT OR REPLACE INTO promoted_items
                   (item_id, owner_id, title, bid_cents, status, promoted,
                    created_at, promote_until, score)
                   VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)"#,
            )?;

            for item in items {
                stmt.execute(params![
                    item.item_id,
                    item.owner_id,
                    item.title,
                    item.bid_cents,
                    item.status.as_str(),
                    item.promoted,
                    format_timestamp(item.created_at),
                    format_timestamp(item.promote_until),
                    item.score,
                ])?;
            }

            debug!("Upserted {} promoted items", items.len());
            Ok(items.len())
        })
    }

    fn insert_promotion_records(&mut self, records: &[PromotionRecord]) -> AppResult<usize> {
        self.execute_transaction(|tx| {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO promotion_dates (item_id, start_date, end_date) VALUES (?1, ?2, ?3)",
            )?;

            for record in records {
                stmt.execute(params![
                    record.item_id,
                    format_date(record.start_date),
                    format_date(record.end_date),
                ])?;
            }

            debug!("Inserted {} promotion date ranges", records.len());
            Ok(records.len())
        })
    }

    fn insert_bid_history(&mut self, entries: &[(String, BidHistoryPoint)]) -> AppResult<usize> {
        self.execute_transaction(|tx| {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO bid_ledger (owner_id, date, bid_cents, refund_cents) VALUES (?1, ?2, ?3, ?4)",
            )?;

            for (owner_id, point) in entries {
                stmt.execute(params![
                    owner_id,
                    format_date(point.date),
                    point.bid_cents,
                    point.refund_cents,
                ])?;
            }

            debug!("Inserted {} bid ledger entries", entries.len());
            Ok(entries.len())
        })
    }

    fn insert_communities(&mut self, names: &[String]) -> AppResult<usize> {
        self.execute_transaction(|tx| {
            let mut stmt = tx.prepare_cached("INSERT OR IGNORE INTO communities (name) VALUES (?1)")?;
            let mut inserted = 0;
            for name in names {
                inserted += stmt.execute(params![name])?;
            }
            Ok(inserted)
        })
    }
}
