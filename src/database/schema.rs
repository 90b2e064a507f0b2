//! SQLite schema for the traffic and promotion store
//!
//! - `traffic_samples`: one row per (resolution, scope, key, bucket)
//! - `promoted_items`: item metadata, bid and lifecycle status
//! - `promotion_dates`: scheduled date ranges (one item may have several)
//! - `bid_ledger`: per-owner daily bids and refunds
//! - `communities`: known community names for leaderboard resolution

use crate::errors::AppResult;
use rusqlite::Connection;
use tracing::debug;

pub const SCHEMA_VERSION: i32 = 1;

/// Create all tables and indexes if they do not already exist
pub fn setup_schema(connection: &Connection) -> AppResult<()> {
    connection.execute_batch(
        r#"
        PRAGMA user_version = 1;

        -- Buckets are stored as 'YYYY-MM-DD HH:MM:SS' at the start of the bucket
        CREATE TABLE IF NOT EXISTS traffic_samples (
            resolution TEXT NOT NULL CHECK (resolution IN ('hour', 'day', 'month')),
            scope TEXT NOT NULL CHECK (scope IN ('total', 'promos', 'thing', 'community')),
            subject_key TEXT NOT NULL DEFAULT '',
            bucket TEXT NOT NULL,
            unique_impressions INTEGER NOT NULL DEFAULT 0,
            total_impressions INTEGER NOT NULL DEFAULT 0,
            unique_clicks INTEGER NOT NULL DEFAULT 0,
            total_clicks INTEGER NOT NULL DEFAULT 0,
            subscriptions INTEGER,
            PRIMARY KEY (resolution, scope, subject_key, bucket)
        );

        CREATE INDEX IF NOT EXISTS idx_traffic_scope_key
            ON traffic_samples(scope, subject_key);

        CREATE TABLE IF NOT EXISTS promoted_items (
            item_id TEXT PRIMARY KEY,
            owner_id TEXT NOT NULL,
            title TEXT NOT NULL DEFAULT '',
            bid_cents INTEGER NOT NULL DEFAULT 0,
            status TEXT NOT NULL,
            promoted INTEGER NOT NULL DEFAULT 1,
            created_at TEXT NOT NULL,
            promote_until TEXT NOT NULL,
            score INTEGER NOT NULL DEFAULT 0
        );

        -- No FK to promoted_items: stale schedule rows are tolerated and
        -- dropped at report time
        CREATE TABLE IF NOT EXISTS promotion_dates (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            item_id TEXT NOT NULL,
            start_date TEXT NOT NULL,
            end_date TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_promotion_dates_range
            ON promotion_dates(start_date, end_date);

        CREATE TABLE IF NOT EXISTS bid_ledger (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            owner_id TEXT NOT NULL,
            date TEXT NOT NULL,
            bid_cents INTEGER NOT NULL DEFAULT 0,
            refund_cents INTEGER NOT NULL DEFAULT 0
        );

        CREATE INDEX IF NOT EXISTS idx_bid_ledger_date ON bid_ledger(date);

        CREATE TABLE IF NOT EXISTS communities (
            name TEXT PRIMARY KEY
        );
        "#,
    )?;

    debug!("Schema version {} ready", SCHEMA_VERSION);
    Ok(())
}
