//! Common Test Utilities
//!
//! Shared helpers for building on-disk test stores and fixture records.

#![allow(dead_code)]

pub mod csv_fixtures;

/// Database setup utilities
pub mod database {
    use promo_traffic::database::Database;
    use tempfile::TempDir;

    /// Test database in its own temporary directory, removed on drop
    pub struct TestDatabase {
        pub db: Database,
        path: String,
        _dir: TempDir,
    }

    impl TestDatabase {
        /// Create a new on-disk test database with the production schema
        pub fn new(test_name: &str) -> anyhow::Result<Self> {
            let dir = tempfile::tempdir()?;
            let path = dir
                .path()
                .join(format!("{}.db", test_name))
                .to_string_lossy()
                .to_string();
            let db = Database::new(&path)?;
            Ok(TestDatabase {
                db,
                path,
                _dir: dir,
            })
        }

        /// Get the database path
        pub fn path(&self) -> &str {
            &self.path
        }

        /// Get a reference to the inner database
        pub fn database(&self) -> &Database {
            &self.db
        }

        /// Get a mutable reference to the inner database
        pub fn database_mut(&mut self) -> &mut Database {
            &mut self.db
        }
    }
}

/// Test fixture utilities
pub mod fixtures {
    use chrono::{NaiveDate, NaiveDateTime};
    use promo_traffic::types::{PromoteStatus, PromotedItem, PromotionRecord};

    pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    pub fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        date(y, m, d).and_hms_opt(h, 0, 0).unwrap()
    }

    /// Accepted, still-promoted item
    pub fn item(
        id: &str,
        owner: &str,
        bid_cents: i64,
        created_at: NaiveDateTime,
        promote_until: NaiveDateTime,
    ) -> PromotedItem {
        PromotedItem {
            item_id: id.to_string(),
            owner_id: owner.to_string(),
            title: format!("title of {}", id),
            bid_cents,
            status: PromoteStatus::Accepted,
            promoted: true,
            created_at,
            promote_until,
            score: 1,
        }
    }

    pub fn promotion(id: &str, start: NaiveDate, end: NaiveDate) -> PromotionRecord {
        PromotionRecord {
            item_id: id.to_string(),
            start_date: start,
            end_date: end,
        }
    }
}
