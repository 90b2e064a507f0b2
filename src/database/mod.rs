//! SQLite-backed traffic and promotion store.
//!
//! The `Database` struct implements the read traits consumed by the report
//! core and the write trait used by the importer:
//! - `TrafficStore` - time series and cross-subject summaries
//! - `PromotionStore` - schedules, items, bid ledger, communities
//! - `ImportOperations` - batch inserts

pub mod helpers;
mod import;
mod promotions;
pub mod schema;
mod traffic;
pub mod traits;

pub use schema::setup_schema;
pub use traits::*;

use crate::errors::AppResult;
use rusqlite::Connection;
use tracing::info;

/// The main database interface; holds one SQLite connection
pub struct Database {
    connection: Connection,
}

impl Database {
    /// Open (or create) a database and initialise the schema
    pub fn new(database_path: &str) -> AppResult<Self> {
        let connection = Connection::open(database_path)?;
        setup_schema(&connection)?;

        info!("Database initialised at: {}", database_path);
        Ok(Self { connection })
    }

    /// Get a reference to the underlying connection
    pub fn connection(&self) -> &Connection {
        &self.connection
    }

    /// Execute a function within a database transaction
    pub fn execute_transaction<F, R>(&mut self, f: F) -> AppResult<R>
    where
        F: FnOnce(&rusqlite::Transaction) -> AppResult<R>,
    {
        let tx = self.connection.transaction()?;
        let result = f(&tx)?;
        tx.commit()?;
        Ok(result)
    }
}
