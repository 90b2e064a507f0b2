//! Bulk loading of CSV exports into the store

pub mod csv_importer;

pub use csv_importer::{CsvImporter, ImportKind, ImportStats, DEFAULT_BATCH_SIZE};
