use super::{get_db_path_from_config, load_config};
use crate::database::Database;
use crate::errors::AppResult;
use crate::processor::{CsvImporter, ImportKind, DEFAULT_BATCH_SIZE};
use clap::Args;
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;

/// Load a CSV export into the store
#[derive(Args)]
pub struct ImportCommand {
    /// What the file contains: traffic, items, promotions, bids or communities
    kind: ImportKind,

    /// Path to the CSV file
    csv_path: PathBuf,

    /// Database path (overrides config.toml and env vars)
    #[arg(long)]
    database_path: Option<PathBuf>,

    /// Rows per insert transaction
    #[arg(long, default_value_t = DEFAULT_BATCH_SIZE)]
    batch_size: usize,
}

impl ImportCommand {
    pub fn run(&self) -> AppResult<()> {
        let app_config = load_config();
        let db_path = get_db_path_from_config(&self.database_path, &app_config)?;

        let start = Instant::now();
        let database = Database::new(&db_path)?;
        let mut importer = CsvImporter::new(database, self.batch_size)?;
        let stats = importer.import_file(self.kind, &self.csv_path)?;

        info!("Import finished in {:.2}s", start.elapsed().as_secs_f64());
        println!(
            "Imported {} {} records ({} rows written) into {}",
            stats.records_read,
            self.kind.as_str(),
            stats.rows_written,
            db_path
        );
        Ok(())
    }
}
