use super::{get_db_path_from_config, load_config};
use crate::database::Database;
use crate::errors::AppResult;
use clap::Args;
use std::path::PathBuf;
use tracing::info;

/// Create the SQLite store and its schema
#[derive(Args)]
pub struct InitDbCommand {
    /// Database path (overrides config.toml and env vars)
    #[arg(long)]
    database_path: Option<PathBuf>,
}

impl InitDbCommand {
    pub fn run(&self) -> AppResult<()> {
        let app_config = load_config();
        let db_path = get_db_path_from_config(&self.database_path, &app_config)?;

        if let Some(parent) = PathBuf::from(&db_path).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        Database::new(&db_path)?;
        info!("Schema ready at {}", db_path);
        println!("Database initialised: {}", db_path);
        Ok(())
    }
}
