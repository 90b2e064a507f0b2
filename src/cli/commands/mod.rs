pub mod import;
pub mod init;
pub mod report;

use crate::config::AppConfig;
use crate::errors::{AppError, AppResult};
use std::path::{Path, PathBuf};
use tracing::warn;

/// Load configuration, falling back to built-in defaults when it is unusable
pub(crate) fn load_config() -> AppConfig {
    match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            warn!("Failed to load configuration, using defaults: {}", e);
            AppConfig::default()
        }
    }
}

/// Get database path from CLI argument or config file
pub(crate) fn get_db_path_from_config(
    cli_path: &Option<PathBuf>,
    app_config: &AppConfig,
) -> AppResult<String> {
    let path = cli_path
        .clone()
        .unwrap_or_else(|| app_config.database.default_path.clone());
    if path.as_os_str().is_empty() {
        return Err(AppError::Config(
            "No database path provided. Use --database-path or configure database.default_path in config.toml".to_string(),
        ));
    }
    Ok(path.to_string_lossy().to_string())
}

/// Write output to file with safe directory creation
pub(crate) fn write_output_to_file(path: &Path, content: &str, description: &str) -> AppResult<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)?;
    println!("{} written to: {}", description, path.display());
    Ok(())
}
