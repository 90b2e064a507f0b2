use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

/// Application configuration loaded from config.toml or environment variables
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub reporting: ReportingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub default_path: PathBuf,
}

/// Knobs for report assembly
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportingConfig {
    /// Days of schedule shown before today
    pub schedule_days_before: i64,
    /// Days of schedule shown after today
    pub schedule_days_after: i64,
    /// Look-back window for the bid history and top promoters
    pub bid_history_days: i64,
    /// Promotion calendar offset from UTC; subtracted from wall-clock times
    pub timezone_offset_hours: i64,
    /// A promoted item's report stays preliminary this long after its window ends
    pub preliminary_grace_days: i64,
    /// Summary keys with this prefix refer to promotable items
    pub item_key_prefix: String,
    pub top_promoters_limit: usize,
}

impl Default for ReportingConfig {
    fn default() -> Self {
        Self {
            schedule_days_before: 7,
            schedule_days_after: 7,
            bid_history_days: 60,
            timezone_offset_hours: 0,
            preliminary_grace_days: 1,
            item_key_prefix: "t3_".to_string(),
            top_promoters_limit: 10,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database: DatabaseConfig {
                default_path: PathBuf::from("./promo_traffic.db"),
            },
            reporting: ReportingConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from config.toml file and environment variables
    /// Environment variables take precedence over file configuration
    pub fn load() -> Result<Self, ConfigError> {
        let defaults = AppConfig::default();
        let reporting = defaults.reporting;
        let config = Config::builder()
            .set_default(
                "database.default_path",
                defaults.database.default_path.to_string_lossy().to_string(),
            )?
            .set_default("reporting.schedule_days_before", reporting.schedule_days_before)?
            .set_default("reporting.schedule_days_after", reporting.schedule_days_after)?
            .set_default("reporting.bid_history_days", reporting.bid_history_days)?
            .set_default(
                "reporting.timezone_offset_hours",
                reporting.timezone_offset_hours,
            )?
            .set_default(
                "reporting.preliminary_grace_days",
                reporting.preliminary_grace_days,
            )?
            .set_default("reporting.item_key_prefix", reporting.item_key_prefix)?
            .set_default(
                "reporting.top_promoters_limit",
                reporting.top_promoters_limit as i64,
            )?
            // Load from config.toml if it exists
            .add_source(File::with_name("config").required(false))
            // PROMO_TRAFFIC__REPORTING__BID_HISTORY_DAYS=30 style overrides
            .add_source(
                Environment::with_prefix("PROMO_TRAFFIC")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let mut app_config: AppConfig = config.try_deserialize()?;

        if let Ok(db_path) = env::var("PROMO_TRAFFIC_DATABASE_PATH") {
            app_config.database.default_path = PathBuf::from(db_path);
        }

        if app_config.reporting.schedule_days_before < 0
            || app_config.reporting.schedule_days_after < 0
        {
            return Err(ConfigError::Message(
                "reporting.schedule_days_before/after must not be negative".to_string(),
            ));
        }

        Ok(app_config)
    }

    /// Get config for CLI argument defaults, falling back to built-in values
    pub fn get_defaults() -> Self {
        Self::load().unwrap_or_default()
    }
}
