use thiserror::Error;

/// Application-wide error type - single point of truth
#[derive(Error, Debug)]
pub enum AppError {
    /// Database operations
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// File I/O operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV import and export
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Configuration issues
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation/parsing
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// A referenced entity (promoted item, community) does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// A table row whose width disagrees with the declared column schema
    #[error("Row '{label}' has {actual} cells, table schema expects {expected}")]
    SchemaMismatch {
        label: String,
        expected: usize,
        actual: usize,
    },

    /// Invalid import record
    #[error("Invalid import record at line {line}: {reason}")]
    InvalidRecord { line: usize, reason: String },
}

/// Application-wide result type - single point of truth
pub type AppResult<T> = Result<T, AppError>;

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::InvalidData(format!("JSON error: {}", err))
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Config(err.to_string())
    }
}

impl From<chrono::ParseError> for AppError {
    fn from(err: chrono::ParseError) -> Self {
        AppError::InvalidData(format!("Date parse error: {}", err))
    }
}
