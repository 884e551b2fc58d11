// ==========================================
// footy-stats - application configuration
// ==========================================

use crate::domain::import::DEFAULT_BATCH_SIZE;
use thiserror::Error;

/// Environment variable holding the SQLite database path
pub const ENV_DATABASE_PATH: &str = "FOOTY_STATS_DB";

/// Environment variable overriding the default import batch size
pub const ENV_BATCH_SIZE: &str = "FOOTY_STATS_BATCH_SIZE";

/// Configuration error type
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("database path is not configured (set {ENV_DATABASE_PATH})")]
    MissingDatabasePath,

    #[error("invalid batch size '{value}' (must be a positive integer)")]
    InvalidBatchSize { value: String },
}

// ==========================================
// AppConfig
// ==========================================
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// SQLite database file path
    pub database_path: String,
    /// Default records-per-batch for imports
    pub batch_size: usize,
}

impl AppConfig {
    pub fn new(database_path: impl Into<String>) -> Self {
        Self {
            database_path: database_path.into(),
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }

    /// Resolve configuration from the environment
    ///
    /// # Returns
    /// - Ok(AppConfig): database path present, batch size valid
    /// - Err(ConfigError): surfaced before any processing starts
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_path = std::env::var(ENV_DATABASE_PATH)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::MissingDatabasePath)?;

        let batch_size = match std::env::var(ENV_BATCH_SIZE) {
            Err(_) => DEFAULT_BATCH_SIZE,
            Ok(raw) => raw
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|v| *v > 0)
                .ok_or(ConfigError::InvalidBatchSize { value: raw })?,
        };

        Ok(Self {
            database_path,
            batch_size,
        })
    }
}
