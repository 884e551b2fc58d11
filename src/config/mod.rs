// ==========================================
// footy-stats - configuration layer
// ==========================================
// Resolved once at startup from the environment; a bad configuration
// is rejected before any row processing begins.
// ==========================================

pub mod app_config;

pub use app_config::{AppConfig, ConfigError, ENV_BATCH_SIZE, ENV_DATABASE_PATH};
