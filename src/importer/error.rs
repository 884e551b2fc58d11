// ==========================================
// footy-stats - import pipeline errors
// ==========================================
// Only structural and configuration problems surface here; row and
// batch problems are accumulated into the summary and never thrown.
// ==========================================

use thiserror::Error;

/// Fatal import pipeline error
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== structural parse errors =====
    #[error("header row is missing")]
    MissingHeader,

    #[error("row {row}: expected {expected} column(s), found {found}")]
    ColumnCountMismatch {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("CSV parse failed: {0}")]
    CsvParseError(String),

    // ===== configuration errors (pre-run) =====
    #[error("store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("configuration error: {0}")]
    ConfigurationError(String),

    // ===== generic =====
    #[error("internal error: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::CsvParseError(err.to_string())
    }
}

/// Result alias
pub type ImportResult<T> = Result<T, ImportError>;
