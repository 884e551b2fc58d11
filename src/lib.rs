// ==========================================
// footy-stats - core library
// ==========================================
// Admin backend for football statistics:
// CSV bulk import, entity CRUD, dashboard aggregation
// ==========================================

// ==========================================
// Module declarations
// ==========================================

// Domain layer - entities and types
pub mod domain;

// Repository layer - data access
pub mod repository;

// Import layer - CSV pipeline
pub mod importer;

// Configuration layer
pub mod config;

// Database infrastructure (connection init / PRAGMA / schema)
pub mod db;

// Logging
pub mod logging;

// CSV header templates (read-only assets)
pub mod templates;

// API layer - business interfaces
pub mod api;

// ==========================================
// Re-exports of core types
// ==========================================

// Domain types
pub use domain::types::{Position, TeamType};

// Domain entities
pub use domain::{Match, Player, PlayerStat, Team};

// Import data model
pub use domain::import::{
    ImportKind, ImportOptions, ImportSummary, ProcessedRecord, RawRecord, RowIssue,
};

// Import pipeline
pub use importer::{ImportError, ImportOrchestrator};

// Store seam
pub use repository::store::ImportStore;

// API
pub use api::{DashboardApi, ImportApi, MatchApi, PlayerApi, TeamApi};

// ==========================================
// Crate constants
// ==========================================

// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Application name
pub const APP_NAME: &str = "Footy Stats";
