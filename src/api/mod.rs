// ==========================================
// footy-stats - API layer
// ==========================================
// Thin orchestration over repositories and the import pipeline;
// the outer surface the admin UI calls.
// ==========================================

pub mod dashboard_api;
pub mod error;
pub mod import_api;
pub mod match_api;
pub mod player_api;
pub mod team_api;

pub use dashboard_api::{CleanSheetPoint, ContributionPoint, DashboardApi, WinImpactPoint};
pub use error::{ApiError, ApiResult};
pub use import_api::ImportApi;
pub use match_api::MatchApi;
pub use player_api::PlayerApi;
pub use team_api::TeamApi;
