// ==========================================
// footy-stats - dashboard API
// ==========================================
// Aggregated queries shaped for chart rendering: sorted leader
// boards with share-of-total percentages and win impact with a
// delta against the league average. SQL aggregation lives in the
// repositories; this layer only sorts and computes.
// ==========================================

use crate::api::error::ApiResult;
use crate::repository::{
    MatchRepository, PlayerStatRepository, PlayerTotalsAgg, TeamResultAgg,
};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

fn pct(part: i64, total: i64) -> f64 {
    if total == 0 {
        0.0
    } else {
        round1(part as f64 * 100.0 / total as f64)
    }
}

// ==========================================
// Chart point DTOs
// ==========================================

/// One bar of a goals/assists leader board
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionPoint {
    pub player_name: String,
    pub team_name: String,
    pub value: i64,
    /// Share of the league-wide total, percent rounded to 0.1
    pub share_pct: f64,
}

/// One bar of the per-team win impact chart
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WinImpactPoint {
    pub team_name: String,
    pub played: i64,
    pub wins: i64,
    pub win_pct: f64,
    /// win_pct minus the league-average win percentage
    pub delta_pct: f64,
}

/// One bar of the clean sheet leader board
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CleanSheetPoint {
    pub player_name: String,
    pub team_name: String,
    pub clean_sheets: i64,
    pub appearances: i64,
    pub rate_pct: f64,
}

// ==========================================
// Shaping (pure, unit-testable)
// ==========================================

fn shape_contributions(
    totals: &[PlayerTotalsAgg],
    value_of: fn(&PlayerTotalsAgg) -> i64,
    limit: usize,
) -> Vec<ContributionPoint> {
    let league_total: i64 = totals.iter().map(value_of).sum();

    let mut points: Vec<ContributionPoint> = totals
        .iter()
        .filter(|t| value_of(t) > 0)
        .map(|t| ContributionPoint {
            player_name: t.player_name.clone(),
            team_name: t.team_name.clone(),
            value: value_of(t),
            share_pct: pct(value_of(t), league_total),
        })
        .collect();

    points.sort_by(|a, b| b.value.cmp(&a.value).then_with(|| a.player_name.cmp(&b.player_name)));
    points.truncate(limit);
    points
}

fn shape_win_impact(results: &[TeamResultAgg]) -> Vec<WinImpactPoint> {
    let total_played: i64 = results.iter().map(|r| r.played).sum();
    let total_wins: i64 = results.iter().map(|r| r.wins).sum();
    let league_avg = if total_played == 0 {
        0.0
    } else {
        total_wins as f64 * 100.0 / total_played as f64
    };

    let mut points: Vec<WinImpactPoint> = results
        .iter()
        .map(|r| {
            let win_pct = if r.played == 0 {
                0.0
            } else {
                r.wins as f64 * 100.0 / r.played as f64
            };
            WinImpactPoint {
                team_name: r.team_name.clone(),
                played: r.played,
                wins: r.wins,
                win_pct: round1(win_pct),
                delta_pct: round1(win_pct - league_avg),
            }
        })
        .collect();

    points.sort_by(|a, b| {
        b.win_pct
            .partial_cmp(&a.win_pct)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.team_name.cmp(&b.team_name))
    });
    points
}

fn shape_clean_sheets(totals: &[PlayerTotalsAgg], limit: usize) -> Vec<CleanSheetPoint> {
    let mut points: Vec<CleanSheetPoint> = totals
        .iter()
        .filter(|t| t.clean_sheets > 0)
        .map(|t| CleanSheetPoint {
            player_name: t.player_name.clone(),
            team_name: t.team_name.clone(),
            clean_sheets: t.clean_sheets,
            appearances: t.appearances,
            rate_pct: pct(t.clean_sheets, t.appearances),
        })
        .collect();

    points.sort_by(|a, b| {
        b.clean_sheets
            .cmp(&a.clean_sheets)
            .then_with(|| a.player_name.cmp(&b.player_name))
    });
    points.truncate(limit);
    points
}

// ==========================================
// DashboardApi
// ==========================================
pub struct DashboardApi {
    matches: MatchRepository,
    stats: PlayerStatRepository,
}

impl DashboardApi {
    pub fn new(db_path: &str) -> ApiResult<Self> {
        Ok(Self {
            matches: MatchRepository::new(db_path)?,
            stats: PlayerStatRepository::new(db_path)?,
        })
    }

    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self {
            matches: MatchRepository::from_connection(conn.clone()),
            stats: PlayerStatRepository::from_connection(conn),
        }
    }

    /// Goal leader board, highest first
    pub fn top_scorers(&self, limit: usize) -> ApiResult<Vec<ContributionPoint>> {
        let totals = self.stats.totals()?;
        Ok(shape_contributions(&totals, |t| t.goals, limit))
    }

    /// Assist leader board, highest first
    pub fn top_assists(&self, limit: usize) -> ApiResult<Vec<ContributionPoint>> {
        let totals = self.stats.totals()?;
        Ok(shape_contributions(&totals, |t| t.assists, limit))
    }

    /// Win percentage per team with delta against the league average
    pub fn win_impact(&self) -> ApiResult<Vec<WinImpactPoint>> {
        let results = self.matches.team_results()?;
        Ok(shape_win_impact(&results))
    }

    /// Clean sheet leader board, highest first
    pub fn clean_sheet_leaders(&self, limit: usize) -> ApiResult<Vec<CleanSheetPoint>> {
        let totals = self.stats.totals()?;
        Ok(shape_clean_sheets(&totals, limit))
    }
}
