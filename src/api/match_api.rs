// ==========================================
// footy-stats - match API
// ==========================================
// Admin screen pass-throughs for fixtures and results.
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::domain::entities::Match;
use crate::repository::{MatchRepository, TeamRepository};
use chrono::{NaiveDate, Utc};
use rusqlite::Connection;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

// ==========================================
// MatchApi
// ==========================================
pub struct MatchApi {
    matches: MatchRepository,
    teams: TeamRepository,
}

impl MatchApi {
    pub fn new(db_path: &str) -> ApiResult<Self> {
        Ok(Self {
            matches: MatchRepository::new(db_path)?,
            teams: TeamRepository::new(db_path)?,
        })
    }

    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self {
            matches: MatchRepository::from_connection(conn.clone()),
            teams: TeamRepository::from_connection(conn),
        }
    }

    /// Create a fixture; scores may be filled in later
    pub fn create_match(
        &self,
        match_date: NaiveDate,
        home_team_id: &str,
        away_team_id: &str,
        home_score: Option<i32>,
        away_score: Option<i32>,
    ) -> ApiResult<Match> {
        if home_team_id == away_team_id {
            return Err(ApiError::InvalidInput(
                "a team cannot play against itself".to_string(),
            ));
        }
        for team_id in [home_team_id, away_team_id] {
            if self.teams.find_by_id(team_id)?.is_none() {
                return Err(ApiError::NotFound(format!("team {team_id} not found")));
            }
        }
        if home_score.is_some() != away_score.is_some() {
            return Err(ApiError::InvalidInput(
                "either record both scores or neither".to_string(),
            ));
        }

        let now = Utc::now();
        let m = Match {
            id: Uuid::new_v4().to_string(),
            match_date,
            home_team_id: home_team_id.to_string(),
            away_team_id: away_team_id.to_string(),
            home_score,
            away_score,
            created_at: now,
            updated_at: now,
        };

        self.matches.create(&m)?;
        Ok(m)
    }

    pub fn get_match(&self, id: &str) -> ApiResult<Match> {
        self.matches
            .find_by_id(id)?
            .ok_or_else(|| ApiError::NotFound(format!("match {id} not found")))
    }

    /// Most recent fixtures; limit clamped to 1-100
    pub fn list_recent_matches(&self, limit: usize) -> ApiResult<Vec<Match>> {
        let limit = limit.clamp(1, 100);
        Ok(self.matches.list_recent(limit)?)
    }

    /// Record or correct a final score
    pub fn record_result(&self, id: &str, home_score: i32, away_score: i32) -> ApiResult<Match> {
        if home_score < 0 || away_score < 0 {
            return Err(ApiError::InvalidInput(
                "scores must not be negative".to_string(),
            ));
        }

        self.matches.update_score(id, home_score, away_score)?;
        self.get_match(id)
    }

    pub fn delete_match(&self, id: &str) -> ApiResult<()> {
        Ok(self.matches.delete(id)?)
    }
}
