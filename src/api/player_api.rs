// ==========================================
// footy-stats - player API
// ==========================================
// Admin screen pass-throughs for players and their per-matchday
// stat lines.
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::domain::entities::{Player, PlayerStat};
use crate::domain::types::Position;
use crate::repository::{PlayerRepository, PlayerStatRepository, TeamRepository};
use chrono::{NaiveDate, Utc};
use rusqlite::Connection;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

// ==========================================
// PlayerApi
// ==========================================
pub struct PlayerApi {
    players: PlayerRepository,
    stats: PlayerStatRepository,
    teams: TeamRepository,
}

impl PlayerApi {
    pub fn new(db_path: &str) -> ApiResult<Self> {
        Ok(Self {
            players: PlayerRepository::new(db_path)?,
            stats: PlayerStatRepository::new(db_path)?,
            teams: TeamRepository::new(db_path)?,
        })
    }

    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self {
            players: PlayerRepository::from_connection(conn.clone()),
            stats: PlayerStatRepository::from_connection(conn.clone()),
            teams: TeamRepository::from_connection(conn),
        }
    }

    /// Create a player in an existing team
    pub fn create_player(
        &self,
        name: &str,
        team_id: &str,
        position: Option<&str>,
        jersey_number: Option<i32>,
    ) -> ApiResult<Player> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ApiError::InvalidInput(
                "player name must not be empty".to_string(),
            ));
        }

        let position = match position {
            None => None,
            Some(p) => Some(Position::parse(p).ok_or_else(|| {
                ApiError::InvalidInput(format!(
                    "invalid position '{p}' (expected one of: GK, DF, MF, FW)"
                ))
            })?),
        };

        if self.teams.find_by_id(team_id)?.is_none() {
            return Err(ApiError::NotFound(format!("team {team_id} not found")));
        }

        let now = Utc::now();
        let player = Player {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            team_id: team_id.to_string(),
            position,
            jersey_number,
            created_at: now,
            updated_at: now,
        };

        self.players.create(&player)?;
        Ok(player)
    }

    pub fn list_players(&self) -> ApiResult<Vec<Player>> {
        Ok(self.players.list_all()?)
    }

    pub fn list_players_by_team(&self, team_id: &str) -> ApiResult<Vec<Player>> {
        Ok(self.players.list_by_team(team_id)?)
    }

    pub fn get_player(&self, id: &str) -> ApiResult<Player> {
        self.players
            .find_by_id(id)?
            .ok_or_else(|| ApiError::NotFound(format!("player {id} not found")))
    }

    pub fn delete_player(&self, id: &str) -> ApiResult<()> {
        Ok(self.players.delete(id)?)
    }

    /// Record one player's line for a matchday
    ///
    /// # Returns
    /// - Err(ApiError::InvalidInput): negative counters
    /// - Err(ApiError::NotFound): unknown player
    pub fn record_stat_line(
        &self,
        player_id: &str,
        match_date: NaiveDate,
        goals: i32,
        assists: i32,
        minutes_played: Option<i32>,
        clean_sheet: bool,
    ) -> ApiResult<PlayerStat> {
        if goals < 0 || assists < 0 || minutes_played.is_some_and(|m| m < 0) {
            return Err(ApiError::InvalidInput(
                "stat counters must not be negative".to_string(),
            ));
        }

        // surface a clean not-found instead of a foreign key failure
        self.get_player(player_id)?;

        let now = Utc::now();
        let stat = PlayerStat {
            id: Uuid::new_v4().to_string(),
            player_id: player_id.to_string(),
            match_date,
            goals,
            assists,
            minutes_played,
            clean_sheet,
            created_at: now,
            updated_at: now,
        };

        self.stats.create(&stat)?;
        Ok(stat)
    }

    pub fn list_stat_lines(&self, player_id: &str) -> ApiResult<Vec<PlayerStat>> {
        Ok(self.stats.list_by_player(player_id)?)
    }
}
