// ==========================================
// footy-stats - match repository
// ==========================================
// CRUD over the matches table plus the per-team results
// aggregation the dashboard builds win-impact charts from.
// ==========================================

use crate::db::open_and_init;
use crate::domain::entities::Match;
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::sync::{Arc, Mutex, MutexGuard};

fn map_match(row: &Row<'_>) -> rusqlite::Result<Match> {
    Ok(Match {
        id: row.get(0)?,
        match_date: row.get(1)?,
        home_team_id: row.get(2)?,
        away_team_id: row.get(3)?,
        home_score: row.get(4)?,
        away_score: row.get(5)?,
        created_at: row.get(6)?,
        updated_at: row.get(7)?,
    })
}

const MATCH_COLUMNS: &str =
    "id, match_date, home_team_id, away_team_id, home_score, away_score, created_at, updated_at";

// ==========================================
// TeamResultAgg - per-team played/won/drawn/lost counts
// ==========================================
// Only matches with both scores recorded are counted.
#[derive(Debug, Clone)]
pub struct TeamResultAgg {
    pub team_id: String,
    pub team_name: String,
    pub played: i64,
    pub wins: i64,
    pub draws: i64,
    pub losses: i64,
}

// ==========================================
// MatchRepository
// ==========================================
pub struct MatchRepository {
    conn: Arc<Mutex<Connection>>,
}

impl MatchRepository {
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_and_init(db_path)
            .map_err(|e| RepositoryError::DatabaseConnectionError(e.to_string()))?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    pub fn create(&self, m: &Match) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO matches (id, match_date, home_team_id, away_team_id,
                                 home_score, away_score, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
            params![
                m.id,
                m.match_date,
                m.home_team_id,
                m.away_team_id,
                m.home_score,
                m.away_score,
                m.created_at,
                m.updated_at,
            ],
        )?;
        Ok(())
    }

    pub fn find_by_id(&self, id: &str) -> RepositoryResult<Option<Match>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {MATCH_COLUMNS} FROM matches WHERE id = ?1"
        ))?;
        Ok(stmt.query_row(params![id], map_match).optional()?)
    }

    /// Most recent matches first
    pub fn list_recent(&self, limit: usize) -> RepositoryResult<Vec<Match>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {MATCH_COLUMNS} FROM matches ORDER BY match_date DESC LIMIT ?1"
        ))?;
        let rows = stmt.query_map(params![limit as i64], map_match)?;

        let mut matches = Vec::new();
        for m in rows {
            matches.push(m?);
        }
        Ok(matches)
    }

    /// Record or correct a final score
    pub fn update_score(
        &self,
        id: &str,
        home_score: i32,
        away_score: i32,
    ) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let changed = conn.execute(
            r#"
            UPDATE matches
            SET home_score = ?2, away_score = ?3, updated_at = ?4
            WHERE id = ?1
            "#,
            params![id, home_score, away_score, Utc::now()],
        )?;

        if changed == 0 {
            return Err(RepositoryError::NotFound {
                entity: "Match".to_string(),
                id: id.to_string(),
            });
        }
        Ok(())
    }

    pub fn delete(&self, id: &str) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let changed = conn.execute("DELETE FROM matches WHERE id = ?1", params![id])?;

        if changed == 0 {
            return Err(RepositoryError::NotFound {
                entity: "Match".to_string(),
                id: id.to_string(),
            });
        }
        Ok(())
    }

    /// Played/won/drawn/lost per team over all completed matches
    pub fn team_results(&self) -> RepositoryResult<Vec<TeamResultAgg>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT t.id,
                   t.name,
                   COUNT(m.id) AS played,
                   SUM(CASE WHEN (m.home_team_id = t.id AND m.home_score > m.away_score)
                             OR (m.away_team_id = t.id AND m.away_score > m.home_score)
                            THEN 1 ELSE 0 END) AS wins,
                   SUM(CASE WHEN m.home_score = m.away_score THEN 1 ELSE 0 END) AS draws
            FROM teams t
            JOIN matches m
              ON (m.home_team_id = t.id OR m.away_team_id = t.id)
             AND m.home_score IS NOT NULL
             AND m.away_score IS NOT NULL
            GROUP BY t.id, t.name
            ORDER BY t.name
            "#,
        )?;

        let rows = stmt.query_map([], |row| {
            let played: i64 = row.get(2)?;
            let wins: i64 = row.get(3)?;
            let draws: i64 = row.get(4)?;
            Ok(TeamResultAgg {
                team_id: row.get(0)?,
                team_name: row.get(1)?,
                played,
                wins,
                draws,
                losses: played - wins - draws,
            })
        })?;

        let mut results = Vec::new();
        for agg in rows {
            results.push(agg?);
        }
        Ok(results)
    }
}
