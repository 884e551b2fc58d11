// ==========================================
// footy-stats - player stat repository
// ==========================================
// CRUD over per-matchday stat lines plus the career totals
// aggregation behind the scorer/assist/clean-sheet charts.
// ==========================================

use crate::db::open_and_init;
use crate::domain::entities::PlayerStat;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, Row};
use std::sync::{Arc, Mutex, MutexGuard};

fn map_stat(row: &Row<'_>) -> rusqlite::Result<PlayerStat> {
    Ok(PlayerStat {
        id: row.get(0)?,
        player_id: row.get(1)?,
        match_date: row.get(2)?,
        goals: row.get(3)?,
        assists: row.get(4)?,
        minutes_played: row.get(5)?,
        clean_sheet: row.get::<_, i64>(6)? != 0,
        created_at: row.get(7)?,
        updated_at: row.get(8)?,
    })
}

const STAT_COLUMNS: &str = "id, player_id, match_date, goals, assists, minutes_played, \
                            clean_sheet, created_at, updated_at";

// ==========================================
// PlayerTotalsAgg - per-player career counters
// ==========================================
#[derive(Debug, Clone)]
pub struct PlayerTotalsAgg {
    pub player_id: String,
    pub player_name: String,
    pub team_name: String,
    pub appearances: i64,
    pub goals: i64,
    pub assists: i64,
    pub clean_sheets: i64,
}

// ==========================================
// PlayerStatRepository
// ==========================================
pub struct PlayerStatRepository {
    conn: Arc<Mutex<Connection>>,
}

impl PlayerStatRepository {
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

    pub fn create(&self, stat: &PlayerStat) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO player_stats (id, player_id, match_date, goals, assists,
                                      minutes_played, clean_sheet, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
            params![
                stat.id,
                stat.player_id,
                stat.match_date,
                stat.goals,
                stat.assists,
                stat.minutes_played,
                stat.clean_sheet as i64,
                stat.created_at,
                stat.updated_at,
            ],
        )?;
        Ok(())
    }

    pub fn list_by_player(&self, player_id: &str) -> RepositoryResult<Vec<PlayerStat>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {STAT_COLUMNS} FROM player_stats WHERE player_id = ?1 ORDER BY match_date"
        ))?;
        let rows = stmt.query_map(params![player_id], map_stat)?;

        let mut stats = Vec::new();
        for stat in rows {
            stats.push(stat?);
        }
        Ok(stats)
    }

    pub fn delete(&self, id: &str) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let changed = conn.execute("DELETE FROM player_stats WHERE id = ?1", params![id])?;

        if changed == 0 {
            return Err(RepositoryError::NotFound {
                entity: "PlayerStat".to_string(),
                id: id.to_string(),
            });
        }
        Ok(())
    }

    /// Career counters per player, including players with no stat lines
    pub fn totals(&self) -> RepositoryResult<Vec<PlayerTotalsAgg>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT p.id,
                   p.name,
                   t.name,
                   COUNT(s.id) AS appearances,
                   COALESCE(SUM(s.goals), 0) AS goals,
                   COALESCE(SUM(s.assists), 0) AS assists,
                   COALESCE(SUM(s.clean_sheet), 0) AS clean_sheets
            FROM players p
            JOIN teams t ON t.id = p.team_id
            LEFT JOIN player_stats s ON s.player_id = p.id
            GROUP BY p.id, p.name, t.name
            ORDER BY p.name
            "#,
        )?;

        let rows = stmt.query_map([], |row| {
            Ok(PlayerTotalsAgg {
                player_id: row.get(0)?,
                player_name: row.get(1)?,
                team_name: row.get(2)?,
                appearances: row.get(3)?,
                goals: row.get(4)?,
                assists: row.get(5)?,
                clean_sheets: row.get(6)?,
            })
        })?;

        let mut totals = Vec::new();
        for agg in rows {
            totals.push(agg?);
        }
        Ok(totals)
    }
}
