// ==========================================
// footy-stats - team repository
// ==========================================
// CRUD over the teams table; no business logic here.
// ==========================================

use crate::db::open_and_init;
use crate::domain::entities::Team;
use crate::domain::types::TeamType;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::sync::{Arc, Mutex, MutexGuard};

fn parse_team_type(raw: &str) -> TeamType {
    // Values written by this crate always parse; anything else in an
    // externally edited database degrades to Club.
    TeamType::parse(raw.trim().trim_matches('"')).unwrap_or(TeamType::Club)
}

fn map_team(row: &Row<'_>) -> rusqlite::Result<Team> {
    Ok(Team {
        id: row.get(0)?,
        name: row.get(1)?,
        team_type: parse_team_type(&row.get::<_, String>(2)?),
        city: row.get(3)?,
        founded_year: row.get(4)?,
        created_at: row.get(5)?,
        updated_at: row.get(6)?,
    })
}

const TEAM_COLUMNS: &str = "id, name, team_type, city, founded_year, created_at, updated_at";

// ==========================================
// TeamRepository
// ==========================================
pub struct TeamRepository {
    conn: Arc<Mutex<Connection>>,
}

impl TeamRepository {
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

    pub fn create(&self, team: &Team) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO teams (id, name, team_type, city, founded_year, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
            params![
                team.id,
                team.name,
                team.team_type.as_db_str(),
                team.city,
                team.founded_year,
                team.created_at,
                team.updated_at,
            ],
        )?;
        Ok(())
    }

    pub fn find_by_id(&self, id: &str) -> RepositoryResult<Option<Team>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {TEAM_COLUMNS} FROM teams WHERE id = ?1"
        ))?;
        Ok(stmt.query_row(params![id], map_team).optional()?)
    }

    pub fn list_all(&self) -> RepositoryResult<Vec<Team>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {TEAM_COLUMNS} FROM teams ORDER BY name"
        ))?;
        let rows = stmt.query_map([], map_team)?;

        let mut teams = Vec::new();
        for team in rows {
            teams.push(team?);
        }
        Ok(teams)
    }

    pub fn update(&self, team: &Team) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let changed = conn.execute(
            r#"
            UPDATE teams
            SET name = ?2, team_type = ?3, city = ?4, founded_year = ?5, updated_at = ?6
            WHERE id = ?1
            "#,
            params![
                team.id,
                team.name,
                team.team_type.as_db_str(),
                team.city,
                team.founded_year,
                team.updated_at,
            ],
        )?;

        if changed == 0 {
            return Err(RepositoryError::NotFound {
                entity: "Team".to_string(),
                id: team.id.clone(),
            });
        }
        Ok(())
    }

    pub fn delete(&self, id: &str) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let changed = conn.execute("DELETE FROM teams WHERE id = ?1", params![id])?;

        if changed == 0 {
            return Err(RepositoryError::NotFound {
                entity: "Team".to_string(),
                id: id.to_string(),
            });
        }
        Ok(())
    }
}
