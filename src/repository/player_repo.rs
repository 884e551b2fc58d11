// ==========================================
// footy-stats - player repository
// ==========================================
// CRUD over the players table; no business logic here.
// ==========================================

use crate::db::open_and_init;
use crate::domain::entities::Player;
use crate::domain::types::Position;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::sync::{Arc, Mutex, MutexGuard};

fn map_player(row: &Row<'_>) -> rusqlite::Result<Player> {
    Ok(Player {
        id: row.get(0)?,
        name: row.get(1)?,
        team_id: row.get(2)?,
        position: row
            .get::<_, Option<String>>(3)?
            .as_deref()
            .and_then(Position::parse),
        jersey_number: row.get(4)?,
        created_at: row.get(5)?,
        updated_at: row.get(6)?,
    })
}

const PLAYER_COLUMNS: &str = "id, name, team_id, position, jersey_number, created_at, updated_at";

// ==========================================
// PlayerRepository
// ==========================================
pub struct PlayerRepository {
    conn: Arc<Mutex<Connection>>,
}

impl PlayerRepository {
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

    pub fn create(&self, player: &Player) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO players (id, name, team_id, position, jersey_number, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
            params![
                player.id,
                player.name,
                player.team_id,
                player.position.map(|p| p.as_db_str()),
                player.jersey_number,
                player.created_at,
                player.updated_at,
            ],
        )?;
        Ok(())
    }

    pub fn find_by_id(&self, id: &str) -> RepositoryResult<Option<Player>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {PLAYER_COLUMNS} FROM players WHERE id = ?1"
        ))?;
        Ok(stmt.query_row(params![id], map_player).optional()?)
    }

    pub fn list_all(&self) -> RepositoryResult<Vec<Player>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {PLAYER_COLUMNS} FROM players ORDER BY name"
        ))?;
        let rows = stmt.query_map([], map_player)?;

        let mut players = Vec::new();
        for player in rows {
            players.push(player?);
        }
        Ok(players)
    }

    pub fn list_by_team(&self, team_id: &str) -> RepositoryResult<Vec<Player>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {PLAYER_COLUMNS} FROM players WHERE team_id = ?1 ORDER BY jersey_number, name"
        ))?;
        let rows = stmt.query_map(params![team_id], map_player)?;

        let mut players = Vec::new();
        for player in rows {
            players.push(player?);
        }
        Ok(players)
    }

    pub fn update(&self, player: &Player) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let changed = conn.execute(
            r#"
            UPDATE players
            SET name = ?2, team_id = ?3, position = ?4, jersey_number = ?5, updated_at = ?6
            WHERE id = ?1
            "#,
            params![
                player.id,
                player.name,
                player.team_id,
                player.position.map(|p| p.as_db_str()),
                player.jersey_number,
                player.updated_at,
            ],
        )?;

        if changed == 0 {
            return Err(RepositoryError::NotFound {
                entity: "Player".to_string(),
                id: player.id.clone(),
            });
        }
        Ok(())
    }

    pub fn delete(&self, id: &str) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let changed = conn.execute("DELETE FROM players WHERE id = ?1", params![id])?;

        if changed == 0 {
            return Err(RepositoryError::NotFound {
                entity: "Player".to_string(),
                id: id.to_string(),
            });
        }
        Ok(())
    }
}
