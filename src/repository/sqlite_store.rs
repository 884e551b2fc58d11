// ==========================================
// footy-stats - SQLite import store
// ==========================================
// ImportStore implementation over rusqlite. Each batch runs inside
// one transaction; the ON CONFLICT clause is keyed on the kind's
// natural-key conflict target.
// ==========================================

use crate::db::open_and_init;
use crate::domain::import::{ImportKind, ImportSchema, ProcessedRecord, RefEntity, RefPair};
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::store::ImportStore;
use async_trait::async_trait;
use chrono::Utc;
use rusqlite::{params, Connection, Transaction};
use std::sync::{Arc, Mutex, MutexGuard};
use uuid::Uuid;

/// INSERT ... ON CONFLICT statement keyed on the schema's natural-key
/// conflict target. skip_duplicates keeps conflicting rows untouched;
/// otherwise the given SET list overwrites their non-key columns.
fn upsert_sql(
    schema: &ImportSchema,
    insert: &str,
    update_set: &str,
    skip_duplicates: bool,
) -> String {
    let target = schema.conflict_target.join(", ");
    if skip_duplicates {
        format!("{insert} ON CONFLICT({target}) DO NOTHING")
    } else {
        format!("{insert} ON CONFLICT({target}) DO UPDATE SET {update_set}")
    }
}

// ==========================================
// SqliteStore
// ==========================================
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    /// Open the store at the given database path
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_and_init(db_path)
            .map_err(|e| RepositoryError::DatabaseConnectionError(e.to_string()))?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Reuse an existing connection (shared with the CRUD repositories)
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// Batch upsert of team rows inside one transaction
    fn upsert_teams_tx(
        tx: &Transaction,
        schema: &ImportSchema,
        records: &[ProcessedRecord],
        skip_duplicates: bool,
    ) -> RepositoryResult<usize> {
        let sql = upsert_sql(
            schema,
            "INSERT INTO teams (id, name, team_type, city, founded_year, created_at, updated_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            "team_type = excluded.team_type, \
             city = excluded.city, \
             founded_year = excluded.founded_year, \
             updated_at = excluded.updated_at",
            skip_duplicates,
        );
        let mut stmt = tx.prepare(&sql)?;

        let now = Utc::now();
        let mut count = 0;
        for record in records {
            let ProcessedRecord::Team(row) = record else {
                continue;
            };
            stmt.execute(params![
                Uuid::new_v4().to_string(),
                row.name.clone().unwrap_or_default(),
                row.team_type.clone().unwrap_or_default(),
                row.city,
                row.founded_year.as_i64(),
                now,
                now,
            ])?;
            count += 1;
        }

        Ok(count)
    }

    /// Batch upsert of player rows inside one transaction
    fn upsert_players_tx(
        tx: &Transaction,
        schema: &ImportSchema,
        records: &[ProcessedRecord],
        skip_duplicates: bool,
    ) -> RepositoryResult<usize> {
        let sql = upsert_sql(
            schema,
            "INSERT INTO players (id, name, team_id, position, jersey_number, created_at, updated_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            "position = excluded.position, \
             jersey_number = excluded.jersey_number, \
             updated_at = excluded.updated_at",
            skip_duplicates,
        );
        let mut stmt = tx.prepare(&sql)?;

        let now = Utc::now();
        let mut count = 0;
        for record in records {
            let ProcessedRecord::Player(row) = record else {
                continue;
            };
            stmt.execute(params![
                Uuid::new_v4().to_string(),
                row.name.clone().unwrap_or_default(),
                row.team_id.clone().unwrap_or_default(),
                row.position,
                row.jersey_number.as_i64(),
                now,
                now,
            ])?;
            count += 1;
        }

        Ok(count)
    }

    /// Batch upsert of match rows inside one transaction
    fn upsert_matches_tx(
        tx: &Transaction,
        schema: &ImportSchema,
        records: &[ProcessedRecord],
        skip_duplicates: bool,
    ) -> RepositoryResult<usize> {
        let sql = upsert_sql(
            schema,
            "INSERT INTO matches (id, match_date, home_team_id, away_team_id, \
                                  home_score, away_score, created_at, updated_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            "home_score = excluded.home_score, \
             away_score = excluded.away_score, \
             updated_at = excluded.updated_at",
            skip_duplicates,
        );
        let mut stmt = tx.prepare(&sql)?;

        let now = Utc::now();
        let mut count = 0;
        for record in records {
            let ProcessedRecord::Match(row) = record else {
                continue;
            };
            stmt.execute(params![
                Uuid::new_v4().to_string(),
                row.match_date.value().map(|d| d.to_string()).unwrap_or_default(),
                row.home_team_id.clone().unwrap_or_default(),
                row.away_team_id.clone().unwrap_or_default(),
                row.home_score.as_i64(),
                row.away_score.as_i64(),
                now,
                now,
            ])?;
            count += 1;
        }

        Ok(count)
    }

    /// Batch upsert of player stat lines inside one transaction
    fn upsert_player_stats_tx(
        tx: &Transaction,
        schema: &ImportSchema,
        records: &[ProcessedRecord],
        skip_duplicates: bool,
    ) -> RepositoryResult<usize> {
        let sql = upsert_sql(
            schema,
            "INSERT INTO player_stats (id, player_id, match_date, goals, assists, \
                                       minutes_played, clean_sheet, created_at, updated_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            "goals = excluded.goals, \
             assists = excluded.assists, \
             minutes_played = excluded.minutes_played, \
             clean_sheet = excluded.clean_sheet, \
             updated_at = excluded.updated_at",
            skip_duplicates,
        );
        let mut stmt = tx.prepare(&sql)?;

        let now = Utc::now();
        let mut count = 0;
        for record in records {
            let ProcessedRecord::PlayerStat(row) = record else {
                continue;
            };
            stmt.execute(params![
                Uuid::new_v4().to_string(),
                row.player_id.clone().unwrap_or_default(),
                row.match_date.value().map(|d| d.to_string()).unwrap_or_default(),
                row.goals.as_i64().unwrap_or(0),
                row.assists.as_i64().unwrap_or(0),
                row.minutes_played.as_i64(),
                (row.clean_sheet.as_i64().unwrap_or(0) != 0) as i64,
                now,
                now,
            ])?;
            count += 1;
        }

        Ok(count)
    }
}

#[async_trait]
impl ImportStore for SqliteStore {
    async fn ping(&self) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.query_row("SELECT 1", [], |_row| Ok(()))
            .map_err(|e| RepositoryError::DatabaseConnectionError(e.to_string()))
    }

    async fn list_refs(&self, entity: RefEntity) -> RepositoryResult<Vec<RefPair>> {
        let conn = self.get_conn()?;
        let sql = match entity {
            RefEntity::Team => "SELECT id, name FROM teams ORDER BY created_at, name",
            RefEntity::Player => "SELECT id, name FROM players ORDER BY created_at, name",
        };

        let mut stmt = conn.prepare(sql)?;
        let rows = stmt.query_map([], |row| {
            Ok(RefPair {
                id: row.get(0)?,
                name: row.get(1)?,
            })
        })?;

        let mut refs = Vec::new();
        for pair in rows {
            refs.push(pair?);
        }
        Ok(refs)
    }

    async fn upsert_batch(
        &self,
        schema: &ImportSchema,
        records: &[ProcessedRecord],
        skip_duplicates: bool,
    ) -> RepositoryResult<usize> {
        let mut conn = self.get_conn()?;
        let tx = conn
            .transaction()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;

        let count = match schema.kind {
            ImportKind::Team => Self::upsert_teams_tx(&tx, schema, records, skip_duplicates)?,
            ImportKind::Player => Self::upsert_players_tx(&tx, schema, records, skip_duplicates)?,
            ImportKind::Match => Self::upsert_matches_tx(&tx, schema, records, skip_duplicates)?,
            ImportKind::PlayerStat => {
                Self::upsert_player_stats_tx(&tx, schema, records, skip_duplicates)?
            }
        };

        tx.commit()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;

        Ok(count)
    }
}
