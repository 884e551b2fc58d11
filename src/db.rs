// ==========================================
// footy-stats - SQLite connection setup
// ==========================================
// Goals:
// - one place for every Connection::open so PRAGMA behavior
//   never diverges between modules
// - shared busy_timeout to soften concurrent-write errors
// - embedded schema, applied idempotently on open
// ==========================================

use rusqlite::Connection;
use std::time::Duration;

/// Default busy_timeout (milliseconds)
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// Apply the unified PRAGMA set to a connection
///
/// foreign_keys and busy_timeout are per-connection settings, so this
/// must run on every open, not once per database file.
pub fn configure_connection(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS))?;
    Ok(())
}

/// Open a connection with the unified configuration applied
pub fn open_connection(db_path: &str) -> rusqlite::Result<Connection> {
    let conn = Connection::open(db_path)?;
    configure_connection(&conn)?;
    Ok(conn)
}

/// Open a connection and make sure the schema exists
pub fn open_and_init(db_path: &str) -> rusqlite::Result<Connection> {
    let conn = open_connection(db_path)?;
    init_schema(&conn)?;
    Ok(conn)
}

/// Create the tables and indexes if they are not present
///
/// The UNIQUE constraints double as the upsert conflict targets used by
/// the import pipeline: teams key on name, players on (name, team_id),
/// matches on (match_date, home_team_id, away_team_id), player stats on
/// (player_id, match_date).
pub fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS teams (
            id            TEXT PRIMARY KEY,
            name          TEXT NOT NULL UNIQUE,
            team_type     TEXT NOT NULL,
            city          TEXT NULL,
            founded_year  INTEGER NULL,
            created_at    TEXT NOT NULL,
            updated_at    TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS players (
            id            TEXT PRIMARY KEY,
            name          TEXT NOT NULL,
            team_id       TEXT NOT NULL REFERENCES teams(id),
            position      TEXT NULL,
            jersey_number INTEGER NULL,
            created_at    TEXT NOT NULL,
            updated_at    TEXT NOT NULL,
            UNIQUE (name, team_id)
        );
        CREATE INDEX IF NOT EXISTS idx_players_team ON players(team_id);

        CREATE TABLE IF NOT EXISTS matches (
            id            TEXT PRIMARY KEY,
            match_date    TEXT NOT NULL,
            home_team_id  TEXT NOT NULL REFERENCES teams(id),
            away_team_id  TEXT NOT NULL REFERENCES teams(id),
            home_score    INTEGER NULL,
            away_score    INTEGER NULL,
            created_at    TEXT NOT NULL,
            updated_at    TEXT NOT NULL,
            UNIQUE (match_date, home_team_id, away_team_id)
        );
        CREATE INDEX IF NOT EXISTS idx_matches_date ON matches(match_date);

        CREATE TABLE IF NOT EXISTS player_stats (
            id             TEXT PRIMARY KEY,
            player_id      TEXT NOT NULL REFERENCES players(id),
            match_date     TEXT NOT NULL,
            goals          INTEGER NOT NULL DEFAULT 0,
            assists        INTEGER NOT NULL DEFAULT 0,
            minutes_played INTEGER NULL,
            clean_sheet    INTEGER NOT NULL DEFAULT 0,
            created_at     TEXT NOT NULL,
            updated_at     TEXT NOT NULL,
            UNIQUE (player_id, match_date)
        );
        CREATE INDEX IF NOT EXISTS idx_player_stats_player ON player_stats(player_id);
        "#,
    )
}
