// ==========================================
// footy-stats - shared test helpers
// ==========================================
#![allow(dead_code)]

use footy_stats::api::{PlayerApi, TeamApi};
use footy_stats::db;
use footy_stats::domain::entities::{Player, Team};
use tempfile::NamedTempFile;

/// Create a scratch database with the schema applied.
/// The NamedTempFile keeps the file alive for the test's lifetime.
pub fn create_test_db() -> (NamedTempFile, String) {
    let file = NamedTempFile::new().expect("create temp db file");
    let path = file
        .path()
        .to_str()
        .expect("temp path is utf-8")
        .to_string();
    db::open_and_init(&path).expect("init schema");
    (file, path)
}

pub fn seed_team(db_path: &str, name: &str, team_type: &str) -> Team {
    let api = TeamApi::new(db_path).expect("team api");
    api.create_team(name, team_type, None, None)
        .expect("seed team")
}

pub fn seed_player(db_path: &str, name: &str, team_id: &str) -> Player {
    let api = PlayerApi::new(db_path).expect("player api");
    api.create_player(name, team_id, Some("FW"), None)
        .expect("seed player")
}

pub fn count_rows(db_path: &str, table: &str) -> i64 {
    let conn = db::open_connection(db_path).expect("open db");
    conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| {
        row.get(0)
    })
    .expect("count rows")
}
