// ==========================================
// footy-stats - import pipeline integration tests
// ==========================================
// Drives the orchestrator against a real SQLite store (and a mock
// store for batch failure injection).
// ==========================================

mod test_helpers;

use footy_stats::api::TeamApi;
use footy_stats::domain::import::{
    ImportKind, ImportOptions, ImportSchema, ProcessedRecord, RefEntity, RefPair,
};
use footy_stats::importer::{ImportError, ImportOrchestrator};
use footy_stats::repository::error::{RepositoryError, RepositoryResult};
use footy_stats::repository::{ImportStore, SqliteStore};
use std::sync::Arc;

fn orchestrator_for(db_path: &str) -> ImportOrchestrator {
    let store = SqliteStore::new(db_path).expect("open store");
    ImportOrchestrator::new(Arc::new(store))
}

// ==========================================
// Team import
// ==========================================

#[tokio::test]
async fn test_team_import_end_to_end() {
    let (_db, db_path) = test_helpers::create_test_db();
    let orchestrator = orchestrator_for(&db_path);

    let csv = "name,team_type,city,founded_year\n\
               FCB United,internal,Barcelona,1987\n\
               Red Team,club,,\n";
    let summary = orchestrator
        .run(ImportKind::Team, csv, &ImportOptions::default())
        .await
        .unwrap();

    assert_eq!(summary.records_processed, 2);
    assert_eq!(summary.records_imported, 2);
    assert!(summary.errors.is_empty());
    assert_eq!(summary.message, "imported 2 of 2 row(s)");

    let teams = TeamApi::new(&db_path).unwrap().list_teams().unwrap();
    assert_eq!(teams.len(), 2);
    let fcb = teams.iter().find(|t| t.name == "FCB United").unwrap();
    assert_eq!(fcb.city.as_deref(), Some("Barcelona"));
    assert_eq!(fcb.founded_year, Some(1987));
}

#[tokio::test]
async fn test_dry_run_reports_issues_without_writing() {
    let (_db, db_path) = test_helpers::create_test_db();
    let orchestrator = orchestrator_for(&db_path);

    let csv = "name,team_type\n\
               FCB United,internal\n\
               Red Team,bogus\n\
               ,club\n";
    let options = ImportOptions {
        dry_run: true,
        ..ImportOptions::default()
    };

    let summary = orchestrator
        .run(ImportKind::Team, csv, &options)
        .await
        .unwrap();

    assert_eq!(summary.records_processed, 1);
    assert_eq!(summary.records_imported, 0);
    assert_eq!(summary.errors.len(), 2);
    assert!(summary.errors[0].contains("row 2"));
    assert!(summary.errors[0].contains("invalid team_type 'bogus'"));
    assert!(summary.errors[1].contains("row 3"));
    assert!(summary.errors[1].contains("missing name"));

    // nothing written
    assert_eq!(test_helpers::count_rows(&db_path, "teams"), 0);

    // a second dry run sees the same world and says the same thing
    let again = orchestrator
        .run(ImportKind::Team, csv, &options)
        .await
        .unwrap();
    assert_eq!(again, summary);
}

#[tokio::test]
async fn test_reimport_is_idempotent_with_skip_duplicates() {
    let (_db, db_path) = test_helpers::create_test_db();
    let orchestrator = orchestrator_for(&db_path);

    let csv = "name,team_type\nFCB United,internal\nRed Team,club\n";
    let options = ImportOptions::default(); // skip_duplicates on

    let first = orchestrator
        .run(ImportKind::Team, csv, &options)
        .await
        .unwrap();
    let second = orchestrator
        .run(ImportKind::Team, csv, &options)
        .await
        .unwrap();

    assert_eq!(first.records_imported, second.records_imported);
    assert!(second.errors.is_empty());
    // no duplicate rows appeared
    assert_eq!(test_helpers::count_rows(&db_path, "teams"), 2);
}

#[tokio::test]
async fn test_structurally_malformed_input_aborts() {
    let (_db, db_path) = test_helpers::create_test_db();
    let orchestrator = orchestrator_for(&db_path);

    let csv = "name,team_type\nFCB United,internal,extra-column\n";
    let result = orchestrator
        .run(ImportKind::Team, csv, &ImportOptions::default())
        .await;

    assert!(matches!(
        result,
        Err(ImportError::ColumnCountMismatch { row: 1, .. })
    ));
    assert_eq!(test_helpers::count_rows(&db_path, "teams"), 0);
}

// ==========================================
// Reference resolution
// ==========================================

#[tokio::test]
async fn test_player_import_resolves_team_names_case_insensitively() {
    let (_db, db_path) = test_helpers::create_test_db();
    let team = test_helpers::seed_team(&db_path, "FCB United", "internal");
    let orchestrator = orchestrator_for(&db_path);

    let csv = "name,team_name,position,jersey_number\n\
               Dani Gomez,fcb united,FW,9\n\
               Lea Silva,FCB UNITED,GK,1\n";
    let summary = orchestrator
        .run(ImportKind::Player, csv, &ImportOptions::default())
        .await
        .unwrap();

    assert_eq!(summary.records_imported, 2);
    assert!(summary.errors.is_empty());

    let conn = footy_stats::db::open_connection(&db_path).unwrap();
    let distinct_team: String = conn
        .query_row("SELECT DISTINCT team_id FROM players", [], |row| row.get(0))
        .unwrap();
    assert_eq!(distinct_team, team.id);
}

#[tokio::test]
async fn test_unresolved_and_missing_references_are_row_issues() {
    let (_db, db_path) = test_helpers::create_test_db();
    test_helpers::seed_team(&db_path, "FCB United", "internal");
    let orchestrator = orchestrator_for(&db_path);

    let csv = "name,team_name,position,jersey_number\n\
               Dani Gomez,FCB United,FW,9\n\
               Lea Silva,Ghost FC,GK,1\n\
               Jo Park,,MF,8\n";
    let summary = orchestrator
        .run(ImportKind::Player, csv, &ImportOptions::default())
        .await
        .unwrap();

    // processed + excluded == total input rows
    assert_eq!(summary.records_processed, 1);
    assert_eq!(summary.records_imported, 1);
    assert_eq!(summary.errors.len(), 2);
    assert!(summary.errors[0].contains("team 'Ghost FC' not found"));
    assert!(summary.errors[1].contains("missing team_name"));
}

#[tokio::test]
async fn test_empty_reference_table_yields_single_advisory() {
    let (_db, db_path) = test_helpers::create_test_db();
    let orchestrator = orchestrator_for(&db_path);

    let csv = "name,team_name,position,jersey_number\nDani Gomez,FCB United,FW,9\n";
    let summary = orchestrator
        .run(ImportKind::Player, csv, &ImportOptions::default())
        .await
        .unwrap();

    assert_eq!(summary.records_processed, 0);
    assert_eq!(summary.records_imported, 0);
    assert_eq!(
        summary.errors,
        vec!["no teams found — create some first".to_string()]
    );
}

// ==========================================
// Match and stat imports
// ==========================================

#[tokio::test]
async fn test_match_import_with_invalid_date_row() {
    let (_db, db_path) = test_helpers::create_test_db();
    test_helpers::seed_team(&db_path, "FCB United", "internal");
    test_helpers::seed_team(&db_path, "Red Team", "club");
    let orchestrator = orchestrator_for(&db_path);

    let csv = "match_date,home_team_name,away_team_name,home_score,away_score\n\
               2026-03-14,FCB United,Red Team,2,1\n\
               14/03/2026,Red Team,FCB United,0,0\n";
    let summary = orchestrator
        .run(ImportKind::Match, csv, &ImportOptions::default())
        .await
        .unwrap();

    assert_eq!(summary.records_imported, 1);
    assert_eq!(summary.errors.len(), 1);
    assert!(summary.errors[0].contains("invalid date for match_date"));
    assert_eq!(test_helpers::count_rows(&db_path, "matches"), 1);
}

#[tokio::test]
async fn test_player_stat_import_resolves_players() {
    let (_db, db_path) = test_helpers::create_test_db();
    let team = test_helpers::seed_team(&db_path, "FCB United", "internal");
    test_helpers::seed_player(&db_path, "Dani Gomez", &team.id);
    let orchestrator = orchestrator_for(&db_path);

    let csv = "player_name,match_date,goals,assists,minutes_played,clean_sheet\n\
               Dani Gomez,2026-03-14,2,1,90,0\n\
               Unknown Guy,2026-03-14,1,0,45,0\n";
    let summary = orchestrator
        .run(ImportKind::PlayerStat, csv, &ImportOptions::default())
        .await
        .unwrap();

    assert_eq!(summary.records_imported, 1);
    assert_eq!(summary.errors.len(), 1);
    assert!(summary.errors[0].contains("player 'Unknown Guy' not found"));
}

// ==========================================
// Batch isolation (mock store)
// ==========================================

// Accepts every batch except the configured one.
struct FailSecondBatchStore {
    calls: std::sync::Mutex<usize>,
}

#[async_trait::async_trait]
impl ImportStore for FailSecondBatchStore {
    async fn ping(&self) -> RepositoryResult<()> {
        Ok(())
    }

    async fn list_refs(&self, _entity: RefEntity) -> RepositoryResult<Vec<RefPair>> {
        Ok(vec![])
    }

    async fn upsert_batch(
        &self,
        _schema: &ImportSchema,
        records: &[ProcessedRecord],
        _skip_duplicates: bool,
    ) -> RepositoryResult<usize> {
        let mut calls = self.calls.lock().unwrap();
        *calls += 1;
        if *calls == 2 {
            return Err(RepositoryError::DatabaseQueryError(
                "constraint violated".to_string(),
            ));
        }
        Ok(records.len())
    }
}

#[tokio::test]
async fn test_failed_batch_is_isolated() {
    let store = Arc::new(FailSecondBatchStore {
        calls: std::sync::Mutex::new(0),
    });
    let orchestrator = ImportOrchestrator::new(store.clone());

    let csv = "name,team_type\n\
               Team A,club\n\
               Team B,club\n\
               Team C,club\n";
    let options = ImportOptions {
        batch_size: 1,
        ..ImportOptions::default()
    };

    let summary = orchestrator
        .run(ImportKind::Team, csv, &options)
        .await
        .unwrap();

    // batches 1 and 3 applied; exactly one error names batch 2
    assert_eq!(summary.records_processed, 3);
    assert_eq!(summary.records_imported, 2);
    assert_eq!(summary.errors.len(), 1);
    assert!(summary.errors[0].contains("batch 2"));
    assert_eq!(*store.calls.lock().unwrap(), 3);
}
