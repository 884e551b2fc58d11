// ==========================================
// footy-stats - import API integration tests
// ==========================================

mod test_helpers;

use footy_stats::api::{ApiError, ImportApi};
use footy_stats::config::AppConfig;
use footy_stats::domain::import::ImportKind;

#[tokio::test]
async fn test_import_via_api_uses_configured_batch_size() {
    let (_db, db_path) = test_helpers::create_test_db();
    let mut config = AppConfig::new(db_path.clone());
    config.batch_size = 2;
    let api = ImportApi::new(config);

    let options = api.default_options();
    assert_eq!(options.batch_size, 2);

    let csv = "name,team_type\nTeam A,club\nTeam B,club\nTeam C,internal\n";
    let summary = api.import(ImportKind::Team, csv, &options).await.unwrap();

    assert_eq!(summary.records_imported, 3);
    assert_eq!(test_helpers::count_rows(&db_path, "teams"), 3);
}

#[tokio::test]
async fn test_summary_contract_serialization() {
    let (_db, db_path) = test_helpers::create_test_db();
    let api = ImportApi::new(AppConfig::new(db_path));

    let csv = "name,team_type\nTeam A,club\n,club\n";
    let summary = api
        .import(ImportKind::Team, csv, &api.default_options())
        .await
        .unwrap();

    let json = serde_json::to_value(&summary).unwrap();
    assert_eq!(json["recordsProcessed"], 1);
    assert_eq!(json["recordsImported"], 1);
    assert_eq!(json["errors"][0], "row 2: missing name");
    assert!(json["message"].as_str().unwrap().contains("imported 1 of 2"));
}

#[tokio::test]
async fn test_structural_error_surfaces_as_api_error() {
    let (_db, db_path) = test_helpers::create_test_db();
    let api = ImportApi::new(AppConfig::new(db_path));

    let result = api
        .import(ImportKind::Team, "", &api.default_options())
        .await;

    match result {
        Err(ApiError::ImportFailed(msg)) => assert!(msg.contains("header")),
        other => panic!("expected ImportFailed, got {other:?}"),
    }
}

#[tokio::test]
async fn test_unreachable_store_is_a_configuration_error() {
    let api = ImportApi::new(AppConfig::new("/no/such/directory/stats.db"));

    let result = api
        .import(
            ImportKind::Team,
            "name,team_type\nTeam A,club\n",
            &api.default_options(),
        )
        .await;

    assert!(matches!(result, Err(ApiError::ConfigurationError(_))));
}

#[test]
fn test_templates_are_served_per_kind() {
    let (_db, db_path) = test_helpers::create_test_db();
    let api = ImportApi::new(AppConfig::new(db_path));

    assert!(api
        .template(ImportKind::Team)
        .starts_with("name,team_type"));
    assert!(api
        .template(ImportKind::PlayerStat)
        .starts_with("player_name,match_date"));
}
