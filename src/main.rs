// ==========================================
// footy-stats - CLI entry
// ==========================================
// Runs imports and prints the summary; the admin UI talks to the
// API layer directly and does not go through this binary.
// ==========================================

use anyhow::{anyhow, bail};
use footy_stats::api::ImportApi;
use footy_stats::config::AppConfig;
use footy_stats::domain::import::ImportKind;
use footy_stats::{db, logging, templates, APP_NAME, VERSION};

#[tokio::main]
async fn main() {
    logging::init();

    tracing::info!("==================================================");
    tracing::info!("{} v{}", APP_NAME, VERSION);
    tracing::info!("==================================================");

    let args: Vec<String> = std::env::args().skip(1).collect();
    if let Err(e) = run(args).await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

async fn run(args: Vec<String>) -> anyhow::Result<()> {
    let Some(command) = args.first() else {
        print_usage();
        return Ok(());
    };

    match command.as_str() {
        "import" => run_import(&args[1..]).await,
        "template" => {
            let kind = parse_kind(args.get(1))?;
            print!("{}", templates::header_template(kind));
            Ok(())
        }
        "init-db" => {
            let config = AppConfig::from_env()?;
            db::open_and_init(&config.database_path)?;
            tracing::info!(db_path = %config.database_path, "database ready");
            Ok(())
        }
        other => {
            print_usage();
            bail!("unknown command: {other}")
        }
    }
}

async fn run_import(args: &[String]) -> anyhow::Result<()> {
    let kind = parse_kind(args.first())?;
    let path = args
        .get(1)
        .ok_or_else(|| anyhow!("missing CSV file path"))?;

    let config = AppConfig::from_env()?;
    let api = ImportApi::new(config);
    let mut options = api.default_options();

    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--dry-run" => options.dry_run = true,
            "--overwrite" => options.skip_duplicates = false,
            "--batch-size" => {
                i += 1;
                let raw = args
                    .get(i)
                    .ok_or_else(|| anyhow!("--batch-size needs a value"))?;
                options.batch_size = raw
                    .parse::<usize>()
                    .ok()
                    .filter(|v| *v > 0)
                    .ok_or_else(|| anyhow!("invalid batch size: {raw}"))?;
            }
            other => bail!("unknown flag: {other}"),
        }
        i += 1;
    }

    let text = std::fs::read_to_string(path)?;
    let summary = api.import(kind, &text, &options).await?;

    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

fn parse_kind(arg: Option<&String>) -> anyhow::Result<ImportKind> {
    let raw = arg.ok_or_else(|| anyhow!("missing import kind"))?;
    ImportKind::parse(raw)
        .ok_or_else(|| anyhow!("unknown import kind '{raw}' (teams/players/matches/player_stats)"))
}

fn print_usage() {
    println!("{APP_NAME} v{VERSION}");
    println!();
    println!("usage:");
    println!("  footy-stats import <kind> <file.csv> [--dry-run] [--overwrite] [--batch-size N]");
    println!("  footy-stats template <kind>");
    println!("  footy-stats init-db");
    println!();
    println!("kinds: teams, players, matches, player_stats");
    println!();
    println!("environment:");
    println!("  FOOTY_STATS_DB          SQLite database path (required)");
    println!("  FOOTY_STATS_BATCH_SIZE  default records per batch (optional, default 100)");
}
