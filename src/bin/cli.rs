use anyhow::{bail, Context, Result};
use chrono::{Duration, Utc};
use clap::error::ErrorKind;
use clap::{Parser, Subcommand};
use pick_tracker::config::{Config, CONFIG_ENV_VAR, DEFAULT_CONFIG_FILE};
use pick_tracker::data::{load_json, save_history_to_csv};
use pick_tracker::ledger::validation::{
    validate_games_file, validate_picks_file, ValidationReport, MAX_HIGH_CONFIDENCE,
};
use pick_tracker::ledger::{log_picks, pending_games, ResultUpdate, ResultUpdater};
use pick_tracker::models::PicksFile;
use pick_tracker::store::{HistoryStore, JsonGameStore, JsonHistoryStore};
use pick_tracker::TrackerError;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Track betting picks from generation through settlement
#[derive(Debug, Parser)]
#[command(name = "pick-tracker", version)]
struct Cli {
    /// Path to config.json
    #[arg(long, env = CONFIG_ENV_VAR, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Grade a pending pick against the final score
    ///
    /// Example: update-result ncaab-2025-12-16-tenn-lou Tennessee 83 Louisville 62
    UpdateResult {
        game_id: String,
        team1_name: String,
        team1_score: String,
        team2_name: String,
        team2_score: String,
    },
    /// Move generated picks into history as PENDING
    LogPicks,
    /// List pending picks whose games should have finished
    Pending,
    /// Check games.json structure and required fields
    ValidateGames,
    /// Check picks.json structure and that every game_id exists
    ValidatePicks,
    /// Write the history ledger to a CSV file
    Export { output: PathBuf },
}

fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    // Usage errors exit 1 like every other failure; help and version exit 0
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => {
            e.print()?;
            std::process::exit(1);
        }
    };
    let config = Config::load(&cli.config)?;

    match cli.command {
        Command::UpdateResult {
            game_id,
            team1_name,
            team1_score,
            team2_name,
            team2_score,
        } => {
            let update = ResultUpdate::parse(
                &game_id,
                &team1_name,
                &team1_score,
                &team2_name,
                &team2_score,
            )?;
            let mut updater = ResultUpdater::from_config(&config)?;
            let outcome = updater.update(&update)?;
            println!("{}", outcome.format());
        }
        Command::LogPicks => run_log_picks(&config)?,
        Command::Pending => run_pending(&config)?,
        Command::ValidateGames => {
            println!("Validating {}...", config.games_path.display());
            let report = validate_games_file(&config.games_path);
            finish_validation(&report)?;
            println!("  Total games: {}", report.total);
            println!("  NBA: {}", report.sport_count("NBA"));
            println!("  NCAAB: {}", report.sport_count("NCAAB"));
            if report.total == 0 {
                println!("\n  Warning: No games in file");
            }
        }
        Command::ValidatePicks => {
            println!("Validating {}...", config.picks_path.display());
            let report = validate_picks_file(&config.picks_path, &config.games_path);
            finish_validation(&report)?;
            print_picks_summary(&report);
        }
        Command::Export { output } => {
            let history = JsonHistoryStore::open(&config.history_path)?;
            save_history_to_csv(history.entries(), &output)
                .with_context(|| format!("Failed to export history to {}", output.display()))?;
            println!(
                "Saved {} history entries to {}",
                history.entries().len(),
                output.display()
            );
        }
    }

    Ok(())
}

fn run_log_picks(config: &Config) -> Result<()> {
    let picks = match load_json::<PicksFile>(&config.picks_path) {
        Err(TrackerError::StoreNotFound(_)) => PicksFile::default(),
        other => other?,
    };
    let games = JsonGameStore::open_or_empty(&config.games_path)?;
    let mut history = JsonHistoryStore::open_or_empty(&config.history_path)?;

    let summary = log_picks(&picks, &games, &mut history)?;
    println!("{}", summary.format());

    let pending: Vec<_> = history
        .entries()
        .iter()
        .filter(|e| e.result.is_pending())
        .collect();
    if !pending.is_empty() {
        println!("\nPending picks ({}):", pending.len());
        for entry in pending {
            println!(
                "  - {}: {} ({})",
                entry.game,
                entry.pick,
                entry.confidence.as_deref().unwrap_or("n/a")
            );
        }
    }
    Ok(())
}

fn run_pending(config: &Config) -> Result<()> {
    let history = match JsonHistoryStore::open(&config.history_path) {
        Err(TrackerError::StoreNotFound(_)) => {
            println!("No pending games to update");
            return Ok(());
        }
        other => other?,
    };

    let delay = Duration::hours(config.pending.settle_delay_hours);
    let pending = pending_games(history.entries(), Utc::now(), delay);
    if pending.is_empty() {
        println!("No pending games to update");
    }
    for game in pending {
        println!("{}", game.format());
    }
    Ok(())
}

fn finish_validation(report: &ValidationReport) -> Result<()> {
    if !report.is_valid() {
        println!("\nValidation FAILED:");
        for error in &report.errors {
            println!("  - {}", error);
        }
        bail!("validation failed with {} error(s)", report.errors.len());
    }
    println!("\nValidation PASSED");
    Ok(())
}

fn print_picks_summary(report: &ValidationReport) {
    println!("\nSummary:");
    println!("  Total entries: {}", report.total);
    println!("  Actual picks: {}", report.actual_picks);
    println!("  No picks: {}", report.no_picks);
    println!("\nBy sport:");
    println!("  NBA: {}", report.sport_count("NBA"));
    println!("  NCAAB: {}", report.sport_count("NCAAB"));
    println!("\nBy confidence:");
    println!("  High: {}", report.confidence_count("high"));
    println!("  Medium: {}", report.confidence_count("medium"));
    println!("  Low: {}", report.confidence_count("low"));

    let high = report.confidence_count("high");
    if high > MAX_HIGH_CONFIDENCE {
        println!(
            "\n  Warning: {} high confidence picks (recommended max: {})",
            high, MAX_HIGH_CONFIDENCE
        );
    }
    if report.actual_picks == 0 {
        println!("\n  Warning: No actual picks in file");
    }
}
