//! End-to-end settlement against JSON files on disk

use pick_tracker::config::Config;
use pick_tracker::ledger::{ResultUpdate, ResultUpdater, UpdateOutcome};
use pick_tracker::models::PickResult;
use pick_tracker::store::{HistoryStore, JsonHistoryStore};
use pick_tracker::TrackerError;
use serde_json::{json, Value};
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

fn write_json(path: &Path, value: &Value) {
    std::fs::write(path, serde_json::to_string_pretty(value).unwrap()).unwrap();
}

fn setup(pick: &str) -> (TempDir, Config) {
    let dir = tempfile::tempdir().unwrap();
    let paths = json!({"games": "games.json", "picks": "picks.json", "history": "history.json"});
    write_json(&dir.path().join("config.json"), &json!({ "paths": paths }));
    write_json(
        &dir.path().join("games.json"),
        &json!({
            "fetched_at": "2025-12-16T12:00:00Z",
            "games": [{
                "game_id": "g1",
                "sport": "NBA",
                "home_team": "Knicks",
                "away_team": "Spurs",
                "game_time": "2025-12-16T00:30:00Z"
            }]
        }),
    );
    write_json(
        &dir.path().join("history.json"),
        &json!([
            {
                "game_id": "g0",
                "game": "Heat vs Celtics",
                "pick": "Over 215.5",
                "result": "LOSS",
                "final_score": "Celtics 100, Heat 99"
            },
            {
                "game_id": "g1",
                "sport": "NBA",
                "game": "Spurs vs Knicks",
                "pick": pick,
                "odds": -110,
                "confidence": "medium",
                "game_time": "2025-12-16T00:30:00Z",
                "result": "PENDING",
                "final_score": null
            }
        ]),
    );
    let config = Config::load(dir.path().join("config.json")).unwrap();
    (dir, config)
}

fn read_history(config: &Config) -> Value {
    serde_json::from_str(&std::fs::read_to_string(&config.history_path).unwrap()).unwrap()
}

#[test]
fn test_settles_spread_and_persists() {
    let (_dir, config) = setup("Knicks -2.5");

    let mut updater = ResultUpdater::from_config(&config).unwrap();
    let update = ResultUpdate::parse("g1", "Knicks", "100", "Spurs", "97").unwrap();
    let outcome = updater.update(&update).unwrap();
    assert_eq!(
        outcome.format(),
        "Updated g1: Knicks -2.5 -> WIN (Knicks 100, Spurs 97)"
    );

    let history = read_history(&config);
    assert_eq!(history[1]["result"], "WIN");
    assert_eq!(history[1]["final_score"], "Knicks 100, Spurs 97");
    assert_eq!(history[1]["odds"], -110);
    // Other entries are untouched, and gain no keys they did not have
    assert_eq!(history[0]["result"], "LOSS");
    assert!(history[0].get("sport").is_none());
    assert!(history[0].get("odds").is_none());
    assert!(history[0].get("reasoning").is_none());
    assert_eq!(history.as_array().unwrap().len(), 2);
}

#[test]
fn test_settles_entry_with_decimal_odds() {
    let (_dir, config) = setup("Spurs +3.5");
    let mut history = read_history(&config);
    history[1]["odds"] = json!(-110.0);
    history[0]["odds"] = json!(1.91);
    write_json(&config.history_path, &history);

    let update = ResultUpdate::parse("g1", "Knicks", "100", "Spurs", "97").unwrap();
    let outcome = ResultUpdater::from_config(&config)
        .unwrap()
        .update(&update)
        .unwrap();
    assert!(matches!(outcome, UpdateOutcome::Settled { result: PickResult::Win, .. }));

    let history = read_history(&config);
    assert_eq!(history[1]["result"], "WIN");
    assert_eq!(history[1]["odds"], -110.0);
    assert!(history[1]["odds"].is_f64());
    assert_eq!(history[0]["odds"], 1.91);
}

#[test]
fn test_resettling_is_a_noop() {
    let (_dir, config) = setup("Knicks ML");

    let first = ResultUpdate::parse("g1", "Knicks", "100", "Spurs", "97").unwrap();
    ResultUpdater::from_config(&config)
        .unwrap()
        .update(&first)
        .unwrap();
    let before = std::fs::read_to_string(&config.history_path).unwrap();

    let second = ResultUpdate::parse("g1", "Knicks", "90", "Spurs", "97").unwrap();
    let outcome = ResultUpdater::from_config(&config)
        .unwrap()
        .update(&second)
        .unwrap();
    assert_eq!(
        outcome,
        UpdateOutcome::AlreadySettled {
            game_id: "g1".to_string(),
            result: PickResult::Win,
        }
    );
    assert_eq!(std::fs::read_to_string(&config.history_path).unwrap(), before);
}

#[test]
fn test_failure_leaves_file_untouched() {
    let (_dir, config) = setup("Knicks by ten");
    let before = std::fs::read_to_string(&config.history_path).unwrap();

    let update = ResultUpdate::parse("g1", "Knicks", "100", "Spurs", "97").unwrap();
    let err = ResultUpdater::from_config(&config)
        .unwrap()
        .update(&update)
        .unwrap_err();
    assert!(matches!(err, TrackerError::UnparseablePick(_)));
    assert_eq!(std::fs::read_to_string(&config.history_path).unwrap(), before);

    let history = JsonHistoryStore::open(&config.history_path).unwrap();
    assert!(history.find("g1").unwrap().final_score.is_none());
}

#[test]
fn test_missing_history_file() {
    let (_dir, config) = setup("Knicks ML");
    std::fs::remove_file(&config.history_path).unwrap();
    assert!(matches!(
        ResultUpdater::from_config(&config),
        Err(TrackerError::StoreNotFound(_))
    ));
}

fn run_cli(dir: &Path, args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_pick-tracker"))
        .arg("--config")
        .arg(dir.join("config.json"))
        .args(args)
        .output()
        .unwrap()
}

#[test]
fn test_cli_exit_codes() {
    let (dir, config) = setup("Over 200");

    let out = run_cli(dir.path(), &["update-result", "g9", "Knicks", "100", "Spurs", "100"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("game_id 'g9' not found"));

    let out = run_cli(dir.path(), &["update-result", "g1", "Knicks", "1OO", "Spurs", "100"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("scores must be integers"));

    let out = run_cli(dir.path(), &["update-result", "g1", "knicks", "100", "spurs", "100"]);
    assert_eq!(out.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&out.stdout).contains("-> PUSH (Knicks 100, Spurs 100)"));

    let out = run_cli(dir.path(), &["update-result", "g1", "knicks", "110", "spurs", "100"]);
    assert_eq!(out.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&out.stdout).contains("already has result 'PUSH'"));
    assert_eq!(read_history(&config)[1]["final_score"], "Knicks 100, Spurs 100");
}

#[test]
fn test_cli_wrong_argument_count() {
    let (dir, _config) = setup("Over 200");
    let out = run_cli(dir.path(), &["update-result", "g1", "Knicks", "100", "Spurs"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(!String::from_utf8_lossy(&out.stderr).is_empty());

    let out = run_cli(dir.path(), &["update-result", "--help"]);
    assert_eq!(out.status.code(), Some(0));
}
