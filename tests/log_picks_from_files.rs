use pick_tracker::data::load_json;
use pick_tracker::ledger::log_picks;
use pick_tracker::models::{PickResult, PicksFile};
use pick_tracker::store::{HistoryStore, JsonGameStore, JsonHistoryStore};
use serde_json::json;

#[test]
fn test_log_picks_creates_history_file() {
    let dir = tempfile::tempdir().unwrap();
    let games_path = dir.path().join("games.json");
    let picks_path = dir.path().join("picks.json");
    let history_path = dir.path().join("data").join("history.json");

    std::fs::write(
        &games_path,
        json!({
            "fetched_at": "2025-12-16T12:00:00Z",
            "games": [{
                "game_id": "ncaab-2025-12-16-tenn-lou",
                "home_team": "Tennessee Volunteers",
                "away_team": "Louisville Cardinals",
                "game_time": "2025-12-17T00:00:00Z"
            }]
        })
        .to_string(),
    )
    .unwrap();
    std::fs::write(
        &picks_path,
        json!({
            "created_at": "2025-12-16T15:00:00Z",
            "picks": [
                {
                    "game_id": "ncaab-2025-12-16-tenn-lou",
                    "sport": "NCAAB",
                    "game": "Louisville vs Tennessee",
                    "pick": "Tennessee -7.5",
                    "odds": -110,
                    "reasoning": "Tennessee defense travels",
                    "confidence": "high",
                    "created_at": "2025-12-16T15:00:00Z"
                },
                {
                    "game_id": "nba-2025-12-16-sas-nyk",
                    "sport": "NBA",
                    "game": "Spurs vs Knicks",
                    "pick": "NO PICK",
                    "reasoning": "no edge",
                    "created_at": "2025-12-16T15:00:00Z"
                }
            ]
        })
        .to_string(),
    )
    .unwrap();

    let picks: PicksFile = load_json(&picks_path).unwrap();
    let games = JsonGameStore::open(&games_path).unwrap();
    let mut history = JsonHistoryStore::open_or_empty(&history_path).unwrap();

    let summary = log_picks(&picks, &games, &mut history).unwrap();
    assert_eq!(summary.added, 1);
    assert_eq!(summary.skipped_no_pick, 1);

    // Running again adds nothing
    let mut history = JsonHistoryStore::open(&history_path).unwrap();
    let summary = log_picks(&picks, &games, &mut history).unwrap();
    assert_eq!(summary.added, 0);
    assert_eq!(summary.skipped_duplicate, 1);
    assert_eq!(summary.total_in_history, 1);

    let raw: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&history_path).unwrap()).unwrap();
    let entry = &raw[0];
    assert_eq!(entry["result"], "PENDING");
    assert!(entry["final_score"].is_null());
    assert_eq!(entry["game_time"], "2025-12-17T00:00:00Z");
    assert_eq!(entry["pick_time"], "2025-12-16T15:00:00Z");

    let history = JsonHistoryStore::open(&history_path).unwrap();
    assert_eq!(
        history.find("ncaab-2025-12-16-tenn-lou").unwrap().result,
        PickResult::Pending
    );
}
