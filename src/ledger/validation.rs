use crate::error::{Result, TrackerError};
use crate::ledger::pending::parse_game_time;
use crate::utils::data::load_json;
use serde_json::Value;
use std::collections::{BTreeMap, HashSet};
use std::path::Path;

const GAME_REQUIRED_FIELDS: [&str; 9] = [
    "game_id",
    "sport",
    "away_team",
    "home_team",
    "game_time",
    "spread",
    "moneyline",
    "total",
    "venue",
];
const PICK_REQUIRED_FIELDS: [&str; 6] = [
    "game_id",
    "sport",
    "game",
    "pick",
    "reasoning",
    "created_at",
];
// Only checked on actual picks, not "NO PICK" rows
const ACTUAL_PICK_REQUIRED_FIELDS: [&str; 3] = ["odds", "confidence", "updated_at"];
pub const VALID_SPORTS: [&str; 2] = ["NBA", "NCAAB"];
pub const VALID_CONFIDENCE: [&str; 3] = ["low", "medium", "high"];
pub const MAX_HIGH_CONFIDENCE: usize = 2;

/// Errors and counts from validating one document
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    pub errors: Vec<String>,
    pub total: usize,
    pub by_sport: BTreeMap<String, usize>,
    pub actual_picks: usize,
    pub no_picks: usize,
    pub by_confidence: BTreeMap<String, usize>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn fail(mut self, error: impl Into<String>) -> Self {
        self.errors.push(error.into());
        self
    }

    pub fn sport_count(&self, sport: &str) -> usize {
        self.by_sport.get(sport).copied().unwrap_or(0)
    }

    pub fn confidence_count(&self, confidence: &str) -> usize {
        self.by_confidence.get(confidence).copied().unwrap_or(0)
    }
}

fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
        Value::Number(n) => n.as_f64() == Some(0.0),
    }
}

fn is_timestamp(value: &Value) -> bool {
    value.as_str().and_then(parse_game_time).is_some()
}

fn load_document(path: &Path) -> Result<Value> {
    load_json(path)
}

fn validate_game(game: &Value, index: usize) -> Vec<String> {
    let mut errors = Vec::new();

    for field in GAME_REQUIRED_FIELDS {
        match game.get(field) {
            None => errors.push(format!("Game {}: missing required field '{}'", index, field)),
            Some(value) if is_empty_value(value) => {
                errors.push(format!("Game {}: empty value for '{}'", index, field))
            }
            Some(_) => {}
        }
    }

    if let Some(sport) = game.get("sport") {
        if !sport.as_str().is_some_and(|s| VALID_SPORTS.contains(&s)) {
            errors.push(format!(
                "Game {}: invalid sport {} (must be NBA or NCAAB)",
                index, sport
            ));
        }
    }

    if let Some(game_time) = game.get("game_time") {
        if !is_timestamp(game_time) {
            errors.push(format!("Game {}: invalid ISO timestamp for game_time", index));
        }
    }

    errors
}

/// Validate a games document's structure and required fields
pub fn validate_games(document: &Value) -> ValidationReport {
    let mut report = ValidationReport::default();

    match document.get("fetched_at") {
        None => report.errors.push("Missing 'fetched_at' field".to_string()),
        Some(ts) if !is_timestamp(ts) => report
            .errors
            .push("Invalid ISO timestamp for 'fetched_at'".to_string()),
        Some(_) => {}
    }

    let games = match document.get("games") {
        None => return report.fail("Missing 'games' array"),
        Some(Value::Array(games)) => games,
        Some(_) => return report.fail("'games' must be an array"),
    };

    report.total = games.len();
    for (i, game) in games.iter().enumerate() {
        report.errors.extend(validate_game(game, i));
        if let Some(sport) = game.get("sport").and_then(Value::as_str) {
            if VALID_SPORTS.contains(&sport) {
                *report.by_sport.entry(sport.to_string()).or_default() += 1;
            }
        }
    }

    report
}

fn validate_pick(pick: &Value, index: usize, valid_game_ids: &HashSet<&str>) -> Vec<String> {
    let mut errors = Vec::new();

    for field in PICK_REQUIRED_FIELDS {
        if pick.get(field).is_none() {
            errors.push(format!("Pick {}: missing required field '{}'", index, field));
        }
    }

    if let Some(game_id) = pick.get("game_id") {
        if !game_id.as_str().is_some_and(|id| valid_game_ids.contains(id)) {
            errors.push(format!(
                "Pick {}: game_id {} not found in games.json",
                index, game_id
            ));
        }
    }

    if let Some(sport) = pick.get("sport") {
        if !sport.as_str().is_some_and(|s| VALID_SPORTS.contains(&s)) {
            errors.push(format!("Pick {}: invalid sport {}", index, sport));
        }
    }

    let is_no_pick = pick.get("pick").and_then(Value::as_str) == Some("NO PICK");
    if !is_no_pick {
        for field in ACTUAL_PICK_REQUIRED_FIELDS {
            if pick.get(field).is_none() {
                errors.push(format!(
                    "Pick {}: missing required field '{}' for actual pick",
                    index, field
                ));
            }
        }

        if let Some(confidence) = pick.get("confidence") {
            if !confidence
                .as_str()
                .is_some_and(|c| VALID_CONFIDENCE.contains(&c))
            {
                errors.push(format!(
                    "Pick {}: invalid confidence {} (must be low/medium/high)",
                    index, confidence
                ));
            }
        }

        if let Some(odds) = pick.get("odds") {
            if !odds.is_number() {
                errors.push(format!("Pick {}: odds must be a number", index));
            }
        }
    }

    errors
}

/// Validate a picks document; every `game_id` must exist in `games`
pub fn validate_picks(document: &Value, games: Option<&Value>) -> ValidationReport {
    let mut report = ValidationReport::default();

    if document.get("created_at").is_none() {
        report.errors.push("Missing 'created_at' field".to_string());
    }

    let picks = match document.get("picks") {
        None => return report.fail("Missing 'picks' array"),
        Some(Value::Array(picks)) => picks,
        Some(_) => return report.fail("'picks' must be an array"),
    };

    let valid_game_ids: HashSet<&str> = games
        .and_then(|g| g.get("games"))
        .and_then(Value::as_array)
        .map(|games| {
            games
                .iter()
                .filter_map(|g| g.get("game_id").and_then(Value::as_str))
                .collect()
        })
        .unwrap_or_default();

    for (i, pick) in picks.iter().enumerate() {
        report.errors.extend(validate_pick(pick, i, &valid_game_ids));
        report.total += 1;

        if pick.get("pick").and_then(Value::as_str) == Some("NO PICK") {
            report.no_picks += 1;
        } else {
            report.actual_picks += 1;
            if let Some(confidence) = pick.get("confidence").and_then(Value::as_str) {
                if VALID_CONFIDENCE.contains(&confidence) {
                    *report
                        .by_confidence
                        .entry(confidence.to_string())
                        .or_default() += 1;
                }
            }
        }

        if let Some(sport) = pick.get("sport").and_then(Value::as_str) {
            if VALID_SPORTS.contains(&sport) {
                *report.by_sport.entry(sport.to_string()).or_default() += 1;
            }
        }
    }

    report
}

/// Validate the games file on disk; a missing or malformed file is a failed report
pub fn validate_games_file(path: &Path) -> ValidationReport {
    match load_document(path) {
        Ok(document) => validate_games(&document),
        Err(e) => ValidationReport::default().fail(describe_load_error(e)),
    }
}

/// Validate the picks file on disk against the games file
pub fn validate_picks_file(picks_path: &Path, games_path: &Path) -> ValidationReport {
    let document = match load_document(picks_path) {
        Ok(document) => document,
        Err(e) => return ValidationReport::default().fail(describe_load_error(e)),
    };
    // A missing games file means no game_id can be valid
    let games = load_document(games_path).ok();
    validate_picks(&document, games.as_ref())
}

fn describe_load_error(error: TrackerError) -> String {
    match error {
        TrackerError::StoreNotFound(path) => format!("{} does not exist", path.display()),
        TrackerError::InvalidJson { source, .. } => format!("Invalid JSON: {}", source),
        other => other.to_string(),
    }
}
