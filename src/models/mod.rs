use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use std::fmt;

/// A game fetched for pick generation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Game {
    pub game_id: String,
    pub home_team: String,
    pub away_team: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sport: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game_time: Option<String>,
    /// Odds, venue and anything else the fetcher recorded
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The games document: `{ "fetched_at": ..., "games": [...] }`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GamesFile {
    #[serde(default)]
    pub fetched_at: Option<String>,
    #[serde(default)]
    pub games: Vec<Game>,
}

/// A generated pick, before it is logged to history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pick {
    pub game_id: String,
    #[serde(default)]
    pub sport: Option<String>,
    #[serde(default)]
    pub game: String,
    pub pick: String,
    #[serde(default)]
    pub odds: Option<Number>, // American odds (e.g., -110, +150), kept as written
    #[serde(default)]
    pub reasoning: Option<String>,
    #[serde(default)]
    pub confidence: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Pick {
    pub const NO_PICK: &'static str = "NO PICK";

    pub fn is_no_pick(&self) -> bool {
        self.pick == Self::NO_PICK
    }
}

/// The picks document: `{ "created_at": ..., "picks": [...] }`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PicksFile {
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub picks: Vec<Pick>,
}

/// Settlement state of a logged pick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PickResult {
    Pending,
    Win,
    Loss,
    Push,
}

impl PickResult {
    pub fn is_pending(&self) -> bool {
        matches!(self, PickResult::Pending)
    }
}

impl fmt::Display for PickResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PickResult::Pending => "PENDING",
            PickResult::Win => "WIN",
            PickResult::Loss => "LOSS",
            PickResult::Push => "PUSH",
        };
        f.write_str(s)
    }
}

/// One row of the history ledger
///
/// `final_score` is set exactly when `result` leaves `PENDING`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub game_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sport: Option<String>,
    /// Free-text "Away vs Home" description
    pub game: String,
    pub pick: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub odds: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pick_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game_time: Option<String>,
    pub result: PickResult,
    /// Always written, `null` while pending
    pub final_score: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl HistoryEntry {
    /// Build a fresh `PENDING` entry from a pick
    pub fn from_pick(pick: &Pick, game_time: Option<String>) -> Self {
        Self {
            game_id: pick.game_id.clone(),
            sport: pick.sport.clone(),
            game: pick.game.clone(),
            pick: pick.pick.clone(),
            odds: pick.odds.clone(),
            reasoning: pick.reasoning.clone(),
            confidence: pick.confidence.clone(),
            pick_time: pick.created_at.clone(),
            game_time,
            result: PickResult::Pending,
            final_score: None,
            extra: Map::new(),
        }
    }
}

/// Direction of a totals bet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Over,
    Under,
}

/// Typed form of a free-form pick string
#[derive(Debug, Clone, PartialEq)]
pub enum Bet {
    Spread { team: String, line: f64 },
    Total { direction: Direction, number: f64 },
    Moneyline { team: String },
}

/// Which side of a game a team is on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Home,
    Away,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Home => f.write_str("home"),
            Role::Away => f.write_str("away"),
        }
    }
}
