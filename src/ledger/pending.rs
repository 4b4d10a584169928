use crate::models::HistoryEntry;
use chrono::{DateTime, Duration, FixedOffset, Utc};

/// A pending pick whose game should be over by now
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingGame {
    pub game_id: String,
    pub game: String,
    pub date: String,
}

impl PendingGame {
    pub fn format(&self) -> String {
        format!("{} | {} | {}", self.game_id, self.game, self.date)
    }
}

/// Parse an RFC 3339 game time ("2025-12-16T19:00:00Z" or with an offset)
///
/// The offset is kept so the reported date is the local game date.
pub fn parse_game_time(game_time: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(game_time).ok()
}

/// `PENDING` entries whose game started at least `settle_delay` before `now`
///
/// Entries without a parseable `game_time` are skipped.
pub fn pending_games(
    entries: &[HistoryEntry],
    now: DateTime<Utc>,
    settle_delay: Duration,
) -> Vec<PendingGame> {
    entries
        .iter()
        .filter(|entry| entry.result.is_pending())
        .filter_map(|entry| {
            let game_time = parse_game_time(entry.game_time.as_deref()?)?;
            if game_time + settle_delay > now {
                return None;
            }
            Some(PendingGame {
                game_id: entry.game_id.clone(),
                game: entry.game.clone(),
                date: game_time.format("%Y-%m-%d").to_string(),
            })
        })
        .collect()
}
