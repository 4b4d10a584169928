use crate::error::Result;
use crate::models::{HistoryEntry, PicksFile};
use crate::store::{GameStore, HistoryStore};
use std::collections::HashSet;
use tracing::debug;

/// Counts from one logging run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogSummary {
    pub added: usize,
    pub skipped_no_pick: usize,
    pub skipped_duplicate: usize,
    pub total_in_history: usize,
}

impl LogSummary {
    pub fn format(&self) -> String {
        format!(
            "Logger complete:\n  Added to history: {}\n  Skipped (NO PICK): {}\n  \
             Skipped (duplicate): {}\n  Total in history: {}",
            self.added, self.skipped_no_pick, self.skipped_duplicate, self.total_in_history
        )
    }
}

/// Move generated picks into the history ledger as `PENDING` entries
///
/// "NO PICK" rows and games already in history are skipped, so each game has
/// at most one entry. The ledger is persisted once at the end.
pub fn log_picks<G: GameStore, H: HistoryStore>(
    picks: &PicksFile,
    games: &G,
    history: &mut H,
) -> Result<LogSummary> {
    let mut existing_ids: HashSet<String> =
        history.entries().iter().map(|e| e.game_id.clone()).collect();
    let mut summary = LogSummary::default();

    for pick in &picks.picks {
        if pick.is_no_pick() {
            summary.skipped_no_pick += 1;
            continue;
        }
        if existing_ids.contains(&pick.game_id) {
            debug!(game_id = %pick.game_id, "pick already in history");
            summary.skipped_duplicate += 1;
            continue;
        }

        let game_time = games
            .find(&pick.game_id)
            .and_then(|game| game.game_time.clone());
        history.upsert(HistoryEntry::from_pick(pick, game_time));
        existing_ids.insert(pick.game_id.clone());
        summary.added += 1;
    }

    history.persist()?;
    summary.total_in_history = history.entries().len();
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Game, Pick, PickResult};
    use crate::store::{MemoryGameStore, MemoryHistoryStore};
    use serde_json::Map;

    fn pick(id: &str, pick: &str) -> Pick {
        Pick {
            game_id: id.to_string(),
            sport: Some("NCAAB".to_string()),
            game: "Louisville vs Tennessee".to_string(),
            pick: pick.to_string(),
            odds: Some(serde_json::Number::from(-110)),
            reasoning: Some("Tennessee defense".to_string()),
            confidence: Some("high".to_string()),
            created_at: Some("2025-12-16T15:00:00Z".to_string()),
        }
    }

    #[test]
    fn test_log_picks_skips_no_pick_and_duplicates() {
        let games = MemoryGameStore::new(vec![Game {
            game_id: "g1".to_string(),
            home_team: "Tennessee".to_string(),
            away_team: "Louisville".to_string(),
            sport: Some("NCAAB".to_string()),
            game_time: Some("2025-12-17T00:00:00Z".to_string()),
            extra: Map::new(),
        }]);
        let mut history =
            MemoryHistoryStore::new(vec![HistoryEntry::from_pick(&pick("g0", "Over 140"), None)]);
        let picks = PicksFile {
            created_at: None,
            picks: vec![
                pick("g0", "Under 150"),
                pick("g1", "Tennessee -7.5"),
                pick("g1", "Tennessee ML"),
                pick("g2", "NO PICK"),
            ],
        };

        let summary = log_picks(&picks, &games, &mut history).unwrap();
        assert_eq!(
            summary,
            LogSummary {
                added: 1,
                skipped_no_pick: 1,
                skipped_duplicate: 2,
                total_in_history: 2,
            }
        );

        let entry = history.find("g1").unwrap();
        assert_eq!(entry.pick, "Tennessee -7.5");
        assert_eq!(entry.result, PickResult::Pending);
        assert_eq!(entry.game_time.as_deref(), Some("2025-12-17T00:00:00Z"));
        assert_eq!(entry.pick_time.as_deref(), Some("2025-12-16T15:00:00Z"));
        assert!(entry.final_score.is_none());
        assert_eq!(history.find("g0").unwrap().pick, "Over 140");
        assert_eq!(history.persist_count(), 1);
    }
}
