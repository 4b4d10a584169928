//! Repository interfaces over the games and history documents.
//!
//! Settlement only talks to these traits, never to a file format.

pub mod json_store;
pub mod memory_store;

pub use json_store::{JsonGameStore, JsonHistoryStore};
pub use memory_store::{MemoryGameStore, MemoryHistoryStore};

use crate::error::Result;
use crate::models::{Game, HistoryEntry};

/// Read-only games keyed by `game_id`
pub trait GameStore {
    fn find(&self, game_id: &str) -> Option<&Game>;
}

/// Read-modify-write history ledger
pub trait HistoryStore {
    fn entries(&self) -> &[HistoryEntry];

    fn find(&self, game_id: &str) -> Option<&HistoryEntry> {
        self.entries().iter().find(|e| e.game_id == game_id)
    }

    /// Replace the entry with the same `game_id` in place, or append it
    fn upsert(&mut self, entry: HistoryEntry);

    /// Write the whole collection back
    fn persist(&self) -> Result<()>;
}

/// Shared by both history stores
pub(crate) fn upsert_entry(entries: &mut Vec<HistoryEntry>, entry: HistoryEntry) {
    match entries.iter_mut().find(|e| e.game_id == entry.game_id) {
        Some(existing) => *existing = entry,
        None => entries.push(entry),
    }
}
