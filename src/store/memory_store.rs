use super::{upsert_entry, GameStore, HistoryStore};
use crate::error::Result;
use crate::models::{Game, HistoryEntry};
use std::cell::Cell;

#[derive(Debug, Clone, Default)]
pub struct MemoryGameStore {
    pub games: Vec<Game>,
}

impl MemoryGameStore {
    pub fn new(games: Vec<Game>) -> Self {
        Self { games }
    }
}

impl GameStore for MemoryGameStore {
    fn find(&self, game_id: &str) -> Option<&Game> {
        self.games.iter().find(|g| g.game_id == game_id)
    }
}

/// In-memory ledger; counts how many times it was persisted
#[derive(Debug, Clone, Default)]
pub struct MemoryHistoryStore {
    pub entries: Vec<HistoryEntry>,
    persisted: Cell<usize>,
}

impl MemoryHistoryStore {
    pub fn new(entries: Vec<HistoryEntry>) -> Self {
        Self {
            entries,
            persisted: Cell::new(0),
        }
    }

    pub fn persist_count(&self) -> usize {
        self.persisted.get()
    }
}

impl HistoryStore for MemoryHistoryStore {
    fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    fn upsert(&mut self, entry: HistoryEntry) {
        upsert_entry(&mut self.entries, entry);
    }

    fn persist(&self) -> Result<()> {
        self.persisted.set(self.persisted.get() + 1);
        Ok(())
    }
}
