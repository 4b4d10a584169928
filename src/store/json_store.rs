use super::{upsert_entry, GameStore, HistoryStore};
use crate::error::{Result, TrackerError};
use crate::models::{Game, GamesFile, HistoryEntry};
use crate::utils::data::{load_json, save_json};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Games document on disk, loaded once
#[derive(Debug, Clone)]
pub struct JsonGameStore {
    file: GamesFile,
}

impl JsonGameStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file: GamesFile = load_json(path)?;
        debug!(path = %path.display(), games = file.games.len(), "loaded games");
        Ok(Self { file })
    }

    /// Open the games document, treating a missing file as no games
    pub fn open_or_empty(path: impl AsRef<Path>) -> Result<Self> {
        match Self::open(path.as_ref()) {
            Err(TrackerError::StoreNotFound(_)) => Ok(Self {
                file: GamesFile::default(),
            }),
            other => other,
        }
    }
}

impl GameStore for JsonGameStore {
    fn find(&self, game_id: &str) -> Option<&Game> {
        self.file.games.iter().find(|g| g.game_id == game_id)
    }
}

/// History ledger stored as a JSON array, rewritten whole on persist
///
/// There is no locking: two processes persisting the same file race and the
/// last writer wins.
#[derive(Debug, Clone)]
pub struct JsonHistoryStore {
    path: PathBuf,
    entries: Vec<HistoryEntry>,
}

impl JsonHistoryStore {
    /// Open an existing ledger; a missing file is `StoreNotFound`
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let entries: Vec<HistoryEntry> = load_json(&path)?;
        debug!(path = %path.display(), entries = entries.len(), "loaded history");
        Ok(Self { path, entries })
    }

    /// Open a ledger, starting empty if the file does not exist yet
    pub fn open_or_empty(path: impl AsRef<Path>) -> Result<Self> {
        match Self::open(path.as_ref()) {
            Err(TrackerError::StoreNotFound(path)) => Ok(Self {
                path,
                entries: Vec::new(),
            }),
            other => other,
        }
    }
}

impl HistoryStore for JsonHistoryStore {
    fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    fn upsert(&mut self, entry: HistoryEntry) {
        upsert_entry(&mut self.entries, entry);
    }

    fn persist(&self) -> Result<()> {
        save_json(&self.path, &self.entries)?;
        debug!(path = %self.path.display(), entries = self.entries.len(), "saved history");
        Ok(())
    }
}
