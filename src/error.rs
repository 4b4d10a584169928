use std::path::PathBuf;
use thiserror::Error;

/// Everything that can stop a ledger operation
#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("config file not found at {}", .0.display())]
    ConfigMissing(PathBuf),

    #[error("{} not found", .0.display())]
    StoreNotFound(PathBuf),

    #[error("invalid JSON in {}: {source}", .path.display())]
    InvalidJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("game_id '{0}' not found in games store")]
    GameNotFound(String),

    #[error("{0}")]
    TeamMismatch(String),

    #[error("game_id '{0}' not found in history")]
    HistoryEntryNotFound(String),

    #[error("could not parse pick format: '{0}'")]
    UnparseablePick(String),

    #[error("could not determine if '{team}' is home or away in '{game}'")]
    RoleResolutionFailed { team: String, game: String },

    #[error("scores must be integers, got: {0}, {1}")]
    InvalidScoreFormat(String, String),

    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, TrackerError>;
