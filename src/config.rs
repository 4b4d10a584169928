use crate::error::{Result, TrackerError};
use crate::utils::data::load_json;
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "config.json";
pub const CONFIG_ENV_VAR: &str = "PICK_TRACKER_CONFIG";

/// Store locations as written in the config file
#[derive(Debug, Clone, Deserialize)]
pub struct PathsConfig {
    pub games: PathBuf,
    pub picks: PathBuf,
    pub history: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PendingConfig {
    /// Hours after tip-off before a game counts as finished
    #[serde(default = "default_settle_delay_hours")]
    pub settle_delay_hours: i64,
}

fn default_settle_delay_hours() -> i64 {
    3
}

impl Default for PendingConfig {
    fn default() -> Self {
        Self {
            settle_delay_hours: default_settle_delay_hours(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct RawConfig {
    paths: PathsConfig,
    #[serde(default)]
    pending: PendingConfig,
}

/// Resolved configuration handed to every ledger operation
#[derive(Debug, Clone)]
pub struct Config {
    pub games_path: PathBuf,
    pub picks_path: PathBuf,
    pub history_path: PathBuf,
    pub pending: PendingConfig,
}

impl Config {
    /// Load a config file; relative store paths resolve against its directory
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(TrackerError::ConfigMissing(path.to_path_buf()));
        }
        let raw: RawConfig = load_json(path)?;
        let base = path.parent().unwrap_or_else(|| Path::new("."));

        Ok(Self {
            games_path: base.join(raw.paths.games),
            picks_path: base.join(raw.paths.picks),
            history_path: base.join(raw.paths.history),
            pending: raw.pending,
        })
    }

    /// Build a config with all stores under one directory
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            games_path: dir.join("games.json"),
            picks_path: dir.join("picks.json"),
            history_path: dir.join("history.json"),
            pending: PendingConfig::default(),
        }
    }
}
