use crate::error::{Result, TrackerError};
use crate::models::HistoryEntry;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Number;
use std::path::Path;

/// Read and deserialize a JSON document
pub fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let json = std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            TrackerError::StoreNotFound(path.to_path_buf())
        } else {
            TrackerError::Io {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;
    serde_json::from_str(&json).map_err(|source| TrackerError::InvalidJson {
        path: path.to_path_buf(),
        source,
    })
}

/// Write a JSON document (2-space pretty) by replacing the whole file
///
/// The body goes to a sibling `.tmp` file first and is renamed over the
/// target, so readers see either the old document or the new one.
pub fn save_json<T: Serialize + ?Sized>(path: &Path, data: &T) -> Result<()> {
    let io_err = |source| TrackerError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }
    let body = serde_json::to_string_pretty(data).map_err(|source| TrackerError::InvalidJson {
        path: path.to_path_buf(),
        source,
    })?;
    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, body).map_err(io_err)?;
    std::fs::rename(&tmp, path).map_err(io_err)?;
    Ok(())
}

#[derive(Debug, Serialize)]
struct HistoryCsvRow<'a> {
    game_id: &'a str,
    sport: &'a str,
    game: &'a str,
    pick: &'a str,
    odds: Option<&'a Number>,
    confidence: &'a str,
    game_time: &'a str,
    result: String,
    final_score: &'a str,
}

/// Save the history ledger to CSV
pub fn save_history_to_csv(entries: &[HistoryEntry], filename: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(filename)?;

    for entry in entries {
        writer.serialize(HistoryCsvRow {
            game_id: &entry.game_id,
            sport: entry.sport.as_deref().unwrap_or_default(),
            game: &entry.game,
            pick: &entry.pick,
            odds: entry.odds.as_ref(),
            confidence: entry.confidence.as_deref().unwrap_or_default(),
            game_time: entry.game_time.as_deref().unwrap_or_default(),
            result: entry.result.to_string(),
            final_score: entry.final_score.as_deref().unwrap_or_default(),
        })?;
    }

    writer.flush().map_err(|source| TrackerError::Io {
        path: filename.to_path_buf(),
        source,
    })?;
    Ok(())
}
