use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};

use tracing::warn;

use super::types::*;
use super::writer::HistoryError;

/// Read and parse an undo log.
pub fn read_undo_log(path: &Path) -> Result<Vec<UndoLogEntry>, HistoryError> {
    let file = File::open(path)
        .map_err(|e| HistoryError::ReadError(format!("Cannot open file: {}", e)))?;

    let reader = BufReader::new(file);
    let entries: Vec<UndoLogEntry> = serde_json::from_reader(reader)
        .map_err(|e| HistoryError::ReadError(format!("Invalid JSON: {}", e)))?;

    Ok(entries)
}

/// Find the most recent undo log in `folder`, comparing the embedded unix
/// timestamps numerically. Best-effort: an unreadable folder yields `None`.
pub fn find_latest_undo_log(folder: &Path) -> Option<PathBuf> {
    let read_dir = match fs::read_dir(folder) {
        Ok(rd) => rd,
        Err(e) => {
            warn!(path = ?folder, error = %e, "Cannot search folder for undo logs");
            return None;
        }
    };

    read_dir
        .flatten()
        .filter_map(|entry| {
            let name = entry.file_name().to_string_lossy().to_string();
            parse_log_timestamp(&name).map(|ts| (ts, entry.path()))
        })
        .max_by_key(|(ts, _)| *ts)
        .map(|(_, path)| path)
}
