use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use chrono::Utc;
use tracing::{info, warn};

use super::types::*;

/// Error types for undo-log operations
#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    #[error("Failed to write undo log: {0}")]
    WriteError(#[from] std::io::Error),

    #[error("Failed to serialize undo log: {0}")]
    SerializeError(#[from] serde_json::Error),

    #[error("Failed to read undo log: {0}")]
    ReadError(String),
}

/// Persist one apply batch's successful renames as a new timestamped log in
/// `target_dir`, returning the path written.
pub fn write_undo_log(
    entries: &[UndoLogEntry],
    target_dir: &Path,
) -> Result<PathBuf, HistoryError> {
    write_at_timestamp(entries, target_dir, Utc::now().timestamp())
}

fn write_at_timestamp(
    entries: &[UndoLogEntry],
    target_dir: &Path,
    timestamp: i64,
) -> Result<PathBuf, HistoryError> {
    // Two batches in the same second collide on the filename; bump until
    // free so the name stays within the scheme.
    let mut timestamp = timestamp;
    let mut file_path = target_dir.join(log_filename(timestamp));
    while file_path.exists() {
        warn!("Undo log already exists: {:?}", file_path);
        timestamp += 1;
        file_path = target_dir.join(log_filename(timestamp));
    }

    write_to_path(entries, &file_path)
}

fn write_to_path(entries: &[UndoLogEntry], path: &Path) -> Result<PathBuf, HistoryError> {
    // Write to temporary file first
    let temp_path = path.with_extension("json.tmp");

    {
        let file = File::create(&temp_path)?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, entries)?;
    }

    // Atomic rename
    fs::rename(&temp_path, path)?;

    info!("Undo log written to: {:?}", path);

    Ok(path.to_path_buf())
}
