use std::fmt;
use std::fs;

use tracing::{debug, info, warn};

use crate::history::UndoLogEntry;

/// A reversal that could not be completed. The rest of the log is still
/// processed.
#[derive(Debug, Clone)]
pub struct UndoFailure {
    /// Name of the file the reversal started from
    pub file_name: String,
    /// Underlying I/O error text
    pub message: String,
}

impl fmt::Display for UndoFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Failed to undo '{}': {}", self.file_name, self.message)
    }
}

/// Outcome of one undo pass. `total` counts every entry in the log,
/// including skipped ones.
#[derive(Debug)]
pub struct UndoReport {
    pub reverted: usize,
    pub total: usize,
    pub failures: Vec<UndoFailure>,
}

impl UndoReport {
    pub fn summary(&self) -> String {
        format!("Undo complete. Reverted {}/{}.", self.reverted, self.total)
    }
}

/// Reverse a batch of renames, last entry first.
///
/// A reversal runs only if the renamed-to path still exists and the original
/// path is free; anything else is skipped silently (already reverted,
/// renamed again since, or the original name got reused). Per-entry failures
/// are collected without stopping the pass, so re-running undo on the same
/// log is always safe.
pub fn undo_renames(entries: &[UndoLogEntry]) -> UndoReport {
    let total = entries.len();
    let mut reverted = 0;
    let mut failures = Vec::new();

    info!(total, "Undoing renames");

    for entry in entries.iter().rev() {
        if !entry.to.exists() || entry.from.exists() {
            debug!(from = ?entry.to, to = ?entry.from, "Skipping unsafe reversal");
            continue;
        }

        match fs::rename(&entry.to, &entry.from) {
            Ok(()) => {
                debug!(from = ?entry.to, to = ?entry.from, "Reverted");
                reverted += 1;
            }
            Err(e) => {
                let file_name = entry
                    .to
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_else(|| entry.to.display().to_string());
                warn!(file = %file_name, error = %e, "Undo failed, continuing");
                failures.push(UndoFailure {
                    file_name,
                    message: e.to_string(),
                });
            }
        }
    }

    info!(reverted, total, "Undo finished");

    UndoReport {
        reverted,
        total,
        failures,
    }
}
