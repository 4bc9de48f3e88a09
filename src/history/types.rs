use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// Undo log naming: _rename_log_<unix_timestamp>.json, written into the
// renamed folder itself so the log travels with the files.
static LOG_NAME_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^_rename_log_(\d+)\.json$").unwrap());

/// One successful rename, as persisted in the undo log.
///
/// The wire format is a bare JSON array of `{"from": ..., "to": ...}`
/// objects; logs written by earlier versions of the tool stay readable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UndoLogEntry {
    /// Path the file had before the rename
    pub from: PathBuf,

    /// Path the file was renamed to
    pub to: PathBuf,
}

impl UndoLogEntry {
    pub fn new(from: PathBuf, to: PathBuf) -> Self {
        Self { from, to }
    }
}

/// Log filename for a given unix timestamp.
pub fn log_filename(timestamp: i64) -> String {
    format!("_rename_log_{}.json", timestamp)
}

/// Extract the unix timestamp from an undo-log filename, if it is one.
pub fn parse_log_timestamp(filename: &str) -> Option<i64> {
    LOG_NAME_REGEX
        .captures(filename)?
        .get(1)?
        .as_str()
        .parse()
        .ok()
}
