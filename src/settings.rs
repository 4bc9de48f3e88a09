use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::ordering::SortKey;

/// Persisted preferences. Best-effort on both ends: unreadable or corrupt
/// settings load as defaults, and a failed save never fails the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub season: u32,
    pub start: u32,
    pub recurse: bool,
    pub use_ctime: bool,
    pub keep_titles: bool,
    /// Undo log written by the most recent apply. Set on successful apply,
    /// read on undo, never auto-cleared.
    pub last_log: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            season: 1,
            start: 1,
            recurse: false,
            use_ctime: false,
            keep_titles: true,
            last_log: None,
        }
    }
}

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    SerializeError(#[from] serde_json::Error),
}

/// Default on-disk location: `<config_dir>/episode-renamer/settings.json`.
pub fn settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("episode-renamer").join("settings.json"))
}

impl Settings {
    /// Load settings from disk, falling back to defaults on any failure.
    pub fn load(path: &Path) -> Self {
        match Self::read_file(path) {
            Ok(settings) => {
                debug!(path = ?path, "Loaded settings");
                settings
            }
            Err(SettingsError::IoError(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No settings file found, using defaults");
                Self::default()
            }
            Err(e) => {
                warn!("Failed to load settings: {}, using defaults", e);
                Self::default()
            }
        }
    }

    fn read_file(path: &Path) -> Result<Self, SettingsError> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        Ok(serde_json::from_reader(reader)?)
    }

    /// Save settings atomically (temp file then rename), creating the parent
    /// directory if needed. Callers treat failures as warnings.
    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let temp_path = path.with_extension("json.tmp");

        {
            let file = File::create(&temp_path)?;
            let writer = BufWriter::new(file);
            serde_json::to_writer_pretty(writer, self)?;
        }

        fs::rename(&temp_path, path)?;

        info!(path = ?path, "Settings saved");
        Ok(())
    }

    /// The sort key the persisted flags select.
    pub fn sort_key(&self) -> SortKey {
        if self.use_ctime {
            SortKey::Created
        } else {
            SortKey::Modified
        }
    }
}
