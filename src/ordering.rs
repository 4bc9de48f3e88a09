use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{trace, warn};

/// Which filesystem timestamp drives episode numbering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Last modification time. The safer default since every platform
    /// reports it.
    #[default]
    Modified,
    /// Creation time, falling back to modification time where the
    /// filesystem does not record it.
    Created,
}

/// Sort files into episode order: timestamp first, then the file name
/// lowercased as a tiebreaker so equal timestamps still order
/// deterministically.
pub fn sort_files_by_time(mut files: Vec<PathBuf>, key: SortKey) -> Vec<PathBuf> {
    files.sort_by_cached_key(|path| (timestamp(path, key), name_key(path)));
    files
}

fn timestamp(path: &Path, key: SortKey) -> SystemTime {
    let meta = match path.metadata() {
        Ok(meta) => meta,
        Err(e) => {
            warn!(path = ?path, error = %e, "Failed to read metadata, ordering as oldest");
            return UNIX_EPOCH;
        }
    };

    let ts = match key {
        SortKey::Created => meta.created().or_else(|_| meta.modified()),
        SortKey::Modified => meta.modified(),
    };

    ts.unwrap_or_else(|e| {
        trace!(path = ?path, error = %e, "Timestamp unavailable, ordering as oldest");
        UNIX_EPOCH
    })
}

fn name_key(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_lowercase())
        .unwrap_or_default()
}
