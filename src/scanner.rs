use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, trace};
use walkdir::WalkDir;

/// Extensions (compared case-insensitively) that mark a file as an episode
/// candidate.
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mkv", "avi", "mov", "m4v", "wmv", "flv", "webm"];

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Folder does not exist: {0}")]
    PathNotFound(PathBuf),

    #[error("Path is not a folder: {0}")]
    NotAFolder(PathBuf),

    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    #[error("Failed to read folder: {0}")]
    Walk(#[from] walkdir::Error),
}

/// Whether a path carries one of the known video extensions.
pub fn is_video_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map_or(false, |ext| {
            VIDEO_EXTENSIONS.iter().any(|v| ext.eq_ignore_ascii_case(v))
        })
}

/// Enumerate video files under `folder`.
///
/// Direct children only unless `recurse` is set. The result is unordered;
/// callers sort before planning. Unreadable folders surface as errors rather
/// than being skipped.
pub fn scan_media_files(folder: &Path, recurse: bool) -> Result<Vec<PathBuf>, ScanError> {
    debug!(path = ?folder, recurse, "Scanning for video files");

    if !folder.exists() {
        return Err(ScanError::PathNotFound(folder.to_path_buf()));
    }

    if !folder.is_dir() {
        return Err(ScanError::NotAFolder(folder.to_path_buf()));
    }

    let max_depth = if recurse { usize::MAX } else { 1 };
    let mut files = Vec::new();

    for entry in WalkDir::new(folder).min_depth(1).max_depth(max_depth) {
        let entry = entry.map_err(|e| {
            let path = e
                .path()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| folder.to_path_buf());
            match e.io_error() {
                Some(io) if io.kind() == std::io::ErrorKind::PermissionDenied => {
                    ScanError::PermissionDenied(path)
                }
                _ => ScanError::Walk(e),
            }
        })?;

        // Stat the target so a symlinked episode still counts as a file.
        if !entry.path().is_file() {
            trace!(path = ?entry.path(), "Skipping non-file entry");
            continue;
        }

        let path = entry.into_path();
        if is_video_file(&path) {
            trace!(path = ?path, "Found video file");
            files.push(path);
        }
    }

    debug!(count = files.len(), "Scan complete");

    Ok(files)
}
