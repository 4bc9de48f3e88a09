mod codes;

pub use codes::ExitCode;

use crate::scanner::ScanError;
use crate::validator::Conflict;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Folder not found: {path}")]
    FolderNotFound { path: PathBuf },

    #[error("Path is not a folder: {path}")]
    NotAFolder { path: PathBuf },

    #[error("Permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    #[error("No video files found in {path}")]
    NothingToRename { path: PathBuf },

    #[error("Conflicts detected")]
    ConflictsDetected { conflicts: Vec<Conflict> },

    #[error("Undo log error: {message}")]
    HistoryError {
        path: Option<PathBuf>,
        message: String,
    },

    #[error("No undo log found")]
    NoUndoLog,

    #[error("Invalid override '{value}': {reason}")]
    InvalidOverride { value: String, reason: String },

    #[error("{0}")]
    Other(String),
}

impl AppError {
    pub fn exit_code(&self) -> ExitCode {
        match self {
            AppError::FolderNotFound { .. } => ExitCode::FolderNotFound,
            AppError::NotAFolder { .. } => ExitCode::FolderNotFound,
            AppError::PermissionDenied { .. } => ExitCode::PermissionError,
            AppError::NothingToRename { .. } => ExitCode::NothingToRename,
            AppError::ConflictsDetected { .. } => ExitCode::ConflictsDetected,
            AppError::HistoryError { .. } => ExitCode::HistoryError,
            AppError::NoUndoLog => ExitCode::HistoryError,
            AppError::InvalidOverride { .. } => ExitCode::InvalidArguments,
            AppError::Other(_) => ExitCode::GeneralError,
        }
    }

    pub fn detailed_message(&self) -> String {
        match self {
            AppError::FolderNotFound { path } => {
                format!(
                    "The specified folder does not exist:\n  {}\n\n\
                     Please verify the path and try again.",
                    path.display()
                )
            }

            AppError::NotAFolder { path } => {
                format!(
                    "The specified path is not a folder:\n  {}\n\n\
                     Please provide the season folder containing the video files.",
                    path.display()
                )
            }

            AppError::PermissionDenied { path } => {
                format!(
                    "Permission denied when accessing:\n  {}\n\n\
                     Please check file permissions or run with appropriate privileges.",
                    path.display()
                )
            }

            AppError::NothingToRename { path } => {
                format!(
                    "No video files found in:\n  {}\n\n\
                     Recognized extensions: mp4, mkv, avi, mov, m4v, wmv, flv, webm.\n\
                     Use --recurse to include files in subfolders.",
                    path.display()
                )
            }

            AppError::ConflictsDetected { conflicts } => {
                let mut msg = String::from("Conflicts detected:\n");
                for conflict in conflicts {
                    msg.push_str(&format!("  - {}\n", conflict));
                }
                msg.push_str(
                    "\nNo files were changed. Resolve the conflicts or edit the\n\
                     new names with --override and run again.",
                );
                msg
            }

            AppError::HistoryError { path, message } => {
                let path_info = path
                    .as_ref()
                    .map(|p| format!("File: {}\n", p.display()))
                    .unwrap_or_default();

                format!(
                    "Undo log error:\n  {}\n{}\n\
                     Ensure the log file exists and is valid JSON.",
                    message, path_info
                )
            }

            AppError::NoUndoLog => String::from(
                "No undo log found.\n\n\
                 Logs are written into the renamed folder as\n\
                 _rename_log_<timestamp>.json; pass one explicitly with\n\
                 --undo <LOG> or run an apply first.",
            ),

            AppError::InvalidOverride { value, reason } => {
                format!(
                    "Invalid override '{}':\n  {}\n\n\
                     Expected N=NEW_NAME where N is a 1-based preview row,\n\
                     e.g. --override \"3=S01E03 - Finale.mkv\".",
                    value, reason
                )
            }

            AppError::Other(message) => message.clone(),
        }
    }
}

impl From<ScanError> for AppError {
    fn from(err: ScanError) -> Self {
        match err {
            ScanError::PathNotFound(path) => AppError::FolderNotFound { path },
            ScanError::NotAFolder(path) => AppError::NotAFolder { path },
            ScanError::PermissionDenied(path) => AppError::PermissionDenied { path },
            ScanError::Walk(e) => AppError::Other(format!("Failed to scan folder: {}", e)),
        }
    }
}
