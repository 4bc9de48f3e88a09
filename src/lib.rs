pub mod apply;
pub mod error;
pub mod history;
pub mod naming;
pub mod ordering;
pub mod plan;
pub mod scanner;
pub mod settings;
pub mod undo;
pub mod validator;

pub use apply::{apply_plan, ApplyReport, RenameFailure};
pub use error::{AppError, ExitCode};
pub use history::{
    find_latest_undo_log, read_undo_log, write_undo_log, HistoryError, UndoLogEntry,
};
pub use naming::{build_new_name, episode_tag};
pub use ordering::{sort_files_by_time, SortKey};
pub use plan::{apply_overrides, plan_changes, NameOverrides, RenameOp, RenamePlan};
pub use scanner::{scan_media_files, ScanError, VIDEO_EXTENSIONS};
pub use settings::{settings_path, Settings};
pub use undo::{undo_renames, UndoFailure, UndoReport};
pub use validator::{validate_plan, Conflict, ValidationReport};
