mod reader;
mod types;
mod writer;

pub use reader::{find_latest_undo_log, read_undo_log};
pub use types::{log_filename, parse_log_timestamp, UndoLogEntry};
pub use writer::{write_undo_log, HistoryError};
