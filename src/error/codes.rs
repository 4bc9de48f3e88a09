#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    Success = 0,
    GeneralError = 1,
    InvalidArguments = 2,
    FolderNotFound = 3,
    ConflictsDetected = 4,
    NothingToRename = 5,
    HistoryError = 6,
    PartialFailure = 7,
    PermissionError = 8,
    Canceled = 9,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}
