use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, info, warn};

use crate::history::{write_undo_log, UndoLogEntry};
use crate::plan::RenameOp;

/// A rename that could not be completed. The batch continues past it.
#[derive(Debug, Clone)]
pub struct RenameFailure {
    /// File name the rename started from
    pub source_name: String,
    /// Underlying I/O error text
    pub message: String,
}

impl fmt::Display for RenameFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Failed to rename '{}': {}", self.source_name, self.message)
    }
}

/// Outcome of one apply batch. Counts and the full failure list are
/// reported regardless of how the batch ended.
#[derive(Debug)]
pub struct ApplyReport {
    /// Renames that succeeded
    pub applied: usize,
    /// Non-no-op renames in the batch
    pub total: usize,
    /// The batch stopped early at the operator's request
    pub canceled: bool,
    /// Per-file errors; these never abort the batch
    pub failures: Vec<RenameFailure>,
    /// Undo log written for this batch, when at least one rename succeeded
    pub undo_log: Option<PathBuf>,
    /// The undo log could not be written (renames stay in place)
    pub log_error: Option<String>,
}

impl ApplyReport {
    pub fn summary(&self) -> String {
        if self.canceled {
            format!(
                "Canceled. Renamed {}/{} file(s) before cancel.",
                self.applied, self.total
            )
        } else {
            format!("Done. Renamed {}/{} file(s).", self.applied, self.total)
        }
    }
}

/// Execute a validated plan sequentially.
///
/// Per iteration: the cancellation flag is checked before starting another
/// rename, no-ops are skipped silently, and a failed rename is recorded and
/// stepped over. Progress `(applied, total)` is reported after every
/// attempted rename. Successful renames are persisted to a fresh undo log in
/// `target_dir` at the end of the batch; a log-write failure is reported in
/// the result without rolling anything back.
pub fn apply_plan<F>(
    ops: &[RenameOp],
    target_dir: &Path,
    cancel: &AtomicBool,
    mut on_progress: F,
) -> ApplyReport
where
    F: FnMut(usize, usize),
{
    let total = ops.iter().filter(|op| !op.is_noop()).count();
    let mut applied = 0;
    let mut canceled = false;
    let mut failures = Vec::new();
    let mut entries: Vec<UndoLogEntry> = Vec::new();

    info!(total, "Applying rename plan");

    for op in ops {
        if cancel.load(Ordering::SeqCst) {
            info!(applied, total, "Apply canceled");
            canceled = true;
            break;
        }

        if op.is_noop() {
            continue;
        }

        match fs::rename(&op.source, &op.destination) {
            Ok(()) => {
                debug!(from = %op.source_name, to = %op.new_name, "Renamed");
                entries.push(UndoLogEntry::new(op.source.clone(), op.destination.clone()));
                applied += 1;
            }
            Err(e) => {
                warn!(file = %op.source_name, error = %e, "Rename failed, continuing");
                failures.push(RenameFailure {
                    source_name: op.source_name.clone(),
                    message: e.to_string(),
                });
            }
        }

        on_progress(applied, total);
    }

    let mut undo_log = None;
    let mut log_error = None;

    if !entries.is_empty() {
        match write_undo_log(&entries, target_dir) {
            Ok(path) => undo_log = Some(path),
            Err(e) => {
                warn!(error = %e, "Failed to write undo log");
                log_error = Some(e.to_string());
            }
        }
    }

    ApplyReport {
        applied,
        total,
        canceled,
        failures,
        undo_log,
        log_error,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::read_undo_log;
    use tempfile::tempdir;

    fn make_ops(dir: &Path, renames: &[(&str, &str)]) -> Vec<RenameOp> {
        renames
            .iter()
            .map(|(from, to)| {
                fs::write(dir.join(from), b"x").unwrap();
                RenameOp::new(dir.join(from), to.to_string())
            })
            .collect()
    }

    fn no_progress(_applied: usize, _total: usize) {}

    #[test]
    fn test_applies_whole_plan() {
        let dir = tempdir().unwrap();
        let ops = make_ops(
            dir.path(),
            &[
                ("a.mkv", "S01E01.mkv"),
                ("b.mkv", "S01E02.mkv"),
                ("c.mkv", "S01E03.mkv"),
            ],
        );

        let cancel = AtomicBool::new(false);
        let report = apply_plan(&ops, dir.path(), &cancel, no_progress);

        assert_eq!(report.applied, 3);
        assert_eq!(report.total, 3);
        assert!(!report.canceled);
        assert!(report.failures.is_empty());
        assert!(report.log_error.is_none());
        for op in &ops {
            assert!(!op.source.exists());
            assert!(op.destination.exists());
        }

        let entries = read_undo_log(&report.undo_log.unwrap()).unwrap();
        assert_eq!(entries.len(), 3);
    }

    #[test]
    fn test_noops_are_skipped_silently() {
        let dir = tempdir().unwrap();
        let ops = make_ops(
            dir.path(),
            &[("S01E01.mkv", "S01E01.mkv"), ("b.mkv", "S01E02.mkv")],
        );

        let cancel = AtomicBool::new(false);
        let report = apply_plan(&ops, dir.path(), &cancel, no_progress);

        assert_eq!(report.total, 1);
        assert_eq!(report.applied, 1);
        assert!(dir.path().join("S01E01.mkv").exists());

        let entries = read_undo_log(&report.undo_log.unwrap()).unwrap();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_failure_does_not_abort_batch() {
        let dir = tempdir().unwrap();
        let ops = make_ops(
            dir.path(),
            &[
                ("e1.mkv", "S01E01.mkv"),
                ("e2.mkv", "S01E02.mkv"),
                ("e3.mkv", "S01E03.mkv"),
                ("e4.mkv", "S01E04.mkv"),
                ("e5.mkv", "S01E05.mkv"),
            ],
        );

        // Make the third rename fail.
        fs::remove_file(dir.path().join("e3.mkv")).unwrap();

        let cancel = AtomicBool::new(false);
        let report = apply_plan(&ops, dir.path(), &cancel, no_progress);

        assert_eq!(report.applied, 4);
        assert_eq!(report.total, 5);
        assert!(!report.canceled);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].source_name, "e3.mkv");
        assert!(report.failures[0].to_string().starts_with("Failed to rename 'e3.mkv':"));
        assert!(dir.path().join("S01E04.mkv").exists());
        assert!(dir.path().join("S01E05.mkv").exists());

        let entries = read_undo_log(&report.undo_log.unwrap()).unwrap();
        assert_eq!(entries.len(), 4);
    }

    #[test]
    fn test_cancel_stops_before_next_rename() {
        let dir = tempdir().unwrap();
        let ops = make_ops(
            dir.path(),
            &[
                ("e1.mkv", "S01E01.mkv"),
                ("e2.mkv", "S01E02.mkv"),
                ("e3.mkv", "S01E03.mkv"),
                ("e4.mkv", "S01E04.mkv"),
                ("e5.mkv", "S01E05.mkv"),
            ],
        );

        let cancel = AtomicBool::new(false);
        let report = apply_plan(&ops, dir.path(), &cancel, |applied, _total| {
            if applied == 2 {
                cancel.store(true, Ordering::SeqCst);
            }
        });

        assert!(report.canceled);
        assert_eq!(report.applied, 2);
        assert_eq!(report.total, 5);
        assert!(dir.path().join("S01E01.mkv").exists());
        assert!(dir.path().join("S01E02.mkv").exists());
        assert!(dir.path().join("e3.mkv").exists());
        assert!(dir.path().join("e4.mkv").exists());
        assert!(dir.path().join("e5.mkv").exists());

        let entries = read_undo_log(&report.undo_log.unwrap()).unwrap();
        assert_eq!(entries.len(), 2);
    }

    #[test]
    fn test_all_noop_plan_writes_no_log() {
        let dir = tempdir().unwrap();
        let ops = make_ops(
            dir.path(),
            &[("S01E01.mkv", "S01E01.mkv"), ("S01E02.mkv", "S01E02.mkv")],
        );

        let cancel = AtomicBool::new(false);
        let report = apply_plan(&ops, dir.path(), &cancel, no_progress);

        assert_eq!(report.applied, 0);
        assert_eq!(report.total, 0);
        assert!(report.undo_log.is_none());
        assert!(report.log_error.is_none());
    }

    #[test]
    fn test_failed_log_write_keeps_completed_renames() {
        let dir = tempdir().unwrap();
        let ops = make_ops(
            dir.path(),
            &[("a.mkv", "S01E01.mkv"), ("b.mkv", "S01E02.mkv")],
        );

        // Point the log at a folder that does not exist.
        let cancel = AtomicBool::new(false);
        let report = apply_plan(&ops, &dir.path().join("missing"), &cancel, no_progress);

        assert_eq!(report.applied, 2);
        assert_eq!(report.total, 2);
        assert!(report.failures.is_empty());
        assert!(report.undo_log.is_none());
        assert!(report.log_error.is_some());
        assert!(dir.path().join("S01E01.mkv").exists());
        assert!(dir.path().join("S01E02.mkv").exists());
    }

    #[test]
    fn test_progress_reported_after_each_attempt() {
        let dir = tempdir().unwrap();
        let ops = make_ops(
            dir.path(),
            &[
                ("e1.mkv", "S01E01.mkv"),
                ("e2.mkv", "S01E02.mkv"),
                ("e3.mkv", "S01E03.mkv"),
            ],
        );

        // Second rename will fail; progress still ticks for the attempt.
        fs::remove_file(dir.path().join("e2.mkv")).unwrap();

        let mut events = Vec::new();
        let cancel = AtomicBool::new(false);
        apply_plan(&ops, dir.path(), &cancel, |applied, total| {
            events.push((applied, total));
        });

        assert_eq!(events, vec![(1, 3), (1, 3), (2, 3)]);
    }

    #[test]
    fn test_summary_lines() {
        let done = ApplyReport {
            applied: 4,
            total: 5,
            canceled: false,
            failures: Vec::new(),
            undo_log: None,
            log_error: None,
        };
        assert_eq!(done.summary(), "Done. Renamed 4/5 file(s).");

        let canceled = ApplyReport {
            applied: 2,
            total: 5,
            canceled: true,
            failures: Vec::new(),
            undo_log: None,
            log_error: None,
        };
        assert_eq!(
            canceled.summary(),
            "Canceled. Renamed 2/5 file(s) before cancel."
        );
    }
}
