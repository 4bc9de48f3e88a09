mod types;

pub use types::{Conflict, ValidationReport};

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::plan::RenameOp;

/// Check a plan for renames that would destroy data.
///
/// Two classes, both reported in full: a destination that already exists on
/// disk (other than as the op's own source) and multiple sources mapping to
/// the same destination. No-ops are exempt. Read-only; callers re-run this
/// immediately before applying.
pub fn validate_plan(ops: &[RenameOp]) -> ValidationReport {
    let mut report = ValidationReport::default();

    // Resolved destination -> (planned destination, distinct resolved
    // sources, planned sources), in first-seen order.
    let mut groups: Vec<(PathBuf, Vec<PathBuf>, Vec<PathBuf>)> = Vec::new();
    let mut group_index: HashMap<PathBuf, usize> = HashMap::new();

    for op in ops {
        if op.is_noop() {
            continue;
        }

        let resolved_src = resolve_path(&op.source);
        let resolved_dst = resolve_path(&op.destination);

        if op.destination.exists() && resolved_dst != resolved_src {
            debug!(destination = ?op.destination, "Destination already exists");
            report.conflicts.push(Conflict::WouldOverwrite {
                destination: op.destination.clone(),
            });
        }

        let index = *group_index.entry(resolved_dst).or_insert_with(|| {
            groups.push((op.destination.clone(), Vec::new(), Vec::new()));
            groups.len() - 1
        });
        let (_, resolved_sources, sources) = &mut groups[index];
        if !resolved_sources.contains(&resolved_src) {
            resolved_sources.push(resolved_src);
            sources.push(op.source.clone());
        }
    }

    for (destination, resolved_sources, sources) in groups {
        if resolved_sources.len() > 1 {
            debug!(destination = ?destination, count = sources.len(), "Duplicate target");
            report.conflicts.push(Conflict::DuplicateTarget {
                destination,
                sources,
            });
        }
    }

    if report.is_ok() {
        debug!(count = ops.len(), "Plan validated, no conflicts");
    } else {
        warn!(conflicts = report.conflicts.len(), "Plan has conflicts");
    }

    report
}

/// Resolve a path for identity comparison.
///
/// Existing paths canonicalize fully (follows symlinks, yields on-disk
/// case). A planned-but-nonexistent destination resolves through its parent
/// so files inside a symlinked folder still compare equal.
fn resolve_path(path: &Path) -> PathBuf {
    if let Ok(resolved) = fs::canonicalize(path) {
        return resolved;
    }

    match (path.parent(), path.file_name()) {
        (Some(parent), Some(name)) => fs::canonicalize(parent)
            .map(|p| p.join(name))
            .unwrap_or_else(|_| path.to_path_buf()),
        _ => path.to_path_buf(),
    }
}
