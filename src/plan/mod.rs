mod types;

pub use types::{NameOverrides, RenameOp, RenamePlan};

use std::path::{Path, PathBuf};
use tracing::debug;

use crate::naming::build_new_name;

/// Zip ordered files with computed episode names.
///
/// Episode numbers follow input order (`start_episode + index`), so callers
/// sort before planning. A file already carrying its target name becomes a
/// no-op, never an error.
pub fn plan_changes(
    files: Vec<PathBuf>,
    season: u32,
    start_episode: u32,
    keep_titles: bool,
) -> RenamePlan {
    let mut ops = Vec::with_capacity(files.len());

    for (index, source) in files.into_iter().enumerate() {
        let episode = start_episode + index as u32;
        let original_name = source
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        let ext = extension_of(&source);
        let new_name = build_new_name(season, episode, &ext, keep_titles, &original_name);
        ops.push(RenameOp::new(source, new_name));
    }

    debug!(
        count = ops.len(),
        season, start_episode, "Built rename plan"
    );

    RenamePlan {
        season,
        start_episode,
        ops,
    }
}

/// Merge replacement names into a plan.
///
/// Pure transform: an overridden row takes the replacement name verbatim
/// (keeping the source's parent directory), every other row is untouched.
/// Indices past the end of the plan are ignored.
pub fn apply_overrides(plan: RenamePlan, overrides: &NameOverrides) -> RenamePlan {
    if overrides.is_empty() {
        return plan;
    }

    let RenamePlan {
        season,
        start_episode,
        ops,
    } = plan;

    let ops = ops
        .into_iter()
        .enumerate()
        .map(|(index, op)| match overrides.get(index) {
            Some(name) => {
                debug!(index, name = %name, "Overriding planned name");
                RenameOp::new(op.source, name.to_string())
            }
            None => op,
        })
        .collect();

    RenamePlan {
        season,
        start_episode,
        ops,
    }
}

fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{ext}"))
        .unwrap_or_default()
}
