use std::collections::BTreeMap;
use std::path::PathBuf;

/// A single planned rename
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameOp {
    /// Full path to the source file
    pub source: PathBuf,
    /// Current file name
    pub source_name: String,
    /// Full path the file would be renamed to (same parent as the source)
    pub destination: PathBuf,
    /// Proposed file name
    pub new_name: String,
}

impl RenameOp {
    pub fn new(source: PathBuf, new_name: String) -> Self {
        let source_name = source
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        let destination = source
            .parent()
            .map(|p| p.join(&new_name))
            .unwrap_or_else(|| PathBuf::from(&new_name));

        Self {
            source,
            source_name,
            destination,
            new_name,
        }
    }

    /// The file already carries its final name; apply skips it silently.
    pub fn is_noop(&self) -> bool {
        self.source == self.destination
    }
}

/// Proposed renames for one preview cycle, index-aligned with episode
/// numbers (`episode = start_episode + index`).
#[derive(Debug, Clone)]
pub struct RenamePlan {
    pub season: u32,
    pub start_episode: u32,
    pub ops: Vec<RenameOp>,
}

impl RenamePlan {
    pub fn episode_number(&self, index: usize) -> u32 {
        self.start_episode + index as u32
    }

    /// Ops that would actually touch the filesystem.
    pub fn change_count(&self) -> usize {
        self.ops.iter().filter(|op| !op.is_noop()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }
}

/// Operator-supplied replacement names, keyed by 0-based plan index.
/// Sparse: rows without an entry keep their computed name.
#[derive(Debug, Clone, Default)]
pub struct NameOverrides {
    entries: BTreeMap<usize, String>,
}

impl NameOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, index: usize, name: impl Into<String>) {
        self.entries.insert(index, name.into());
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.entries.get(&index).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rename_op_new() {
        let op = RenameOp::new(
            PathBuf::from("/season/old name.mkv"),
            "S01E01 - old name.mkv".to_string(),
        );

        assert_eq!(op.source_name, "old name.mkv");
        assert_eq!(op.new_name, "S01E01 - old name.mkv");
        assert_eq!(
            op.destination,
            PathBuf::from("/season/S01E01 - old name.mkv")
        );
        assert!(!op.is_noop());
    }

    #[test]
    fn test_noop_when_name_unchanged() {
        let op = RenameOp::new(
            PathBuf::from("/season/S01E01.mkv"),
            "S01E01.mkv".to_string(),
        );

        assert!(op.is_noop());
    }

    #[test]
    fn test_plan_episode_numbers() {
        let plan = RenamePlan {
            season: 1,
            start_episode: 5,
            ops: Vec::new(),
        };

        assert_eq!(plan.episode_number(0), 5);
        assert_eq!(plan.episode_number(2), 7);
    }

    #[test]
    fn test_change_count_skips_noops() {
        let plan = RenamePlan {
            season: 1,
            start_episode: 1,
            ops: vec![
                RenameOp::new(PathBuf::from("/s/S01E01.mkv"), "S01E01.mkv".to_string()),
                RenameOp::new(PathBuf::from("/s/b.mkv"), "S01E02.mkv".to_string()),
            ],
        };

        assert_eq!(plan.len(), 2);
        assert_eq!(plan.change_count(), 1);
    }

    #[test]
    fn test_overrides_are_sparse() {
        let mut overrides = NameOverrides::new();
        assert!(overrides.is_empty());

        overrides.set(2, "Pilot.mkv");

        assert_eq!(overrides.len(), 1);
        assert_eq!(overrides.get(2), Some("Pilot.mkv"));
        assert_eq!(overrides.get(0), None);
    }
}
