use std::fmt;
use std::path::PathBuf;

/// A reason a plan must not be applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Conflict {
    /// The destination already exists on disk and is some other file than
    /// the op's own source.
    WouldOverwrite { destination: PathBuf },

    /// Two or more distinct sources map to the same resolved destination.
    DuplicateTarget {
        destination: PathBuf,
        sources: Vec<PathBuf>,
    },
}

impl fmt::Display for Conflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Conflict::WouldOverwrite { destination } => {
                write!(f, "Would overwrite: {}", destination.display())
            }
            Conflict::DuplicateTarget { destination, .. } => {
                write!(
                    f,
                    "Multiple sources mapped to same target: {}",
                    destination.display()
                )
            }
        }
    }
}

/// Outcome of checking a plan. Applying is allowed only when no conflicts
/// were found.
#[derive(Debug, Default)]
pub struct ValidationReport {
    pub conflicts: Vec<Conflict>,
}

impl ValidationReport {
    pub fn is_ok(&self) -> bool {
        self.conflicts.is_empty()
    }

    pub fn format_error_message(&self) -> String {
        let mut msg = String::new();
        for conflict in &self.conflicts {
            msg.push_str(&format!("  - {}\n", conflict));
        }
        msg
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conflict_display() {
        let overwrite = Conflict::WouldOverwrite {
            destination: PathBuf::from("/season/S01E01.mkv"),
        };
        assert_eq!(
            overwrite.to_string(),
            "Would overwrite: /season/S01E01.mkv"
        );

        let duplicate = Conflict::DuplicateTarget {
            destination: PathBuf::from("/season/S01E02.mkv"),
            sources: vec![
                PathBuf::from("/season/a.mkv"),
                PathBuf::from("/season/b.mkv"),
            ],
        };
        assert_eq!(
            duplicate.to_string(),
            "Multiple sources mapped to same target: /season/S01E02.mkv"
        );
    }

    #[test]
    fn test_empty_report_is_ok() {
        let report = ValidationReport::default();
        assert!(report.is_ok());
        assert!(report.format_error_message().is_empty());
    }
}
