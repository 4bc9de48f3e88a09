//! Transient status output on stderr.
//!
//! Final results (preview table, apply/undo summaries) go to stdout through
//! `output`; this reporter covers the in-flight phases. In verbose mode it
//! stays quiet because tracing already narrates every step.

use colored::Colorize;
use std::io::{self, IsTerminal, Write};
use std::path::Path;

/// Progress reporter for user-facing status updates
pub struct Progress {
    writer: Box<dyn Write>,
    /// When true, all output is suppressed (verbose mode uses tracing instead)
    silent: bool,
    /// When true, output is colorized
    colors_enabled: bool,
}

/// Check if we should use colors in output
fn should_use_colors() -> bool {
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }
    if std::env::var("FORCE_COLOR").is_ok() {
        return true;
    }
    io::stderr().is_terminal()
}

impl Progress {
    /// Create a reporter writing to stderr.
    /// When `verbose` is true, output is suppressed (tracing handles it).
    pub fn new(verbose: bool) -> Self {
        Self {
            writer: Box::new(io::stderr()),
            silent: verbose,
            colors_enabled: should_use_colors(),
        }
    }

    /// Create a progress reporter with a custom writer (for testing)
    #[cfg(test)]
    pub fn with_writer(writer: Box<dyn Write>) -> Self {
        Self {
            writer,
            silent: false,
            colors_enabled: false,
        }
    }

    /// Report the start of a folder scan (completion continues the line)
    pub fn scan_start(&mut self, folder: &Path) {
        if self.silent {
            return;
        }
        if self.colors_enabled {
            let _ = write!(
                self.writer,
                "{}",
                format!("Scanning {}...", folder.display()).dimmed()
            );
        } else {
            let _ = write!(self.writer, "Scanning {}...", folder.display());
        }
        let _ = self.writer.flush();
    }

    /// Report scan complete (same line)
    pub fn scan_complete(&mut self, count: usize) {
        if self.silent {
            return;
        }
        if self.colors_enabled {
            let _ = writeln!(
                self.writer,
                " {}",
                format!("{} video file(s)", count).green()
            );
        } else {
            let _ = writeln!(self.writer, " {} video file(s)", count);
        }
    }

    /// Report the start of an apply batch
    pub fn apply_start(&mut self, total: usize) {
        if self.silent {
            return;
        }
        let _ = writeln!(self.writer);
        if self.colors_enabled {
            let _ = writeln!(self.writer, "{}", format!("Renaming {} file(s)", total).bold());
        } else {
            let _ = writeln!(self.writer, "Renaming {} file(s)", total);
        }
    }

    /// One tick per attempted rename; `applied` counts successes so far
    pub fn apply_progress(&mut self, applied: usize, total: usize) {
        if self.silent {
            return;
        }
        if self.colors_enabled {
            let counter = format!("[{}/{}]", applied, total);
            let _ = writeln!(self.writer, "{} renamed", counter.cyan());
        } else {
            let _ = writeln!(self.writer, "[{}/{}] renamed", applied, total);
        }
    }

    /// Report the start of an undo pass
    pub fn undo_start(&mut self, total: usize, log: &Path) {
        if self.silent {
            return;
        }
        let _ = writeln!(self.writer);
        if self.colors_enabled {
            let _ = writeln!(
                self.writer,
                "{}",
                format!("Undoing {} rename(s) from {}", total, log.display()).bold()
            );
        } else {
            let _ = writeln!(
                self.writer,
                "Undoing {} rename(s) from {}",
                total,
                log.display()
            );
        }
    }
}
