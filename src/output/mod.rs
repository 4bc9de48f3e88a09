use episode_renamer::apply::ApplyReport;
use episode_renamer::plan::RenamePlan;
use episode_renamer::undo::UndoReport;
use std::io::{self, Write};

/// Display the preview of a rename plan in a formatted output
pub fn display_preview(plan: &RenamePlan, dry_run: bool, writer: &mut impl Write) -> io::Result<()> {
    writeln!(writer)?;
    writeln!(writer, "========================================")?;
    writeln!(writer, "               PREVIEW")?;
    writeln!(writer, "========================================")?;
    writeln!(writer)?;
    writeln!(writer, "Season:  S{:02}", plan.season)?;
    writeln!(writer, "Files:   {}", plan.len())?;
    writeln!(writer, "Changes: {}", plan.change_count())?;
    writeln!(writer)?;

    if plan.is_empty() {
        writeln!(writer, "No video files to rename.")?;
        return Ok(());
    }

    writeln!(writer, "Planned changes:")?;
    writeln!(writer)?;

    for (i, op) in plan.ops.iter().enumerate() {
        if op.is_noop() {
            writeln!(writer, "  {}. {} (already named)", i + 1, op.source_name)?;
        } else {
            writeln!(writer, "  {}. From: {}", i + 1, op.source_name)?;
            writeln!(writer, "     To:   {}", op.new_name)?;
        }
    }

    // Summary
    writeln!(writer)?;
    writeln!(writer, "----------------------------------------")?;
    writeln!(writer, "Summary:")?;
    writeln!(writer, "  {} file(s) to rename", plan.change_count())?;

    let skipped = plan.len() - plan.change_count();
    if skipped > 0 {
        writeln!(writer, "  {} file(s) already named", skipped)?;
    }

    if dry_run {
        writeln!(writer)?;
        writeln!(writer, "Run without --dry to apply these changes.")?;
    }

    Ok(())
}

/// Display the outcome of an apply batch, itemizing every failure
pub fn display_apply_result(report: &ApplyReport, writer: &mut impl Write) -> io::Result<()> {
    writeln!(writer)?;
    writeln!(writer, "{}", report.summary())?;

    if !report.failures.is_empty() {
        writeln!(writer)?;
        writeln!(writer, "Errors:")?;
        for failure in &report.failures {
            writeln!(writer, "  - {}", failure)?;
        }
    }

    if let Some(path) = &report.undo_log {
        writeln!(writer)?;
        writeln!(writer, "Undo log: {}", path.display())?;
        writeln!(writer, "Run --undo to restore the original names.")?;
    }

    if let Some(message) = &report.log_error {
        writeln!(writer)?;
        writeln!(writer, "Warning: {} (completed renames were kept)", message)?;
    }

    Ok(())
}

/// Display the outcome of an undo pass, itemizing every failure
pub fn display_undo_result(report: &UndoReport, writer: &mut impl Write) -> io::Result<()> {
    writeln!(writer)?;
    writeln!(writer, "{}", report.summary())?;

    if !report.failures.is_empty() {
        writeln!(writer)?;
        writeln!(writer, "Errors:")?;
        for failure in &report.failures {
            writeln!(writer, "  - {}", failure)?;
        }
    }

    Ok(())
}
