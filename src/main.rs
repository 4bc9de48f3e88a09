mod cli;
mod logging;
mod output;
mod progress;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;

use clap::Parser;
use tracing::{debug, error, info, warn};

use episode_renamer::apply::{apply_plan, ApplyReport};
use episode_renamer::error::{AppError, ExitCode};
use episode_renamer::history::{find_latest_undo_log, read_undo_log};
use episode_renamer::ordering::sort_files_by_time;
use episode_renamer::plan::{apply_overrides, plan_changes, NameOverrides, RenamePlan};
use episode_renamer::scanner::scan_media_files;
use episode_renamer::settings::{settings_path, Settings};
use episode_renamer::undo::undo_renames;
use episode_renamer::validator::validate_plan;

use cli::Args;
use output::{display_apply_result, display_preview, display_undo_result};
use progress::Progress;

fn main() {
    let args = Args::parse();

    logging::init(args.verbose);

    match run(args) {
        Ok(code) => {
            if code != ExitCode::Success {
                std::process::exit(code.into());
            }
        }
        Err(e) => {
            error!("{}", e);
            eprintln!("\nError: {}", e.detailed_message());
            std::process::exit(e.exit_code().into());
        }
    }
}

fn run(args: Args) -> Result<ExitCode, AppError> {
    let settings_file = settings_path();
    let mut settings = match settings_file.as_deref() {
        Some(path) => Settings::load(path),
        None => {
            warn!("No config directory available, using default settings");
            Settings::default()
        }
    };

    let mut progress = Progress::new(args.verbose > 0);

    if args.undo.is_some() {
        run_undo(&args, &settings, &mut progress)
    } else if let Some(folder) = args.folder.clone() {
        run_rename(
            &args,
            &folder,
            &mut settings,
            settings_file.as_deref(),
            &mut progress,
        )
    } else {
        // clap's required_unless_present rule keeps this arm unreachable
        Ok(ExitCode::Success)
    }
}

fn run_rename(
    args: &Args,
    folder: &Path,
    settings: &mut Settings,
    settings_file: Option<&Path>,
    progress: &mut Progress,
) -> Result<ExitCode, AppError> {
    // Undo log entries and the saved log pointer outlive this run's working
    // directory, so resolve the folder before anything derives paths from it.
    let folder = fs::canonicalize(folder).map_err(|e| match e.kind() {
        io::ErrorKind::PermissionDenied => AppError::PermissionDenied {
            path: folder.to_path_buf(),
        },
        _ => AppError::FolderNotFound {
            path: folder.to_path_buf(),
        },
    })?;

    // Merge arguments over the persisted last-used values; the merged state
    // is what gets saved back.
    settings.season = args.season.unwrap_or(settings.season);
    settings.start = args.start.unwrap_or(settings.start);
    settings.recurse = args.recurse;
    settings.use_ctime = args.ctime;
    settings.keep_titles = !args.no_titles;

    progress.scan_start(&folder);
    let files = scan_media_files(&folder, settings.recurse)?;
    progress.scan_complete(files.len());

    if files.is_empty() {
        return Err(AppError::NothingToRename {
            path: folder.clone(),
        });
    }

    info!("Found {} video files", files.len());

    let files = sort_files_by_time(files, settings.sort_key());
    let plan = plan_changes(files, settings.season, settings.start, settings.keep_titles);
    let overrides = parse_overrides(&args.overrides, plan.len())?;
    let plan = apply_overrides(plan, &overrides);

    display_preview(&plan, args.dry, &mut io::stdout())
        .map_err(|e| AppError::Other(format!("Failed to display output: {}", e)))?;

    save_settings(settings, settings_file);

    // Conflicts abort before any mutation, dry run or not.
    let report = validate_plan(&plan.ops);
    if !report.is_ok() {
        return Err(AppError::ConflictsDetected {
            conflicts: report.conflicts,
        });
    }

    if args.dry {
        return Ok(ExitCode::Success);
    }

    let report = run_apply(&plan, &folder, progress)?;

    if let Some(log) = &report.undo_log {
        settings.last_log = Some(log.clone());
        save_settings(settings, settings_file);
    }

    display_apply_result(&report, &mut io::stdout())
        .map_err(|e| AppError::Other(format!("Failed to display output: {}", e)))?;

    Ok(if report.canceled {
        ExitCode::Canceled
    } else if !report.failures.is_empty() {
        ExitCode::PartialFailure
    } else if report.log_error.is_some() {
        ExitCode::HistoryError
    } else {
        ExitCode::Success
    })
}

/// Run the apply batch on a worker thread, forwarding progress events over a
/// channel so the owning thread renders them. Ctrl-C flips the shared cancel
/// flag; the batch stops once the in-flight rename completes.
fn run_apply(
    plan: &RenamePlan,
    folder: &Path,
    progress: &mut Progress,
) -> Result<ApplyReport, AppError> {
    let cancel = Arc::new(AtomicBool::new(false));
    let handler_flag = Arc::clone(&cancel);

    ctrlc::set_handler(move || {
        if handler_flag.load(Ordering::SeqCst) {
            // Second Ctrl-C: stop waiting for the batch
            std::process::exit(130);
        }
        eprintln!("\nCancel requested, finishing the current rename...");
        handler_flag.store(true, Ordering::SeqCst);
    })
    .map_err(|e| AppError::Other(format!("Failed to set Ctrl-C handler: {}", e)))?;

    progress.apply_start(plan.change_count());

    let (tx, rx) = mpsc::channel();
    let ops = plan.ops.clone();
    let target_dir = folder.to_path_buf();
    let worker_cancel = Arc::clone(&cancel);

    let worker = thread::spawn(move || {
        apply_plan(&ops, &target_dir, &worker_cancel, move |applied, total| {
            let _ = tx.send((applied, total));
        })
    });

    // The sender lives in the worker's progress closure, so this loop ends
    // exactly when the batch does.
    for (applied, total) in rx {
        progress.apply_progress(applied, total);
    }

    worker
        .join()
        .map_err(|_| AppError::Other("Rename worker panicked".to_string()))
}

fn run_undo(
    args: &Args,
    settings: &Settings,
    progress: &mut Progress,
) -> Result<ExitCode, AppError> {
    let log_path = resolve_undo_log(args, settings)?;
    info!("Undoing renames from {:?}", log_path);

    let entries = read_undo_log(&log_path).map_err(|e| AppError::HistoryError {
        path: Some(log_path.clone()),
        message: e.to_string(),
    })?;

    progress.undo_start(entries.len(), &log_path);

    let report = undo_renames(&entries);

    display_undo_result(&report, &mut io::stdout())
        .map_err(|e| AppError::Other(format!("Failed to display output: {}", e)))?;

    Ok(if report.failures.is_empty() {
        ExitCode::Success
    } else {
        ExitCode::PartialFailure
    })
}

/// Pick the log to undo from: the explicit argument, then the saved pointer,
/// then the newest log in the target folder. Relative arguments are resolved
/// against the current directory before use.
fn resolve_undo_log(args: &Args, settings: &Settings) -> Result<PathBuf, AppError> {
    if let Some(Some(path)) = &args.undo {
        return Ok(fs::canonicalize(path).unwrap_or_else(|_| path.clone()));
    }

    if let Some(path) = &settings.last_log {
        if path.exists() {
            return Ok(path.clone());
        }
        warn!(path = ?path, "Saved undo log pointer is stale");
    }

    if let Some(folder) = &args.folder {
        let folder = fs::canonicalize(folder).unwrap_or_else(|_| folder.clone());
        if let Some(path) = find_latest_undo_log(&folder) {
            return Ok(path);
        }
    }

    Err(AppError::NoUndoLog)
}

/// Parse repeated `N=NAME` override flags. Rows are 1-based as shown in the
/// preview; the engine's map is 0-based.
fn parse_overrides(raw: &[String], plan_len: usize) -> Result<NameOverrides, AppError> {
    let mut overrides = NameOverrides::new();

    for value in raw {
        let Some((row, name)) = value.split_once('=') else {
            return Err(AppError::InvalidOverride {
                value: value.clone(),
                reason: "expected N=NEW_NAME".to_string(),
            });
        };

        let row: usize = row.trim().parse().map_err(|_| AppError::InvalidOverride {
            value: value.clone(),
            reason: format!("'{}' is not a row number", row.trim()),
        })?;

        if row == 0 || row > plan_len {
            return Err(AppError::InvalidOverride {
                value: value.clone(),
                reason: format!("row {} is outside the preview (1-{})", row, plan_len),
            });
        }

        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::InvalidOverride {
                value: value.clone(),
                reason: "replacement name is empty".to_string(),
            });
        }
        if name.contains('/') || name.contains('\\') {
            return Err(AppError::InvalidOverride {
                value: value.clone(),
                reason: "replacement name must not contain path separators".to_string(),
            });
        }

        overrides.set(row - 1, name);
    }

    Ok(overrides)
}

/// Persist merged settings; failures never block the run.
fn save_settings(settings: &Settings, path: Option<&Path>) {
    let Some(path) = path else {
        debug!("No config directory available, settings not saved");
        return;
    };

    if let Err(e) = settings.save(path) {
        warn!("Failed to save settings: {}", e);
    }
}
