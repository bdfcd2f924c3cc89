//! Main batch copy command

use crate::executor::{emit_event, execute_request, ExecutionCallback, ExecutionEvent};
use crate::layout::{chunk_for, destination_for};
use crate::scanner::SourceWalker;
use crate::types::{BatchError, CopyRequest, TraversalState, WalkStats};
use crate::ui::ProgressReporter;
use crate::Config;
use std::num::NonZeroU64;
use std::sync::{Arc, Mutex};
use tracing::{debug, error, warn};

/// Run the batch copy with terminal progress output
///
/// Per-file failures are logged and the walk carries on; they never turn
/// into an `Err`. Only an unusable configuration does.
pub fn run(config: &Config) -> Result<WalkStats, BatchError> {
    let reporter = Arc::new(Mutex::new(ProgressReporter::new()));

    let progress_cb = {
        let reporter = Arc::clone(&reporter);
        move |event: &ExecutionEvent<'_>| {
            let Ok(mut progress) = reporter.lock() else {
                return;
            };
            match event {
                ExecutionEvent::CopyStart { request, dry_run } => {
                    progress.start_copy(request, *dry_run);
                }
                ExecutionEvent::CopySuccess {
                    request,
                    bytes_copied,
                } => {
                    progress.complete_copy(request, *bytes_copied);
                }
                ExecutionEvent::CopyError { request, .. } => {
                    progress.suspend(|| log_event(event));
                    progress.complete_copy(request, 0);
                }
                ExecutionEvent::WalkError { .. } => {
                    progress.suspend(|| log_event(event));
                }
            }
        }
    };

    let result = run_with_events(config, Some(&progress_cb));
    if let Ok(progress) = reporter.lock() {
        progress.finish();
    }
    result
}

/// Walk `config.source` and place every file under `config.target`
///
/// Files land in `<target>/<batch>/<chunk>`; a new batch starts whenever
/// `config.max` files have been placed in the current one. Failed copies
/// still take their slot in the batch.
///
/// Events go to `on_event`, which is also where logging happens; pass a
/// callback that forwards to [`log_event`] to get the standard log lines.
pub fn run_with_events(
    config: &Config,
    on_event: Option<&ExecutionCallback>,
) -> Result<WalkStats, BatchError> {
    let max = NonZeroU64::new(config.max)
        .ok_or_else(|| BatchError::Config("--max should be greater than 0".to_string()))?;
    let mut state = TraversalState::new(max);
    let mut stats = WalkStats::default();

    debug!(
        source = %config.source.display(),
        target = %config.target.display(),
        max = config.max,
        dry_run = config.dry_run,
        "starting batch walk"
    );

    for entry in SourceWalker::new(&config.source) {
        let path = match entry {
            Ok(path) => path,
            Err(error) => {
                stats.walk_errors += 1;
                emit_event(on_event, ExecutionEvent::WalkError { error: &error });
                continue;
            }
        };

        stats.files_visited += 1;
        let batch = state.begin_file();
        let chunk = chunk_for(&path, &config.source, config.chunk_mode);
        let destination = destination_for(&config.target, batch, &chunk);
        let request = CopyRequest::new(path, destination, batch);

        match execute_request(&request, config.dry_run, on_event) {
            Ok(bytes) => {
                stats.files_copied += 1;
                stats.bytes_copied += bytes;
            }
            Err(_) => stats.files_failed += 1,
        }

        state.finish_file();
    }

    stats.batches = state.batch();
    debug!(
        files = stats.files_visited,
        failed = stats.files_failed,
        batches = stats.batches,
        "batch walk finished"
    );

    Ok(stats)
}

/// Log failure events; other events are ignored
pub fn log_event(event: &ExecutionEvent<'_>) {
    match event {
        ExecutionEvent::CopyError { request, error } => {
            error!(
                step = step_label(error),
                source = %request.source.display(),
                destination = %request.destination.display(),
                "{}",
                error
            );
        }
        ExecutionEvent::WalkError { error } => {
            warn!("{}", error);
        }
        ExecutionEvent::CopyStart { .. } | ExecutionEvent::CopySuccess { .. } => {}
    }
}

fn step_label(error: &BatchError) -> &'static str {
    match error {
        BatchError::Open { .. } => "open",
        BatchError::DirCreate { .. } => "mkdir",
        BatchError::Create { .. } => "create",
        BatchError::Copy { .. } => "copy",
        BatchError::Sync { .. } => "sync",
        BatchError::Stat { .. } => "stat",
        BatchError::Chmod { .. } => "chmod",
        BatchError::Walk(_) => "walk",
        BatchError::Config(_) => "config",
    }
}
