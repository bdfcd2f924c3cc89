//! Executor module for file operations

pub mod copy;

use crate::types::{BatchError, CopyRequest};

pub use copy::{copy_file, ensure_parent_dir};

/// Events emitted while the walk places files.
#[derive(Debug)]
pub enum ExecutionEvent<'a> {
    /// A copy is about to be attempted (or planned, in dry-run).
    CopyStart {
        request: &'a CopyRequest,
        dry_run: bool,
    },
    /// The copy finished.
    CopySuccess {
        request: &'a CopyRequest,
        bytes_copied: u64,
    },
    /// The copy failed; the walk continues with the next file.
    CopyError {
        request: &'a CopyRequest,
        error: &'a BatchError,
    },
    /// An entry of the source tree could not be visited.
    WalkError { error: &'a BatchError },
}

/// Optional callback used to receive execution events.
pub type ExecutionCallback = dyn Fn(&ExecutionEvent<'_>) + Send + Sync;

/// Carry out one placement
///
/// `CopyStart` is always emitted before anything touches the filesystem, so
/// a progress line exists even for copies that fail at their first step.
/// In dry-run mode nothing is copied and the request reports 0 bytes.
pub fn execute_request(
    request: &CopyRequest,
    dry_run: bool,
    on_event: Option<&ExecutionCallback>,
) -> Result<u64, BatchError> {
    emit_event(on_event, ExecutionEvent::CopyStart { request, dry_run });

    let result = if dry_run {
        Ok(0)
    } else {
        copy_file(&request.source, &request.destination)
    };

    match &result {
        Ok(bytes) => emit_event(
            on_event,
            ExecutionEvent::CopySuccess {
                request,
                bytes_copied: *bytes,
            },
        ),
        Err(error) => emit_event(on_event, ExecutionEvent::CopyError { request, error }),
    }

    result
}

pub(crate) fn emit_event(on_event: Option<&ExecutionCallback>, event: ExecutionEvent<'_>) {
    if let Some(callback) = on_event {
        callback(&event);
    }
}
