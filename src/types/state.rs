//! TraversalState - Batch bookkeeping threaded through the walk

use std::num::NonZeroU64;

/// Per-walk batch counter
///
/// `counter` is the number of files placed in the current batch and always
/// stays in `0..max`. `batch` is 0 until the first file is seen, then counts
/// up from 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraversalState {
    counter: u64,
    batch: u64,
    max: NonZeroU64,
}

impl TraversalState {
    /// Create a fresh state for a walk with `max` files per batch
    pub fn new(max: NonZeroU64) -> Self {
        Self {
            counter: 0,
            batch: 0,
            max,
        }
    }

    /// Register a visited file and return the batch it belongs to
    ///
    /// Opens a new batch when the counter is at 0.
    pub fn begin_file(&mut self) -> u64 {
        if self.counter == 0 {
            self.batch += 1;
        }
        self.batch
    }

    /// Record that a copy attempt finished, successful or not
    pub fn finish_file(&mut self) {
        self.counter += 1;
        if self.counter == self.max.get() {
            self.counter = 0;
        }
    }

    /// Files placed in the current batch so far
    pub fn counter(&self) -> u64 {
        self.counter
    }

    /// Current batch id (0 before the first file)
    pub fn batch(&self) -> u64 {
        self.batch
    }

    /// Configured batch size
    pub fn max(&self) -> u64 {
        self.max.get()
    }
}

/// Counters for a completed walk
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WalkStats {
    /// Non-directory entries visited
    pub files_visited: u64,

    /// Files copied successfully (or planned, in dry-run)
    pub files_copied: u64,

    /// Files whose copy failed
    pub files_failed: u64,

    /// Traversal errors (entries that could not be visited)
    pub walk_errors: u64,

    /// Total bytes written
    pub bytes_copied: u64,

    /// Number of batch folders used
    pub batches: u64,
}
