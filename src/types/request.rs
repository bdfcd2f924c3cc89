//! CopyRequest - One file placement computed during the walk

use std::path::PathBuf;

/// A single source file and where it lands under the target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyRequest {
    /// Source file path as yielded by the walker
    pub source: PathBuf,

    /// `<target>/<batch>/<chunk>`
    pub destination: PathBuf,

    /// Batch the file was assigned to (1-based)
    pub batch: u64,
}

impl CopyRequest {
    /// Create a new request
    pub fn new(source: PathBuf, destination: PathBuf, batch: u64) -> Self {
        Self {
            source,
            destination,
            batch,
        }
    }
}
