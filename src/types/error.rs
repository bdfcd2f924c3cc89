//! Error types for kopy-batch

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Error types for batch copy operations
///
/// Each step of a single file copy has its own variant so a logged failure
/// names the step that broke. Only `Config` is fatal for the whole run.
#[derive(Debug, Error)]
pub enum BatchError {
    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Traversal of the source tree failed for one entry
    #[error("Walk error: {0}")]
    Walk(#[from] ignore::Error),

    /// Source file could not be opened for reading
    #[error("couldn't open source file {path}: {source}")]
    Open { path: PathBuf, source: io::Error },

    /// Destination parent directory could not be created
    #[error("couldn't create directory {path}: {source}")]
    DirCreate { path: PathBuf, source: io::Error },

    /// Destination file could not be created or truncated
    #[error("couldn't create destination file {path}: {source}")]
    Create { path: PathBuf, source: io::Error },

    /// Streaming bytes from source to destination failed
    #[error("writing {src} to {dst} failed: {source}")]
    Copy {
        src: PathBuf,
        dst: PathBuf,
        source: io::Error,
    },

    /// Destination could not be flushed to disk
    #[error("sync error on {path}: {source}")]
    Sync { path: PathBuf, source: io::Error },

    /// Source metadata could not be read
    #[error("stat error on {path}: {source}")]
    Stat { path: PathBuf, source: io::Error },

    /// Permission bits could not be applied to the destination
    #[error("chmod error on {path}: {source}")]
    Chmod { path: PathBuf, source: io::Error },
}

impl BatchError {
    /// Check if this error comes from startup validation
    pub fn is_config_error(&self) -> bool {
        matches!(self, BatchError::Config(_))
    }

    /// Check if this error is one of the per-file copy step failures
    pub fn is_copy_error(&self) -> bool {
        matches!(
            self,
            BatchError::Open { .. }
                | BatchError::DirCreate { .. }
                | BatchError::Create { .. }
                | BatchError::Copy { .. }
                | BatchError::Sync { .. }
                | BatchError::Stat { .. }
                | BatchError::Chmod { .. }
        )
    }
}
