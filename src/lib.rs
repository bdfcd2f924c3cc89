//! # kopy-batch - Split a directory tree into numbered batch folders
//!
//! Walks a source tree depth-first and copies every file into
//! `<target>/<batch>/<path>`, starting a new batch folder every `max` files.
//! A file that fails to copy is logged and skipped; the walk always runs to
//! the end.

// Module declarations
pub mod config;
pub mod scanner;
pub mod layout;
pub mod executor;
pub mod ui;
pub mod commands;
pub mod types;

// Re-export commonly used types
pub use types::{BatchError, ChunkMode, CopyRequest, TraversalState, WalkStats};
pub use config::Config;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
