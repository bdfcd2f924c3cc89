//! Core type definitions for kopy-batch

mod chunk;
mod error;
mod request;
mod state;

pub use chunk::ChunkMode;
pub use error::BatchError;
pub use request::CopyRequest;
pub use state::{TraversalState, WalkStats};
