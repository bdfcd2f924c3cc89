//! Batch layout - where each source file lands under the target

mod chunk;

pub use chunk::{chunk_for, destination_for};
