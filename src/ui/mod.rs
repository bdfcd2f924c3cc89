//! Terminal output

mod progress;

pub use progress::{format_copy_line, ProgressReporter};
