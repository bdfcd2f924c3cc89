//! Progress reporting

use crate::types::CopyRequest;
use console::style;
use indicatif::{HumanBytes, ProgressBar, ProgressStyle};

/// Progress reporter for a batch copy run
///
/// Per-file lines go to stdout. A spinner on stderr tracks the current batch;
/// it stays hidden when stderr is not a terminal.
pub struct ProgressReporter {
    bar: ProgressBar,
    files: u64,
    bytes: u64,
}

impl ProgressReporter {
    /// Create a new progress reporter
    pub fn new() -> Self {
        let bar = ProgressBar::new_spinner();
        bar.enable_steady_tick(std::time::Duration::from_millis(120));
        if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
            bar.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ "));
        }
        Self::with_bar(bar)
    }

    /// Reporter that never draws a spinner
    pub fn hidden() -> Self {
        Self::with_bar(ProgressBar::hidden())
    }

    fn with_bar(bar: ProgressBar) -> Self {
        Self {
            bar,
            files: 0,
            bytes: 0,
        }
    }

    /// Print the progress line for a copy about to happen.
    pub fn start_copy(&self, request: &CopyRequest, dry_run: bool) {
        let line = format_copy_line(request, dry_run);
        self.bar.suspend(|| println!("{}", line));
    }

    /// Count a finished copy attempt and refresh the spinner.
    pub fn complete_copy(&mut self, request: &CopyRequest, bytes: u64) {
        self.files += 1;
        self.bytes = self.bytes.saturating_add(bytes);
        self.bar.set_message(format!(
            "batch {} | {} files | {}",
            request.batch,
            self.files,
            HumanBytes(self.bytes)
        ));
    }

    /// Run `f` with the spinner cleared, for log output on stderr.
    pub fn suspend<F: FnOnce() -> R, R>(&self, f: F) -> R {
        self.bar.suspend(f)
    }

    /// Remove the spinner.
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

/// `[copy] <src> -> <dst>`, or `[plan]` for dry runs
pub fn format_copy_line(request: &CopyRequest, dry_run: bool) -> String {
    let tag = if dry_run {
        style("[plan]").yellow()
    } else {
        style("[copy]").cyan()
    };
    format!(
        "{} {} -> {}",
        tag,
        request.source.display(),
        request.destination.display()
    )
}
