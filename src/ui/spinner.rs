use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use crate::output;

/// A spinner shown while waiting for something outside our control
/// (typically the log file appearing).
///
/// Stays hidden in quiet mode. Clears itself when dropped.
pub struct Spinner {
    progress_bar: ProgressBar,
}

impl Spinner {
    /// Creates a stopped spinner with the given message.
    pub fn new(message: &str) -> Self {
        let progress_bar = if output::is_quiet() {
            ProgressBar::hidden()
        } else {
            ProgressBar::new_spinner()
        };

        if let Ok(style) = ProgressStyle::default_spinner()
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", " "])
            .template("{spinner} {msg} {elapsed:.dim}")
        {
            progress_bar.set_style(style);
        }
        progress_bar.set_message(message.to_string());

        Self { progress_bar }
    }

    /// Starts ticking if not already running.
    pub fn start(&self) {
        if self.progress_bar.is_finished() {
            self.progress_bar.reset();
        }
        self.progress_bar.enable_steady_tick(Duration::from_millis(80));
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        self.progress_bar.finish_and_clear();
    }
}
