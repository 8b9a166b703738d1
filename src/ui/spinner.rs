use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

const TICK_STRINGS: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// A terminal spinner for long-running phases.
///
/// Clears itself from the terminal when dropped, so early returns through
/// `?` never leave a stale spinner line behind.
pub struct Spinner {
    bar: ProgressBar,
}

impl Spinner {
    /// Creates and starts a spinner with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        let style = ProgressStyle::default_spinner().tick_strings(TICK_STRINGS);
        let style = style
            .clone()
            .template("{spinner} {msg}")
            .unwrap_or(style);

        let bar = ProgressBar::new_spinner();
        bar.set_style(style);
        bar.set_message(message.into());
        bar.enable_steady_tick(Duration::from_millis(80));

        Self { bar }
    }

    /// Swaps the message without restarting the spinner, for back-to-back
    /// phases.
    pub fn set_message(&self, message: impl Into<String>) {
        self.bar.set_message(message.into());
    }

    /// Stops the spinner and clears it from the terminal.
    pub fn stop(&self) {
        self.bar.finish_and_clear();
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        self.bar.finish_and_clear();
    }
}
