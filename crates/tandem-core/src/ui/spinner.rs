//! Scoped terminal loading indicator

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Animated spinner shown while a request is in flight.
///
/// The spinner is a scoped resource: it starts ticking on
/// [`start`](Spinner::start) and is cleared when the guard drops, which
/// makes release unconditional across success, fallback, and error
/// paths. Draws to stderr; when stderr is not a terminal, indicatif
/// hides the bar and no control characters are emitted.
pub struct Spinner {
    bar: ProgressBar,
}

impl Spinner {
    /// Start the spinner with the given label
    pub fn start(label: impl Into<String>) -> Self {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.blue} {msg}")
                .expect("Invalid progress template"),
        );
        bar.set_message(label.into());
        bar.enable_steady_tick(Duration::from_millis(100));
        Self { bar }
    }

    /// Replace the label while the spinner is running
    pub fn set_message(&self, label: impl Into<String>) {
        self.bar.set_message(label.into());
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        self.bar.finish_and_clear();
    }
}
