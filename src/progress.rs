//! Console progress lines.

#![deny(missing_docs)]

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// One spinner line: started with a message, finished with a tick or a cross.
pub struct Step {
    bar: ProgressBar,
}

impl Step {
    /// Start a spinner. Hidden when `quiet`.
    pub fn start(message: impl Into<String>, quiet: bool) -> Self {
        let bar = if quiet {
            ProgressBar::hidden()
        } else {
            let bar = ProgressBar::new_spinner();
            bar.set_style(
                ProgressStyle::with_template("{spinner:.cyan} {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner()),
            );
            bar.enable_steady_tick(Duration::from_millis(80));
            bar
        };
        bar.set_message(message.into());
        Self { bar }
    }

    /// Run `f` with the spinner cleared, so child output is not interleaved.
    pub fn suspend<R>(&self, f: impl FnOnce() -> R) -> R {
        self.bar.suspend(f)
    }

    /// Finish with a success mark.
    pub fn succeed(self, message: impl AsRef<str>) {
        self.finish("✔".green(), message.as_ref());
    }

    /// Finish with a warning mark.
    pub fn warn(self, message: impl AsRef<str>) {
        self.finish("⚠".yellow(), message.as_ref());
    }

    /// Finish with a failure mark.
    pub fn fail(self, message: impl AsRef<str>) {
        self.finish("✖".red(), message.as_ref());
    }

    fn finish(self, mark: colored::ColoredString, message: &str) {
        self.bar.set_style(
            ProgressStyle::with_template("{msg}").unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        self.bar.finish_with_message(format!("{mark} {message}"));
    }
}
