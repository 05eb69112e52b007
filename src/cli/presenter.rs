//! CLI presenter for output formatting

use std::time::Duration;

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};

use crate::domain::error::UnsupportedCharacter;

/// Presenter for CLI output formatting
#[derive(Clone, Default)]
pub struct Presenter {
    progress: Option<ProgressBar>,
}

impl Presenter {
    /// Create a new presenter
    pub fn new() -> Self {
        Self { progress: None }
    }

    /// Start a progress bar counting sent characters.
    ///
    /// Clones taken afterwards print above the bar instead of through it.
    pub fn start_progress(&mut self, total: u64) -> ProgressBar {
        let bar = ProgressBar::new(total);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("{spinner:.cyan} [{bar:20.cyan}] {pos}/{len} keys")
        {
            bar.set_style(style.progress_chars("█░ "));
        }
        bar.enable_steady_tick(Duration::from_millis(80));
        self.progress = Some(bar.clone());
        bar
    }

    /// Finish the progress bar and clear it
    pub fn finish_progress(&mut self) {
        if let Some(bar) = self.progress.take() {
            bar.finish_and_clear();
        }
    }

    /// Stop the progress bar, leaving the last state visible
    pub fn abandon_progress(&mut self) {
        if let Some(bar) = self.progress.take() {
            bar.abandon();
        }
    }

    fn print(&self, line: String) {
        match &self.progress {
            Some(bar) => bar.suspend(|| eprintln!("{}", line)),
            None => eprintln!("{}", line),
        }
    }

    /// Print warning message to stderr
    pub fn warn(&self, message: &str) {
        self.print(format!("{} {}", "⚠".yellow(), message));
    }

    /// Print error message to stderr
    pub fn error(&self, message: &str) {
        self.print(format!("{} {}", "✗".red(), message));
    }

    /// Report an unsupported character; secret input only reveals the position
    pub fn unsupported(&self, found: &UnsupportedCharacter, secret: bool) {
        self.warn(&format_unsupported(found, secret));
    }

    /// Report how much of the string reached the target
    pub fn partial_delivery(&self, chars_sent: usize) {
        if chars_sent > 0 {
            self.warn(&format_partial(chars_sent));
        }
    }
}

fn format_unsupported(found: &UnsupportedCharacter, secret: bool) -> String {
    if secret {
        found.to_string()
    } else {
        format!("unsupported key -- {:?}", found.character)
    }
}

fn format_partial(chars_sent: usize) -> String {
    format!("{} keys have been sent", chars_sent)
}
