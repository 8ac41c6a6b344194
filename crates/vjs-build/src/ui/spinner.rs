//! Spinner for the bundling step.

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use owo_colors::OwoColorize;
use std::time::Duration;

use super::{colors_enabled, is_ci, is_quiet};

/// Spinner shown while Rolldown runs.
///
/// Drawn only on an attended terminal outside CI and without `--quiet`;
/// otherwise it stays hidden and only the finishing message is printed.
pub struct Spinner {
    pb: ProgressBar,
}

impl Spinner {
    pub fn new(message: &str) -> Self {
        let pb = if is_quiet() || is_ci() || !console::user_attended_stderr() {
            ProgressBar::with_draw_target(None, ProgressDrawTarget::hidden())
        } else {
            let pb = ProgressBar::new_spinner();
            if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
                pb.set_style(style.tick_strings(&["◐", "◓", "◑", "◒", "●"]));
            }
            pb.enable_steady_tick(Duration::from_millis(100));
            pb
        };
        pb.set_message(message.to_string());

        Self { pb }
    }

    /// Finish with a green checkmark.
    pub fn finish(&self, message: &str) {
        self.finish_with("✓", message, true);
    }

    /// Finish with a red cross.
    pub fn fail(&self, message: &str) {
        self.finish_with("✗", message, false);
    }

    fn finish_with(&self, mark: &str, message: &str, ok: bool) {
        let line = match (colors_enabled(), ok) {
            (true, true) => format!("{} {}", mark.green(), message),
            (true, false) => format!("{} {}", mark.red(), message),
            (false, _) => format!("{} {}", mark, message),
        };

        if self.pb.is_hidden() {
            self.pb.finish_and_clear();
            if ok && is_quiet() {
                return;
            }
            eprintln!("{}", line);
        } else {
            self.pb.finish_with_message(line);
        }
    }
}
