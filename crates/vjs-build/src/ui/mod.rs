//! Terminal output: status messages, a spinner and size formatting.
//!
//! Everything is written to stderr so stdout stays free for `--dry-run`
//! output.
//!
//! ```no_run
//! use vjs_build::ui;
//!
//! ui::init_colors(false);
//! let spinner = ui::Spinner::new("Bundling...");
//! spinner.finish("Bundled");
//! ui::success("Build complete: dist/video-minimal.js");
//! ```

mod format;
mod messages;
mod spinner;

use std::sync::atomic::{AtomicBool, Ordering};

pub use format::{comparison_line, format_duration, size_line};
pub use messages::{bullet, heading, info, success, warning};
pub use spinner::Spinner;

static COLORS: AtomicBool = AtomicBool::new(true);
static QUIET: AtomicBool = AtomicBool::new(false);

/// Check if running in a CI environment.
pub fn is_ci() -> bool {
    ["CI", "GITHUB_ACTIONS", "GITLAB_CI", "CIRCLECI", "TRAVIS"]
        .iter()
        .any(|var| std::env::var_os(var).is_some())
}

/// Decide once whether status output is colored.
///
/// `--no-color` always wins; otherwise `NO_COLOR`, `FORCE_COLOR` and the
/// terminal decide.
pub fn init_colors(no_color: bool) {
    let enabled = !no_color && crate::logger::should_use_colors();
    COLORS.store(enabled, Ordering::Relaxed);
    console::set_colors_enabled_stderr(enabled);
}

pub(crate) fn colors_enabled() -> bool {
    COLORS.load(Ordering::Relaxed)
}

/// With `--quiet`, only warnings and errors are printed.
pub fn set_quiet(quiet: bool) {
    QUIET.store(quiet, Ordering::Relaxed);
}

pub(crate) fn is_quiet() -> bool {
    QUIET.load(Ordering::Relaxed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_no_color_flag_disables_colors() {
        init_colors(true);
        assert!(!colors_enabled());
    }

    #[test]
    #[serial]
    fn test_quiet_toggle() {
        set_quiet(true);
        assert!(is_quiet());
        set_quiet(false);
        assert!(!is_quiet());
    }

    #[test]
    #[serial]
    fn test_is_ci_detects_github_actions() {
        unsafe {
            std::env::set_var("GITHUB_ACTIONS", "true");
        }
        assert!(is_ci());
        unsafe {
            std::env::remove_var("GITHUB_ACTIONS");
        }
    }
}
