//! Status message functions for terminal output.

use owo_colors::OwoColorize;

use super::{colors_enabled, is_quiet};

/// Print a success message to stderr.
pub fn success(message: &str) {
    if is_quiet() {
        return;
    }
    if colors_enabled() {
        eprintln!("{} {}", "✓".green().bold(), message);
    } else {
        eprintln!("✓ {}", message);
    }
}

/// Print an info message to stderr.
///
/// ```no_run
/// use vjs_build::ui::info;
///
/// info("Starting custom build...");
/// ```
pub fn info(message: &str) {
    if is_quiet() {
        return;
    }
    if colors_enabled() {
        eprintln!("{} {}", "ℹ".blue().bold(), message);
    } else {
        eprintln!("ℹ {}", message);
    }
}

/// Print a warning message to stderr.
pub fn warning(message: &str) {
    if colors_enabled() {
        eprintln!("{} {}", "⚠".yellow().bold(), message.yellow());
    } else {
        eprintln!("⚠ {}", message);
    }
}

/// Print a section heading to stderr.
pub fn heading(title: &str) {
    if is_quiet() {
        return;
    }
    if colors_enabled() {
        eprintln!("\n{}", title.bold().underline());
    } else {
        eprintln!("\n{}", title);
    }
}

/// Print an indented list item to stderr.
pub fn bullet(item: &str) {
    if is_quiet() {
        return;
    }
    if colors_enabled() {
        eprintln!("  {} {}", "▸".blue(), item);
    } else {
        eprintln!("  - {}", item);
    }
}
