//! Logging setup on the `tracing` ecosystem.
//!
//! Verbosity comes from the global flags: `--verbose` enables debug events
//! from both crates, `--quiet` keeps errors only, and otherwise `RUST_LOG` is
//! honoured before falling back to info.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const VERBOSE_FILTER: &str = "vjs_build=debug,vjs_bundle=debug";
const QUIET_FILTER: &str = "vjs_build=error,vjs_bundle=error";
const DEFAULT_FILTER: &str = "vjs_build=info,vjs_bundle=info";

/// Pick the event filter for the given flags.
pub fn filter_for(verbose: bool, quiet: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new(VERBOSE_FILTER)
    } else if quiet {
        EnvFilter::new(QUIET_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    }
}

/// Initialize the global subscriber. Call once, before any logging.
///
/// ```rust,no_run
/// use vjs_build::logger::init_logger;
///
/// init_logger(true, false, false);
/// tracing::debug!("resolving features");
/// ```
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool) {
    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color)
        .with_writer(std::io::stderr)
        .compact();

    tracing_subscriber::registry()
        .with(filter_for(verbose, quiet))
        .with(fmt_layer)
        .init();
}

/// Whether colored output should be used, from `NO_COLOR`, `FORCE_COLOR`
/// and the terminal.
pub fn should_use_colors() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    if std::env::var_os("FORCE_COLOR").is_some() {
        return true;
    }
    console::Term::stderr().features().colors_supported()
}
