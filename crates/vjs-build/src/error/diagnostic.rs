//! Miette diagnostic conversion for CLI errors.

use miette::Report;

use crate::error::CliError;

/// Convert a [`CliError`] into a miette report.
///
/// Library errors keep their codes and help text; build failures are wrapped
/// with the phase they happened in.
pub fn cli_error_to_miette(err: CliError) -> Report {
    match err {
        CliError::Bundle(e) => Report::new(e),
        CliError::Failed { phase, source } => {
            cli_error_to_miette(*source).wrap_err(format!("Build failed while {phase}"))
        }
        CliError::Config(e) => miette::miette!("Configuration error: {}", e),
        _ => miette::miette!("{}", err),
    }
}
