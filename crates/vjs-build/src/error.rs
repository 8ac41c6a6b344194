//! Error handling for the build binaries.
//!
//! [`CliError`] is what every command returns. Library failures arrive as
//! [`vjs_bundle::Error`] and keep their diagnostic codes; failures during a
//! build are wrapped in [`CliError::Failed`] together with the phase they
//! happened in. [`cli_error_to_miette`] renders all of them at the top of
//! `main`.

mod diagnostic;

use std::path::PathBuf;
use thiserror::Error;
use vjs_bundle::BuildPhase;

pub use diagnostic::cli_error_to_miette;

/// Top-level CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Settings could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Error from the bundling library.
    #[error(transparent)]
    Bundle(#[from] vjs_bundle::Error),

    /// Invalid command-line arguments or options
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A build step failed.
    #[error("Build failed while {phase}: {source}")]
    Failed {
        phase: BuildPhase,
        #[source]
        source: Box<CliError>,
    },

    #[error("{0}")]
    Custom(String),
}

/// Errors from loading `player-build.toml` and `VJS_BUILD_*` settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The project root does not exist or is not a directory.
    #[error("Project root not found: {}\n\nHint: Pass the player repository with --cwd <dir>", .0.display())]
    RootNotFound(PathBuf),

    /// Invalid value for a setting
    #[error("Invalid value for '{field}': {value}\n\nHint: {hint}")]
    InvalidValue {
        field: String,
        value: String,
        hint: String,
    },
}

/// Result type alias using `CliError` as the default error type.
pub type Result<T, E = CliError> = std::result::Result<T, E>;

/// Extension trait for adding context to `Result` types.
pub trait ResultExt<T> {
    /// Turn a not-found I/O error into [`CliError::FileNotFound`] for `path`.
    ///
    /// ```rust,no_run
    /// # use std::path::Path;
    /// # use vjs_build::error::{Result, ResultExt};
    /// # fn run() -> Result<()> {
    /// let path = Path::new("package.json");
    /// std::fs::metadata(path).with_path(path)?;
    /// # Ok(())
    /// # }
    /// ```
    fn with_path(self, path: impl AsRef<std::path::Path>) -> Result<T>;

    /// Prefix the error message.
    fn context(self, msg: impl std::fmt::Display) -> Result<T>;
}

impl<T, E: Into<CliError>> ResultExt<T> for std::result::Result<T, E> {
    fn with_path(self, path: impl AsRef<std::path::Path>) -> Result<T> {
        self.map_err(|e| match e.into() {
            CliError::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound => {
                CliError::FileNotFound(path.as_ref().to_path_buf())
            }
            other => other,
        })
    }

    fn context(self, msg: impl std::fmt::Display) -> Result<T> {
        self.map_err(|e| {
            let err: CliError = e.into();
            CliError::Custom(format!("{}: {}", msg, err))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_not_found_has_hint() {
        let msg = ConfigError::RootNotFound(PathBuf::from("/nowhere")).to_string();
        assert!(msg.contains("/nowhere"));
        assert!(msg.contains("Hint:"));
    }

    #[test]
    fn test_bundle_error_is_transparent() {
        let err: CliError = vjs_bundle::Error::Configuration("no manifest".into()).into();
        assert_eq!(err.to_string(), "Configuration error: no manifest");
    }

    #[test]
    fn test_failed_names_phase() {
        let err = CliError::Failed {
            phase: BuildPhase::Bundling,
            source: Box::new(CliError::Custom("boom".into())),
        };
        assert_eq!(err.to_string(), "Build failed while bundling: boom");
    }

    #[test]
    fn test_result_ext_with_path() {
        let result: std::io::Result<()> = Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "file not found",
        ));
        let err = result.with_path("/p/package.json").unwrap_err();
        assert!(matches!(err, CliError::FileNotFound(_)));
    }

    #[test]
    fn test_result_ext_context() {
        let result: std::result::Result<(), CliError> = Err(CliError::Custom("inner".into()));
        assert_eq!(
            result.context("Outer").unwrap_err().to_string(),
            "Outer: inner"
        );
    }
}
