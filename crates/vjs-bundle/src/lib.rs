//! # vjs-bundle
//!
//! Feature-gated video.js distribution bundling on top of Rolldown.
//!
//! The crate turns a selection of player features into a bundle configuration
//! and hands it to Rolldown:
//!
//! 1. [`FeatureRegistry`] resolves user-selected keys into a [`FeatureSet`],
//!    injecting the required `core` feature when it is missing.
//! 2. [`EntryModule`] synthesizes the in-memory entry point for that set.
//! 3. [`BundleConfig`] assembles the ordered stage pipeline for a [`BuildProfile`].
//! 4. [`bundle`] lowers the configuration to Rolldown options and plugins,
//!    runs the bundler and writes the artifact with its license banner.
//!
//! ## Quick Start
//!
//! ```no_run
//! use vjs_bundle::{
//!     BuildOptions, BuildProfile, BundleConfig, FeatureRegistry, LicenseBanner,
//!     OutputFormat, PackageMetadata,
//! };
//!
//! # #[tokio::main]
//! # async fn main() -> vjs_bundle::Result<()> {
//! let registry = FeatureRegistry::player();
//! let resolved = registry.resolve(["hls"])?;
//! let options = BuildOptions::new(resolved.features, "dist/video-custom.js", OutputFormat::Umd);
//!
//! let metadata = PackageMetadata::load("package.json")?;
//! let banner = LicenseBanner::load("build/license-header.txt")?
//!     .render(&metadata, options.features.contains("vtt"))?;
//!
//! let config = BundleConfig::for_profile(BuildProfile::Custom, &registry, &options, ".", banner)?;
//! let artifact = vjs_bundle::bundle(&config).await?;
//! println!("{} bytes", artifact.size);
//! # Ok(()) }
//! ```

pub mod banner;
pub mod config;
pub mod entry;
pub mod executor;
pub mod features;
pub mod options;
pub mod phase;
pub mod plugins;
pub mod report;
pub mod targets;

pub use banner::{LicenseBanner, PackageMetadata};
pub use config::{BuildProfile, BundleConfig, BundleInput, OutputDescriptor, Stage, StageKind};
pub use entry::EntryModule;
pub use executor::bundle;
pub use features::{FeatureDescriptor, FeatureRegistry, FeatureSet, ResolvedFeatures};
pub use options::{BuildOptions, OutputFormat};
pub use phase::BuildPhase;
pub use plugins::{PluginPhase, PluginRegistry};
pub use report::{BuildArtifact, CompanionKind, SizeComparison};
pub use targets::BrowserTargets;

/// Error types for vjs-bundle operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Malformed or missing template, manifest or build configuration.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A feature key that is not part of the registry.
    #[error("Unknown feature '{key}' (available: {available})")]
    UnknownFeature { key: String, available: String },

    /// Stages were assembled in an order the bundler cannot honour.
    #[error("Invalid stage order: '{later}' must not run before '{earlier}'")]
    InvalidStageOrder {
        earlier: &'static str,
        later: &'static str,
    },

    /// License template failed to render.
    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),

    /// Error reported by Rolldown.
    #[error("Rolldown bundler error: {0}")]
    Bundler(String),

    /// File read, write or delete failure.
    #[error("Filesystem error at {path}: {source}")]
    Filesystem {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for vjs-bundle operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a bundler error from a Rolldown error.
    ///
    /// Rolldown's batched diagnostics have no stable `Display`, so the debug
    /// rendering is kept and trimmed.
    pub fn from_rolldown(error: &dyn std::fmt::Debug) -> Self {
        let rendered = format!("{error:?}");
        Error::Bundler(rendered.trim().to_string())
    }

    /// Wrap an I/O error with the path it happened on.
    pub fn filesystem(path: impl AsRef<std::path::Path>, source: std::io::Error) -> Self {
        Error::Filesystem {
            path: path.as_ref().display().to_string(),
            source,
        }
    }
}

impl miette::Diagnostic for Error {
    fn code(&self) -> Option<Box<dyn std::fmt::Display + '_>> {
        Some(Box::new(match self {
            Error::Configuration(_) => "CONFIGURATION_ERROR",
            Error::UnknownFeature { .. } => "UNKNOWN_FEATURE",
            Error::InvalidStageOrder { .. } => "INVALID_STAGE_ORDER",
            Error::Template(_) => "TEMPLATE_ERROR",
            Error::Bundler(_) => "BUNDLER_ERROR",
            Error::Filesystem { .. } => "FILESYSTEM_ERROR",
        }))
    }

    fn severity(&self) -> Option<miette::Severity> {
        Some(miette::Severity::Error)
    }

    fn help(&self) -> Option<Box<dyn std::fmt::Display + '_>> {
        match self {
            Error::Configuration(_) => Some(Box::new(
                "Run the build from the player repository root, or point player-build.toml at package.json and the license template.",
            )),
            Error::UnknownFeature { available, .. } => Some(Box::new(format!(
                "Pick features from: {}\nRun with --help for descriptions.",
                available
            ))),
            Error::Template(_) => Some(Box::new(
                "Check the license header template for unbalanced {% if %} / <% if %> blocks.",
            )),
            Error::Filesystem { .. } => Some(Box::new(
                "Check disk space and permissions for the output directory.",
            )),
            _ => None,
        }
    }
}
