//! Command-line interfaces of the three build binaries.
//!
//! `build-custom` takes a feature selection, output path and format. The
//! fixed builds only accept the shared [`GlobalArgs`]. Unknown flags are
//! rejected by clap; [`parse_or_exit`] keeps usage errors on exit status 1.

pub mod enums;
mod tests;
mod validation;

use std::path::PathBuf;

use clap::{Args, Parser};
use clap::error::Error as ClapError;
use vjs_bundle::FeatureRegistry;

pub use enums::Format;
pub use validation::parse_feature_list;

/// Flags shared by every build binary.
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Enable verbose logging (debug level)
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Player repository root (defaults to the current directory)
    #[arg(long, value_name = "DIR")]
    pub cwd: Option<PathBuf>,
}

/// Build a custom video.js distribution from selected features
#[derive(Parser, Debug)]
#[command(
    name = "build-custom",
    version,
    about = "Build a custom video.js distribution from selected features",
    after_help = features_help()
)]
pub struct CustomCli {
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Comma-separated feature keys (default: all features)
    ///
    /// The core feature is always included.
    #[arg(long, value_name = "LIST")]
    pub features: Option<String>,

    /// Output file
    #[arg(long, value_name = "PATH", default_value = "dist/video-custom.js")]
    pub output: PathBuf,

    /// Output module format
    #[arg(long, value_enum, default_value = "umd")]
    pub format: Format,

    /// Print the generated entry and pipeline, then exit without bundling
    #[arg(long)]
    pub dry_run: bool,
}

impl CustomCli {
    /// Selected feature keys, or `None` when the default set applies.
    ///
    /// A missing, empty or all-blank `--features` value means the default.
    pub fn feature_keys(&self) -> Option<Vec<String>> {
        let keys = parse_feature_list(self.features.as_deref()?);
        (!keys.is_empty()).then_some(keys)
    }
}

/// Build the minified core-only distribution
#[derive(Parser, Debug)]
#[command(name = "build-minimal", version)]
pub struct MinimalCli {
    #[command(flatten)]
    pub global: GlobalArgs,
}

/// Build the minified player-only distribution without streaming, quality levels or subtitles
#[derive(Parser, Debug)]
#[command(name = "build-player-only", version)]
pub struct PlayerOnlyCli {
    #[command(flatten)]
    pub global: GlobalArgs,
}

/// Parse the process arguments into `P`, exiting on `--help`, `--version`
/// or a usage error.
pub fn parse_or_exit<P: Parser>() -> P {
    match P::try_parse() {
        Ok(args) => args,
        Err(err) => {
            let _ = err.print();
            std::process::exit(exit_code(&err));
        }
    }
}

/// `0` for help and version output, `1` for every usage error.
pub fn exit_code(err: &ClapError) -> i32 {
    if err.use_stderr() { 1 } else { 0 }
}

/// Help section listing every feature of the registry.
pub fn features_help() -> String {
    let registry = FeatureRegistry::player();
    let width = registry.keys().map(str::len).max().unwrap_or(0);

    let mut help = String::from("Features:\n");
    for feature in registry.iter() {
        let marker = if feature.required { " (required)" } else { "" };
        help.push_str(&format!(
            "  {:<width$}  {}{}\n",
            feature.key, feature.description, marker
        ));
    }
    help.push_str("\nExample:\n  build-custom --features core,hls --output dist/video-hls.js --format es");
    help
}
