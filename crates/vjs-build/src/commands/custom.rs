//! `build-custom` command implementation.

use std::io::Write;
use std::path::PathBuf;

use vjs_bundle::{BuildProfile, BundleConfig, BundleInput};

use crate::cli::CustomCli;
use crate::commands::pipeline::{self, BuildOutcome, BuildRequest};
use crate::error::{Result, ResultExt};
use crate::ui;

/// Execute the custom build.
///
/// With `--dry-run` the synthesized entry is written to stdout and the stage
/// pipeline to stderr; nothing is bundled.
pub async fn execute(args: CustomCli) -> Result<()> {
    let request = BuildRequest {
        profile: BuildProfile::Custom,
        root: args.global.cwd.clone().unwrap_or_else(|| PathBuf::from(".")),
        feature_keys: args.feature_keys(),
        output: args.output.clone(),
        format: args.format.into(),
        dry_run: args.dry_run,
    };

    ui::info("Starting custom build...");
    match pipeline::run(&request).await? {
        BuildOutcome::Planned(config) => print_plan(&config),
        BuildOutcome::Built { .. } => Ok(()),
    }
}

fn print_plan(config: &BundleConfig) -> Result<()> {
    if let BundleInput::Virtual(entry) = &config.input {
        let mut stdout = std::io::stdout().lock();
        stdout
            .write_all(entry.source().as_bytes())
            .context("Failed to print the generated entry")?;
    }

    ui::heading("Pipeline:");
    for stage in &config.stages {
        ui::bullet(&stage.to_string());
    }
    ui::info(&format!(
        "Would write {} ({})",
        config.output_path().display(),
        config.output.format
    ));
    Ok(())
}
