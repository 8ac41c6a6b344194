//! `build-minimal` and `build-player-only` command implementation.

use std::path::PathBuf;

use vjs_bundle::BuildProfile;

use crate::cli::GlobalArgs;
use crate::commands::pipeline::{self, BuildRequest};
use crate::error::Result;
use crate::ui;

/// Execute one of the fixed, minified builds.
pub async fn execute(profile: BuildProfile, global: GlobalArgs) -> Result<()> {
    let root = global.cwd.unwrap_or_else(|| PathBuf::from("."));
    let request = BuildRequest::fixed(profile, root);

    ui::info(&format!("Starting {} build...", profile));
    pipeline::run(&request).await?;
    Ok(())
}
