//! Build the minified core-only video.js distribution.

use miette::Result;
use vjs_build::{cli, commands, error, logger, ui};
use vjs_bundle::BuildProfile;

#[tokio::main]
async fn main() -> Result<()> {
    let args: cli::MinimalCli = cli::parse_or_exit();

    logger::init_logger(args.global.verbose, args.global.quiet, args.global.no_color);
    ui::init_colors(args.global.no_color);
    ui::set_quiet(args.global.quiet);

    commands::fixed_execute(BuildProfile::Minimal, args.global)
        .await
        .map_err(error::cli_error_to_miette)
}
