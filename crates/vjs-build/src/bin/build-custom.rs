//! Bundle a custom video.js distribution from a feature selection.

use miette::Result;
use vjs_build::{cli, commands, error, logger, ui};

#[tokio::main]
async fn main() -> Result<()> {
    let args: cli::CustomCli = cli::parse_or_exit();

    logger::init_logger(args.global.verbose, args.global.quiet, args.global.no_color);
    ui::init_colors(args.global.no_color);
    ui::set_quiet(args.global.quiet);

    commands::custom_execute(args)
        .await
        .map_err(error::cli_error_to_miette)
}
