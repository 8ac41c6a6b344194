//! Command-line front end for video.js distribution builds.
//!
//! Three binaries share this crate:
//!
//! - `build-custom` - bundle a feature selection into `dist/video-custom.js`
//! - `build-minimal` - minified core-only build
//! - `build-player-only` - minified core build with optional subsystems stubbed
//!
//! Each binary parses its arguments with [`cli`], initializes [`logger`] and
//! hands off to [`commands`], which drives the `vjs-bundle` pipeline and
//! reports through [`ui`]. Errors are typed in [`error`] and rendered with
//! miette at the top of each binary.
//!
//! # Example
//!
//! ```rust,no_run
//! use vjs_build::{error::Result, logger};
//!
//! fn main() -> Result<()> {
//!     logger::init_logger(false, false, false);
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logger;
pub mod ui;

pub use error::{CliError, ConfigError, Result, ResultExt};
