//! Command implementations for the build binaries.
//!
//! - [`custom`] - `build-custom`, bundles a feature selection
//! - [`fixed`] - `build-minimal` and `build-player-only`
//!
//! Both drive the same phased [`pipeline`] and differ only in how the
//! request is put together and what is reported afterwards.

pub mod custom;
pub mod fixed;
pub mod pipeline;

pub use custom::execute as custom_execute;
pub use fixed::execute as fixed_execute;
pub use pipeline::{BuildOutcome, BuildRequest};
