//! Layered build settings.
//!
//! Paths the builds read and compare against are configurable so the tool
//! works from any checkout layout. Sources, lowest priority first:
//!
//! 1. built-in defaults (the upstream video.js layout)
//! 2. `player-build.toml` in the project root
//! 3. `VJS_BUILD_*` environment variables, e.g. `VJS_BUILD_LICENSE_TEMPLATE`
//!
//! Relative paths are resolved against the project root.

mod defaults;
mod tests;

use figment::{
    Figment,
    providers::{Env, Format as _, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use vjs_bundle::{BuildProfile, CompanionKind};

use crate::error::{ConfigError, Result};

pub use defaults::*;

/// Settings file looked up in the project root.
pub const SETTINGS_FILE: &str = "player-build.toml";

/// Prefix of the environment overrides.
pub const ENV_PREFIX: &str = "VJS_BUILD_";

const FIELDS: &[&str] = &[
    "package_manifest",
    "license_template",
    "full_artifact",
    "core_artifact",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BuildSettings {
    /// `package.json` providing version and copyright for the banner
    #[serde(default = "default_package_manifest")]
    pub package_manifest: PathBuf,

    /// License header template
    #[serde(default = "default_license_template")]
    pub license_template: PathBuf,

    /// Full distribution that reduced builds are compared against
    #[serde(default = "default_full_artifact")]
    pub full_artifact: PathBuf,

    /// Core-only distribution the player-only build is compared against
    #[serde(default = "default_core_artifact")]
    pub core_artifact: PathBuf,
}

impl Default for BuildSettings {
    fn default() -> Self {
        Self {
            package_manifest: default_package_manifest(),
            license_template: default_license_template(),
            full_artifact: default_full_artifact(),
            core_artifact: default_core_artifact(),
        }
    }
}

impl BuildSettings {
    /// Load settings for the project at `root`.
    pub fn load(root: &Path) -> Result<Self> {
        let figment = Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Toml::file(root.join(SETTINGS_FILE)))
            .merge(Env::prefixed(ENV_PREFIX).only(FIELDS));

        let settings: Self = figment.extract().map_err(|e| ConfigError::InvalidValue {
            field: "settings".to_string(),
            value: e.to_string(),
            hint: format!("Check {} and {}* variables", SETTINGS_FILE, ENV_PREFIX),
        })?;

        tracing::debug!(?settings, "loaded build settings");
        Ok(settings)
    }

    pub fn package_manifest(&self, root: &Path) -> PathBuf {
        root.join(&self.package_manifest)
    }

    pub fn license_template(&self, root: &Path) -> PathBuf {
        root.join(&self.license_template)
    }

    /// Companion artifacts for `profile`, resolved against `root`.
    pub fn companions(&self, profile: BuildProfile, root: &Path) -> Vec<(CompanionKind, PathBuf)> {
        profile
            .companions()
            .iter()
            .map(|kind| {
                let path = match kind {
                    CompanionKind::Full => &self.full_artifact,
                    CompanionKind::Core => &self.core_artifact,
                };
                (*kind, root.join(path))
            })
            .collect()
    }
}
