//! Resolved build options.

use std::path::PathBuf;

use crate::features::FeatureSet;
use crate::{Error, Result};

/// Packaging format of the output artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Universal module definition, loadable from a `<script>` tag.
    #[default]
    Umd,
    /// ECMAScript module.
    Es,
    /// CommonJS module.
    Cjs,
}

impl OutputFormat {
    /// Parse a format name.
    ///
    /// Accepts `umd`, `es` (or `esm`) and `cjs`, case-insensitive.
    pub fn parse(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "umd" => Ok(Self::Umd),
            "es" | "esm" => Ok(Self::Es),
            "cjs" => Ok(Self::Cjs),
            _ => Err(Error::Configuration(format!(
                "Invalid output format: '{}'. Expected: umd, es, cjs",
                s
            ))),
        }
    }

    pub(crate) fn to_rolldown(self) -> rolldown::OutputFormat {
        match self {
            Self::Umd => rolldown::OutputFormat::Umd,
            Self::Es => rolldown::OutputFormat::Esm,
            Self::Cjs => rolldown::OutputFormat::Cjs,
        }
    }

    /// Whether the format wraps exports in a named global.
    pub fn uses_global_name(self) -> bool {
        matches!(self, Self::Umd)
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Umd => write!(f, "umd"),
            Self::Es => write!(f, "es"),
            Self::Cjs => write!(f, "cjs"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Options for one build, fixed before bundling begins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOptions {
    pub features: FeatureSet,
    pub output: PathBuf,
    pub format: OutputFormat,
}

impl BuildOptions {
    pub fn new(features: FeatureSet, output: impl Into<PathBuf>, format: OutputFormat) -> Self {
        Self {
            features,
            output: output.into(),
            format,
        }
    }
}
