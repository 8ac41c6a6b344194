//! License banner generation.
//!
//! The banner template is read once per build and rendered with package
//! metadata. Templates may use Jinja syntax or the lodash forms found in the
//! upstream `build/license-header.txt` (`<%= version %>`, `<% if (x) { %>`,
//! `<% } %>`), which are rewritten to Jinja before rendering.

use std::path::Path;
use std::sync::LazyLock;

use chrono::Datelike;
use minijinja::{Environment, context};
use regex::Regex;
use serde::Deserialize;

use crate::{Error, Result};

static LODASH_INTERPOLATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<%=\s*(.+?)\s*%>").expect("valid regex"));
static LODASH_IF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<%\s*if\s*\((.+?)\)\s*\{\s*%>").expect("valid regex"));
static LODASH_CLOSE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<%\s*\}\s*%>").expect("valid regex"));

/// The subset of `package.json` the banner needs.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PackageMetadata {
    pub version: String,
    #[serde(default)]
    pub copyright: Option<String>,
}

impl PackageMetadata {
    /// Read and parse a package manifest.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] when the file is missing, unreadable or
    /// has no `version` field.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            Error::Configuration(format!(
                "cannot read package manifest {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::parse(&raw).map_err(|e| {
            Error::Configuration(format!("invalid package manifest {}: {}", path.display(), e))
        })
    }

    pub fn parse(raw: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}

/// A loaded, not yet rendered, license header template.
#[derive(Debug, Clone)]
pub struct LicenseBanner {
    template: String,
}

impl LicenseBanner {
    /// Read the template from disk.
    ///
    /// # Errors
    ///
    /// A missing or unreadable template is a [`Error::Configuration`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            Error::Configuration(format!(
                "cannot read license template {}: {}",
                path.display(),
                e
            ))
        })?;
        tracing::debug!(path = %path.display(), "loaded license template");
        Ok(Self::from_template(raw))
    }

    pub fn from_template(template: impl Into<String>) -> Self {
        Self {
            template: normalize_lodash(&template.into()),
        }
    }

    /// Render the banner text prepended to the artifact.
    pub fn render(&self, metadata: &PackageMetadata, includes_vtt: bool) -> Result<String> {
        let mut env = Environment::new();
        env.set_keep_trailing_newline(true);

        let copyright = metadata.copyright.clone().unwrap_or_default();
        let rendered = env.render_str(
            &self.template,
            context! {
                version => &metadata.version,
                copyright => copyright,
                year => chrono::Local::now().year(),
                includes_vtt => includes_vtt,
                includesVtt => includes_vtt,
            },
        )?;
        Ok(rendered)
    }
}

/// Rewrite lodash template tags into their Jinja equivalents.
fn normalize_lodash(template: &str) -> String {
    let step = LODASH_INTERPOLATE.replace_all(template, "{{ $1 }}");
    let step = LODASH_IF.replace_all(&step, "{% if $1 %}");
    LODASH_CLOSE.replace_all(&step, "{% endif %}").into_owned()
}
