//! Browser support matrices for syntax downleveling.
//!
//! Matrices are browserslist queries. They are resolved through lightningcss's
//! browserslist integration into the per-engine minimum versions Rolldown's
//! transformer accepts (`chrome53`, `safari12.1`, ...).

use lightningcss::targets::Browsers;

use crate::{Error, Result};

/// Matrix used by the feature-selectable build.
pub const CUSTOM_MATRIX: &[&str] = &[
    "last 3 major versions",
    "Firefox ESR",
    "Chrome >= 53",
    "not dead",
    "not ie 11",
    "not baidu 7",
    "not and_qq 11",
    "not and_uc 12",
    "not op_mini all",
];

/// Matrix used by the minified minimal and player-only builds.
pub const COMPACT_MATRIX: &[&str] = &[
    "last 2 versions",
    "Chrome >= 60",
    "Firefox >= 60",
    "Safari >= 12",
    "Edge >= 79",
];

/// A browserslist query set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowserTargets {
    queries: Vec<String>,
}

impl BrowserTargets {
    pub fn new<I, S>(queries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            queries: queries.into_iter().map(Into::into).collect(),
        }
    }

    pub fn queries(&self) -> &[String] {
        &self.queries
    }

    /// Resolve the queries into engine targets, sorted by engine name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if browserslist rejects a query or the
    /// matrix selects no browsers at all.
    pub fn resolve(&self) -> Result<Vec<String>> {
        let browsers = Browsers::from_browserslist(self.queries.iter())
            .map_err(|e| Error::Configuration(format!("invalid browser matrix: {e}")))?
            .ok_or_else(|| {
                Error::Configuration(format!(
                    "browser matrix selects no browsers: {}",
                    self.queries.join(", ")
                ))
            })?;

        let engines = [
            ("chrome", browsers.chrome),
            ("edge", browsers.edge),
            ("firefox", browsers.firefox),
            ("ie", browsers.ie),
            ("ios", browsers.ios_saf),
            ("opera", browsers.opera),
            ("safari", browsers.safari),
            ("samsung", browsers.samsung),
        ];

        let targets: Vec<String> = engines
            .into_iter()
            .filter_map(|(engine, version)| version.map(|v| engine_target(engine, v)))
            .collect();

        tracing::debug!(targets = ?targets, "resolved browser matrix");
        Ok(targets)
    }
}

/// Format a lightningcss packed version (`major << 16 | minor << 8 | patch`).
fn engine_target(engine: &str, version: u32) -> String {
    let major = version >> 16;
    let minor = (version >> 8) & 0xff;
    let patch = version & 0xff;

    match (minor, patch) {
        (0, 0) => format!("{engine}{major}"),
        (_, 0) => format!("{engine}{major}.{minor}"),
        _ => format!("{engine}{major}.{minor}.{patch}"),
    }
}
