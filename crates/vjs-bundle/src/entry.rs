//! Entry module synthesis.
//!
//! The entry module is generated per build from the selected features and
//! served to Rolldown from memory, so nothing is written next to the sources.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use crate::features::{FeatureRegistry, FeatureSet};

/// File name the virtual entry is registered under, inside the project root.
pub const ENTRY_FILE_NAME: &str = "__vjs_entry__.js";

/// Binding the core module is imported as and re-exported from.
pub const CORE_BINDING: &str = "videojs";

/// Generated entry point for one build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryModule {
    id: PathBuf,
    source: String,
}

impl EntryModule {
    /// Synthesize the entry for `features`.
    ///
    /// The output imports the core module once, re-exports it as the default
    /// export, then adds one side-effect import per module of each selected
    /// optional feature, in registry order. Equal feature sets always produce
    /// identical text.
    pub fn synthesize(registry: &FeatureRegistry, features: &FeatureSet, root: &Path) -> Self {
        let core = registry.core();
        let mut source = String::new();

        if let Some((first, rest)) = core.source_refs.split_first() {
            let _ = writeln!(source, "import {CORE_BINDING} from '{first}';");
            let _ = writeln!(source, "export default {CORE_BINDING};");
            for module in rest {
                let _ = writeln!(source, "import '{module}';");
            }
        }

        for feature in features.optional() {
            for module in feature.source_refs {
                let _ = writeln!(source, "import '{module}';");
            }
        }

        tracing::debug!(features = %features, bytes = source.len(), "synthesized entry module");

        Self {
            id: root.join(ENTRY_FILE_NAME),
            source,
        }
    }

    /// Absolute module id the bundler sees for this entry.
    pub fn id(&self) -> &Path {
        &self.id
    }

    pub fn source(&self) -> &str {
        &self.source
    }
}
