//! Static registry of player features.
//!
//! Each feature maps a key to the modules it contributes to the entry point.
//! The registry is defined once and never mutated; its definition order is the
//! order imports appear in the synthesized entry.

use crate::{Error, Result};

/// Key of the core playback feature.
pub const CORE: &str = "core";
/// Key of the HLS streaming feature.
pub const HLS: &str = "hls";
/// Key of the quality level selection feature.
pub const QUALITY_LEVELS: &str = "qualityLevels";
/// Key of the WebVTT subtitle feature.
pub const VTT: &str = "vtt";

/// A named, independently includable unit of player functionality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FeatureDescriptor {
    pub key: &'static str,
    pub description: &'static str,
    pub required: bool,
    /// Module specifiers contributed by this feature, in import order.
    pub source_refs: &'static [&'static str],
}

static CORE_FEATURE: FeatureDescriptor = FeatureDescriptor {
    key: CORE,
    description: "Core player functionality",
    required: true,
    source_refs: &["./src/js/video.js"],
};

static HLS_FEATURE: FeatureDescriptor = FeatureDescriptor {
    key: HLS,
    description: "HLS streaming support",
    required: false,
    source_refs: &["@videojs/http-streaming"],
};

static QUALITY_LEVELS_FEATURE: FeatureDescriptor = FeatureDescriptor {
    key: QUALITY_LEVELS,
    description: "Quality level selection",
    required: false,
    source_refs: &["videojs-contrib-quality-levels"],
};

static VTT_FEATURE: FeatureDescriptor = FeatureDescriptor {
    key: VTT,
    description: "WebVTT subtitle support",
    required: false,
    source_refs: &["videojs-vtt.js"],
};

static PLAYER_FEATURES: &[&FeatureDescriptor] = &[
    &CORE_FEATURE,
    &HLS_FEATURE,
    &QUALITY_LEVELS_FEATURE,
    &VTT_FEATURE,
];

/// Fixed, ordered mapping from feature key to descriptor.
///
/// The required feature is held separately from the table so a registry
/// always has exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureRegistry {
    core: &'static FeatureDescriptor,
    features: &'static [&'static FeatureDescriptor],
}

impl FeatureRegistry {
    /// The video.js feature table.
    pub fn player() -> Self {
        Self {
            core: &CORE_FEATURE,
            features: PLAYER_FEATURES,
        }
    }

    /// Look up a descriptor by key.
    pub fn get(&self, key: &str) -> Option<&'static FeatureDescriptor> {
        self.iter().find(|f| f.key == key)
    }

    /// All descriptors in definition order.
    pub fn iter(&self) -> impl Iterator<Item = &'static FeatureDescriptor> {
        self.features.iter().copied()
    }

    /// All keys in definition order.
    pub fn keys(&self) -> impl Iterator<Item = &'static str> {
        self.iter().map(|f| f.key)
    }

    /// Keys that are always included.
    pub fn required_keys(&self) -> impl Iterator<Item = &'static str> {
        self.iter().filter(|f| f.required).map(|f| f.key)
    }

    /// The required feature whose first module is the player's default export.
    pub fn core(&self) -> &'static FeatureDescriptor {
        self.core
    }

    /// Every registered feature, used when no selection is given.
    pub fn default_set(&self) -> FeatureSet {
        FeatureSet {
            features: self.features.to_vec(),
        }
    }

    /// Only the required features.
    pub fn required_set(&self) -> FeatureSet {
        FeatureSet {
            features: self.iter().filter(|f| f.required).collect(),
        }
    }

    /// Resolve user-selected keys into a normalized [`FeatureSet`].
    ///
    /// Selection order and duplicates are irrelevant. Required features that
    /// were not selected are added and reported in [`ResolvedFeatures::injected`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownFeature`] for the first key not in the registry.
    pub fn resolve<I, S>(&self, keys: I) -> Result<ResolvedFeatures>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut selected = vec![false; self.features.len()];

        for key in keys {
            let key = key.as_ref().trim();
            if key.is_empty() {
                continue;
            }
            let idx = self
                .features
                .iter()
                .position(|f| f.key == key)
                .ok_or_else(|| Error::UnknownFeature {
                    key: key.to_string(),
                    available: self.keys().collect::<Vec<_>>().join(", "),
                })?;
            selected[idx] = true;
        }

        let mut injected = Vec::new();
        for (idx, feature) in self.iter().enumerate() {
            if feature.required && !selected[idx] {
                tracing::debug!(feature = feature.key, "auto-added required feature");
                injected.push(feature.key);
                selected[idx] = true;
            }
        }

        let features = self
            .iter()
            .zip(selected)
            .filter_map(|(feature, on)| on.then_some(feature))
            .collect();

        Ok(ResolvedFeatures {
            features: FeatureSet { features },
            injected,
        })
    }
}

impl Default for FeatureRegistry {
    fn default() -> Self {
        Self::player()
    }
}

/// Outcome of [`FeatureRegistry::resolve`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedFeatures {
    pub features: FeatureSet,
    /// Required keys that were added because the selection omitted them.
    pub injected: Vec<&'static str>,
}

/// A normalized feature selection, always in registry order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FeatureSet {
    features: Vec<&'static FeatureDescriptor>,
}

impl FeatureSet {
    pub fn contains(&self, key: &str) -> bool {
        self.features.iter().any(|f| f.key == key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &'static FeatureDescriptor> + '_ {
        self.features.iter().copied()
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.features.iter().map(|f| f.key)
    }

    /// Selected features that are not required.
    pub fn optional(&self) -> impl Iterator<Item = &'static FeatureDescriptor> + '_ {
        self.features.iter().copied().filter(|f| !f.required)
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

impl std::fmt::Display for FeatureSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.keys().collect::<Vec<_>>().join(", "))
    }
}
