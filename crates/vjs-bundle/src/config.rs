//! Bundle configuration for the three build profiles.
//!
//! A [`BundleConfig`] is assembled once per build and never mutated. The
//! stage list is an ordering contract with the bundler: specifier rewriting
//! runs before resolution, resolution before downleveling, and asset
//! embedding last. [`BundleConfig::validate`] enforces that contract.

use std::path::{Path, PathBuf};

use path_clean::PathClean;

use crate::entry::{CORE_BINDING, EntryModule};
use crate::features::{FeatureRegistry, FeatureSet, VTT};
use crate::options::{BuildOptions, OutputFormat};
use crate::plugins::{BROWSER_GLOBALS, PluginPhase};
use crate::report::CompanionKind;
use crate::targets::{BrowserTargets, COMPACT_MATRIX, CUSTOM_MATRIX};
use crate::{Error, Result};

/// Package name the player's own sources are aliased under.
pub const PACKAGE_NAME: &str = "video.js";

/// `package.json` fields consulted during resolution, in priority order.
pub const MAIN_FIELDS: &[&str] = &["jsnext:main", "module", "main"];

/// The fixed build profiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuildProfile {
    /// Feature-selectable build from a synthesized entry.
    Custom,
    /// Core only, minified.
    Minimal,
    /// Core only with every optional subsystem stubbed out, minified.
    PlayerOnly,
}

impl BuildProfile {
    pub fn name(self) -> &'static str {
        match self {
            Self::Custom => "custom",
            Self::Minimal => "minimal",
            Self::PlayerOnly => "player-only",
        }
    }

    pub fn default_output(self) -> &'static str {
        match self {
            Self::Custom => "dist/video-custom.js",
            Self::Minimal => "dist/video-minimal.js",
            Self::PlayerOnly => "dist/video-player-only.js",
        }
    }

    /// Browserslist queries for the downleveling stage.
    pub fn matrix(self) -> &'static [&'static str] {
        match self {
            Self::Custom => CUSTOM_MATRIX,
            Self::Minimal | Self::PlayerOnly => COMPACT_MATRIX,
        }
    }

    pub fn minify(self) -> bool {
        !matches!(self, Self::Custom)
    }

    /// Options used when nothing was selected on the command line.
    ///
    /// The custom build defaults to every feature; the fixed profiles only
    /// ever carry the required set.
    pub fn default_options(self, registry: &FeatureRegistry) -> BuildOptions {
        let features = match self {
            Self::Custom => registry.default_set(),
            Self::Minimal | Self::PlayerOnly => registry.required_set(),
        };
        BuildOptions::new(features, self.default_output(), OutputFormat::Umd)
    }

    /// Bare specifiers replaced by empty stubs for this profile.
    pub fn excluded_modules(
        self,
        registry: &FeatureRegistry,
        features: &FeatureSet,
    ) -> Vec<&'static str> {
        let subtitles = registry
            .get(VTT)
            .map(|f| f.source_refs)
            .unwrap_or_default();

        match self {
            Self::Custom if features.contains(VTT) => Vec::new(),
            Self::Custom | Self::Minimal => subtitles.to_vec(),
            Self::PlayerOnly => registry
                .iter()
                .filter(|f| !f.required)
                .flat_map(|f| f.source_refs.iter().copied())
                .collect(),
        }
    }

    /// Whether the license banner mentions the bundled subtitle library.
    pub fn includes_vtt(self, features: &FeatureSet) -> bool {
        matches!(self, Self::Custom) && features.contains(VTT)
    }

    /// Previously built artifacts this build is compared against.
    pub fn companions(self) -> &'static [CompanionKind] {
        match self {
            Self::Custom => &[],
            Self::Minimal => &[CompanionKind::Full],
            Self::PlayerOnly => &[CompanionKind::Full, CompanionKind::Core],
        }
    }

    /// What the artifact can and cannot do, printed after a successful build.
    pub fn capabilities(self) -> &'static [&'static str] {
        match self {
            Self::PlayerOnly => &[
                "Basic video playback",
                "Playback control bar",
                "Volume control",
                "Fullscreen support",
                "Default English language",
                "No subtitle support",
                "No HLS support",
                "No quality level selection",
            ],
            Self::Custom | Self::Minimal => &[],
        }
    }
}

impl std::fmt::Display for BuildProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Discriminant of a [`Stage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StageKind {
    Exclude,
    Alias,
    Resolve,
    Json,
    Globals,
    CommonJs,
    Downlevel,
    InlineSvg,
}

/// One source-transform step of the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stage {
    /// Replace these bare specifiers with empty modules.
    Exclude { modules: Vec<String> },
    /// Redirect a specifier to an absolute path.
    Alias { entries: Vec<(String, PathBuf)> },
    /// Node-style resolution with the given `package.json` main fields.
    Resolve {
        main_fields: Vec<String>,
        browser: bool,
    },
    /// Allow importing `.json` files.
    Json,
    /// Substitute shim packages with host globals.
    Globals { mapping: Vec<(String, String)> },
    /// CommonJS interop for legacy dependencies.
    CommonJs,
    /// Lower syntax to what the browser matrix supports.
    Downlevel { targets: BrowserTargets },
    /// Embed `.svg` imports as strings.
    InlineSvg,
}

impl Stage {
    pub fn kind(&self) -> StageKind {
        match self {
            Self::Exclude { .. } => StageKind::Exclude,
            Self::Alias { .. } => StageKind::Alias,
            Self::Resolve { .. } => StageKind::Resolve,
            Self::Json => StageKind::Json,
            Self::Globals { .. } => StageKind::Globals,
            Self::CommonJs => StageKind::CommonJs,
            Self::Downlevel { .. } => StageKind::Downlevel,
            Self::InlineSvg => StageKind::InlineSvg,
        }
    }

    pub fn name(&self) -> &'static str {
        match self.kind() {
            StageKind::Exclude => "exclude",
            StageKind::Alias => "alias",
            StageKind::Resolve => "resolve",
            StageKind::Json => "json",
            StageKind::Globals => "globals",
            StageKind::CommonJs => "commonjs",
            StageKind::Downlevel => "downlevel",
            StageKind::InlineSvg => "inline-svg",
        }
    }

    /// Plugin phase this stage runs in.
    pub fn phase(&self) -> PluginPhase {
        match self.kind() {
            StageKind::Exclude | StageKind::Alias => PluginPhase::Rewrite,
            StageKind::Resolve => PluginPhase::Resolve,
            StageKind::Json | StageKind::Globals | StageKind::CommonJs => PluginPhase::Interop,
            StageKind::Downlevel => PluginPhase::Downlevel,
            StageKind::InlineSvg => PluginPhase::Embed,
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Exclude { modules } => write!(f, "exclude {}", modules.join(", ")),
            Self::Alias { entries } => {
                write!(f, "alias")?;
                for (from, to) in entries {
                    write!(f, " {} -> {}", from, to.display())?;
                }
                Ok(())
            }
            Self::Resolve {
                main_fields,
                browser,
            } => {
                write!(f, "resolve {}", main_fields.join(", "))?;
                if *browser {
                    write!(f, " (browser)")?;
                }
                Ok(())
            }
            Self::Globals { mapping } => {
                let pairs: Vec<String> = mapping
                    .iter()
                    .map(|(module, global)| format!("{module}={global}"))
                    .collect();
                write!(f, "globals {}", pairs.join(", "))
            }
            Self::Downlevel { targets } => {
                write!(f, "downlevel {}", targets.queries().join(", "))
            }
            Self::Json | Self::CommonJs | Self::InlineSvg => f.write_str(self.name()),
        }
    }
}

/// Where the bundler starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BundleInput {
    /// A synthesized, in-memory entry.
    Virtual(EntryModule),
    /// A module on disk.
    File(PathBuf),
}

impl BundleInput {
    /// Input for `profile`: a synthesized entry for the custom build, the core
    /// module for the fixed profiles.
    ///
    /// `root` must already be absolute, see [`project_root`].
    pub fn for_profile(
        profile: BuildProfile,
        registry: &FeatureRegistry,
        features: &FeatureSet,
        root: &Path,
    ) -> Result<Self> {
        Ok(match profile {
            BuildProfile::Custom => Self::Virtual(EntryModule::synthesize(registry, features, root)),
            BuildProfile::Minimal | BuildProfile::PlayerOnly => {
                Self::File(core_module(registry, root)?)
            }
        })
    }

    /// Module id handed to the bundler as the entry.
    pub fn id(&self) -> &Path {
        match self {
            Self::Virtual(entry) => entry.id(),
            Self::File(path) => path,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputDescriptor {
    pub format: OutputFormat,
    /// Destination as given, relative paths are taken from the project root.
    pub file: PathBuf,
    pub global_name: String,
    /// Rendered license banner, prepended to the written artifact.
    pub banner: String,
}

/// Immutable description of one bundler invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleConfig {
    pub profile: BuildProfile,
    pub root: PathBuf,
    pub input: BundleInput,
    pub output: OutputDescriptor,
    pub external: Vec<String>,
    pub stages: Vec<Stage>,
    pub minify: bool,
}

impl BundleConfig {
    /// Assemble and validate the configuration for `profile`.
    ///
    /// `root` is the player repository root; relative roots are taken from
    /// the current directory.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Filesystem`] when `root` cannot be made absolute and
    /// [`Error::InvalidStageOrder`] if the assembled stages violate the
    /// pipeline ordering.
    pub fn for_profile(
        profile: BuildProfile,
        registry: &FeatureRegistry,
        options: &BuildOptions,
        root: impl AsRef<Path>,
        banner: String,
    ) -> Result<Self> {
        let root = project_root(root.as_ref())?;
        let input = BundleInput::for_profile(profile, registry, &options.features, &root)?;
        Self::assemble(profile, registry, input, options, root, banner)
    }

    /// Assemble the configuration around an already prepared input.
    pub fn assemble(
        profile: BuildProfile,
        registry: &FeatureRegistry,
        input: BundleInput,
        options: &BuildOptions,
        root: PathBuf,
        banner: String,
    ) -> Result<Self> {
        let mut stages = Vec::new();

        let excluded = profile.excluded_modules(registry, &options.features);
        if !excluded.is_empty() {
            stages.push(Stage::Exclude {
                modules: excluded.into_iter().map(String::from).collect(),
            });
        }

        stages.push(Stage::Alias {
            entries: vec![(PACKAGE_NAME.to_string(), core_module(registry, &root)?)],
        });
        stages.push(Stage::Resolve {
            main_fields: MAIN_FIELDS.iter().map(|f| f.to_string()).collect(),
            browser: true,
        });
        stages.push(Stage::Json);
        stages.push(Stage::Globals {
            mapping: BROWSER_GLOBALS
                .iter()
                .map(|(module, global)| (module.to_string(), global.to_string()))
                .collect(),
        });
        stages.push(Stage::CommonJs);
        stages.push(Stage::Downlevel {
            targets: BrowserTargets::new(profile.matrix().iter().copied()),
        });
        stages.push(Stage::InlineSvg);

        let config = Self {
            profile,
            root,
            input,
            output: OutputDescriptor {
                format: options.format,
                file: options.output.clone(),
                global_name: CORE_BINDING.to_string(),
                banner,
            },
            external: Vec::new(),
            stages,
            minify: profile.minify(),
        };

        config.validate()?;
        tracing::debug!(
            profile = %profile,
            stages = config.stages.len(),
            minify = config.minify,
            "assembled bundle configuration"
        );
        Ok(config)
    }

    /// Check the stage ordering contract.
    ///
    /// Phases must never decrease along the pipeline and inline embedding, if
    /// present, must be the final stage.
    pub fn validate(&self) -> Result<()> {
        for pair in self.stages.windows(2) {
            let (prev, next) = (&pair[0], &pair[1]);
            if next.phase() < prev.phase() {
                return Err(Error::InvalidStageOrder {
                    earlier: next.name(),
                    later: prev.name(),
                });
            }
        }

        if let Some(position) = self
            .stages
            .iter()
            .position(|s| s.kind() == StageKind::InlineSvg)
        {
            if let Some(after) = self.stages.get(position + 1) {
                return Err(Error::InvalidStageOrder {
                    earlier: after.name(),
                    later: "inline-svg",
                });
            }
        }

        Ok(())
    }

    /// Absolute destination of the artifact.
    pub fn output_path(&self) -> PathBuf {
        if self.output.file.is_absolute() {
            self.output.file.clean()
        } else {
            self.root.join(&self.output.file).clean()
        }
    }

    pub fn stage(&self, kind: StageKind) -> Option<&Stage> {
        self.stages.iter().find(|s| s.kind() == kind)
    }
}

/// Absolute, normalized form of `root`.
pub fn project_root(root: &Path) -> Result<PathBuf> {
    let absolute = std::path::absolute(root).map_err(|e| Error::filesystem(root, e))?;
    Ok(absolute.clean())
}

/// Absolute path of the core feature's module under `root`.
fn core_module(registry: &FeatureRegistry, root: &Path) -> Result<PathBuf> {
    let core = registry.core();
    let core_ref = core.source_refs.first().ok_or_else(|| {
        Error::Configuration(format!("feature '{}' has no source module", core.key))
    })?;
    Ok(root.join(core_ref).clean())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_for(profile: BuildProfile, keys: &[&str]) -> BundleConfig {
        let registry = FeatureRegistry::player();
        let mut options = profile.default_options(&registry);
        if !keys.is_empty() {
            options.features = registry.resolve(keys.iter().copied()).unwrap().features;
        }
        BundleConfig::for_profile(profile, &registry, &options, "/project", "/*! banner */".into())
            .unwrap()
    }

    fn kinds(config: &BundleConfig) -> Vec<StageKind> {
        config.stages.iter().map(Stage::kind).collect()
    }

    #[test]
    fn test_custom_pipeline_without_vtt() {
        let config = config_for(BuildProfile::Custom, &["core", "hls"]);
        assert_eq!(
            kinds(&config),
            vec![
                StageKind::Exclude,
                StageKind::Alias,
                StageKind::Resolve,
                StageKind::Json,
                StageKind::Globals,
                StageKind::CommonJs,
                StageKind::Downlevel,
                StageKind::InlineSvg,
            ]
        );
        assert_eq!(
            config.stage(StageKind::Exclude),
            Some(&Stage::Exclude {
                modules: vec!["videojs-vtt.js".to_string()]
            })
        );
        assert!(!config.minify);
        assert!(config.external.is_empty());
    }

    #[test]
    fn test_custom_with_vtt_keeps_subtitles() {
        let config = config_for(BuildProfile::Custom, &[]);
        assert!(config.stage(StageKind::Exclude).is_none());
        assert_eq!(config.stages.first().map(Stage::kind), Some(StageKind::Alias));
    }

    #[test]
    fn test_custom_input_is_virtual_entry() {
        let config = config_for(BuildProfile::Custom, &["core", "hls"]);
        let BundleInput::Virtual(entry) = &config.input else {
            panic!("expected a virtual entry");
        };
        assert!(entry.source().contains("@videojs/http-streaming"));
        assert_eq!(config.input.id(), Path::new("/project/__vjs_entry__.js"));
    }

    #[test]
    fn test_player_only_stubs_optional_modules() {
        let config = config_for(BuildProfile::PlayerOnly, &[]);
        let Some(Stage::Exclude { modules }) = config.stage(StageKind::Exclude) else {
            panic!("player-only must exclude modules");
        };
        assert_eq!(
            modules,
            &vec![
                "@videojs/http-streaming".to_string(),
                "videojs-contrib-quality-levels".to_string(),
                "videojs-vtt.js".to_string(),
            ]
        );
        assert_eq!(
            config.input,
            BundleInput::File(PathBuf::from("/project/src/js/video.js"))
        );
        assert!(config.minify);
    }

    #[test]
    fn test_fixed_profiles_use_compact_matrix() {
        for profile in [BuildProfile::Minimal, BuildProfile::PlayerOnly] {
            let config = config_for(profile, &[]);
            let Some(Stage::Downlevel { targets }) = config.stage(StageKind::Downlevel) else {
                panic!("missing downlevel stage");
            };
            assert_eq!(targets.queries()[0], "last 2 versions");
            assert_eq!(config.output.format, OutputFormat::Umd);
            assert_eq!(config.output.file, PathBuf::from(profile.default_output()));
        }
    }

    #[test]
    fn test_alias_points_at_core_module() {
        let config = config_for(BuildProfile::Minimal, &[]);
        assert_eq!(
            config.stage(StageKind::Alias),
            Some(&Stage::Alias {
                entries: vec![(
                    "video.js".to_string(),
                    PathBuf::from("/project/src/js/video.js")
                )]
            })
        );
    }

    #[test]
    fn test_output_descriptor_from_options() {
        let registry = FeatureRegistry::player();
        let features = registry.resolve(["core", "hls"]).unwrap().features;
        let options = BuildOptions::new(features, "out.js", OutputFormat::Es);
        let config = BundleConfig::for_profile(
            BuildProfile::Custom,
            &registry,
            &options,
            "/project",
            String::new(),
        )
        .unwrap();

        assert_eq!(config.output.format, OutputFormat::Es);
        assert_eq!(config.output.file, PathBuf::from("out.js"));
        assert_eq!(config.output.global_name, "videojs");
        assert_eq!(config.output_path(), PathBuf::from("/project/out.js"));
    }

    #[test]
    fn test_validate_rejects_resolution_before_alias() {
        let mut config = config_for(BuildProfile::Minimal, &[]);
        config.stages.swap(1, 2);
        let err = config.validate().unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidStageOrder {
                earlier: "alias",
                later: "resolve"
            }
        ));
    }

    #[test]
    fn test_validate_requires_embedding_last() {
        let mut config = config_for(BuildProfile::Custom, &["core"]);
        config.stages.push(Stage::InlineSvg);
        assert!(matches!(
            config.validate(),
            Err(Error::InvalidStageOrder { later: "inline-svg", .. })
        ));
    }

    #[test]
    fn test_banner_vtt_flag() {
        let registry = FeatureRegistry::player();
        let all = registry.default_set();
        assert!(BuildProfile::Custom.includes_vtt(&all));
        assert!(!BuildProfile::Minimal.includes_vtt(&all));
        assert!(!BuildProfile::Custom.includes_vtt(&registry.required_set()));
    }

    #[test]
    fn test_companions() {
        assert!(BuildProfile::Custom.companions().is_empty());
        assert_eq!(BuildProfile::Minimal.companions(), &[CompanionKind::Full]);
        assert_eq!(
            BuildProfile::PlayerOnly.companions(),
            &[CompanionKind::Full, CompanionKind::Core]
        );
        assert_eq!(BuildProfile::PlayerOnly.capabilities().len(), 8);
    }
}
