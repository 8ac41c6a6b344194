//! Lowering of a [`BundleConfig`] to Rolldown and execution of the build.

use std::path::Path;

use itertools::Either;
use rolldown::{
    BundlerBuilder, BundlerOptions, InputItem, IsExternal, Platform, RawMinifyOptions,
    ResolveOptions,
};
use rolldown_common::{BundlerTransformOptions, Output};

use crate::config::{BundleConfig, BundleInput, Stage};
use crate::plugins::{
    BrowserGlobalsPlugin, ExcludeModulesPlugin, InlineSvgPlugin, PluginRegistry,
    VirtualEntryPlugin,
};
use crate::report::BuildArtifact;
use crate::{Error, Result};

/// Export conditions for browser resolution.
const BROWSER_CONDITIONS: &[&str] = &["browser", "import", "module", "default"];

/// Bundle `config` and write the artifact with its banner.
///
/// The artifact is the first JavaScript chunk Rolldown produces, written to
/// [`BundleConfig::output_path`]. Parent directories are created as needed.
pub async fn bundle(config: &BundleConfig) -> Result<BuildArtifact> {
    let (options, plugins) = lower(config)?;

    tracing::debug!(
        input = %config.input.id().display(),
        plugins = plugins.len(),
        "starting rolldown"
    );

    let mut bundler = BundlerBuilder::default()
        .with_options(options)
        .with_plugins(plugins.into_rolldown_plugins())
        .build()
        .map_err(|e| Error::from_rolldown(&e))?;

    let output = bundler
        .generate()
        .await
        .map_err(|e| Error::from_rolldown(&e))?;

    if !output.warnings.is_empty() {
        tracing::warn!(count = output.warnings.len(), "bundler reported warnings");
    }

    let code = output
        .assets
        .iter()
        .find_map(|asset| match asset {
            Output::Chunk(chunk) => Some(chunk.code.as_str()),
            Output::Asset(_) => None,
        })
        .ok_or_else(|| Error::Bundler("bundle produced no JavaScript chunk".to_string()))?;

    let path = config.output_path();
    write_artifact(&path, &with_banner(&config.output.banner, code)).await?;

    BuildArtifact::measure(path)
}

/// Translate the configuration into Rolldown options and ordered plugins.
pub fn lower(config: &BundleConfig) -> Result<(BundlerOptions, PluginRegistry)> {
    let mut options = BundlerOptions {
        input: Some(vec![InputItem {
            name: None,
            import: config.input.id().to_string_lossy().to_string(),
        }]),
        cwd: Some(config.root.clone()),
        format: Some(config.output.format.to_rolldown()),
        platform: Some(Platform::Browser),
        external: Some(IsExternal::from(config.external.clone())),
        ..Default::default()
    };

    if config.output.format.uses_global_name() {
        options.name = Some(config.output.global_name.clone());
    }

    if config.minify {
        options.minify = Some(RawMinifyOptions::from(true));
    }

    let mut registry = PluginRegistry::new();
    if let BundleInput::Virtual(entry) = &config.input {
        registry.add(VirtualEntryPlugin::new(
            entry.id().to_string_lossy(),
            entry.source(),
        ));
    }

    let mut resolve = ResolveOptions {
        condition_names: Some(BROWSER_CONDITIONS.iter().map(|c| c.to_string()).collect()),
        extensions: Some(vec![".js".to_string(), ".mjs".to_string(), ".cjs".to_string()]),
        modules: Some(node_modules_chain(&config.root)),
        symlinks: Some(true),
        ..Default::default()
    };

    for stage in &config.stages {
        match stage {
            Stage::Exclude { modules } => {
                registry.add(ExcludeModulesPlugin::new(modules.iter().cloned()));
            }
            Stage::Alias { entries } => {
                resolve.alias = Some(
                    entries
                        .iter()
                        .map(|(alias, target)| {
                            (alias.clone(), vec![Some(target.to_string_lossy().to_string())])
                        })
                        .collect(),
                );
            }
            Stage::Resolve {
                main_fields,
                browser,
            } => {
                let mut fields = Vec::with_capacity(main_fields.len() + 1);
                if *browser {
                    fields.push("browser".to_string());
                }
                fields.extend(main_fields.iter().cloned());
                resolve.main_fields = Some(fields);
            }
            Stage::Json => {
                if let Some(extensions) = resolve.extensions.as_mut() {
                    extensions.push(".json".to_string());
                }
            }
            Stage::Globals { mapping } => {
                registry.add(BrowserGlobalsPlugin::new(
                    mapping.iter().map(|(m, g)| (m.as_str(), g.as_str())),
                ));
            }
            Stage::CommonJs => {
                // Rolldown wraps CommonJS modules natively.
                tracing::trace!("commonjs interop enabled");
            }
            Stage::Downlevel { targets } => {
                options.transform = Some(BundlerTransformOptions {
                    target: Some(Either::Right(targets.resolve()?)),
                    ..Default::default()
                });
            }
            Stage::InlineSvg => registry.add(InlineSvgPlugin::new()),
        }
    }

    options.resolve = Some(resolve);
    Ok((options, registry))
}

/// `node_modules` lookup directories from `root` up to the filesystem root.
fn node_modules_chain(root: &Path) -> Vec<String> {
    let mut paths: Vec<String> = root
        .ancestors()
        .map(|dir| dir.join("node_modules").to_string_lossy().to_string())
        .collect();
    paths.push("node_modules".to_string());
    paths
}

fn with_banner(banner: &str, code: &str) -> String {
    if banner.is_empty() {
        return code.to_string();
    }
    let separator = if banner.ends_with('\n') { "" } else { "\n" };
    format!("{banner}{separator}{code}")
}

async fn write_artifact(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| Error::filesystem(parent, e))?;
    }
    tokio::fs::write(path, contents)
        .await
        .map_err(|e| Error::filesystem(path, e))?;
    tracing::debug!(path = %path.display(), bytes = contents.len(), "wrote artifact");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BuildProfile;
    use crate::features::FeatureRegistry;
    use crate::options::{BuildOptions, OutputFormat};
    use crate::plugins::PluginPhase;

    fn lowered(
        profile: BuildProfile,
        keys: &[&str],
        format: OutputFormat,
    ) -> (BundlerOptions, PluginRegistry) {
        let registry = FeatureRegistry::player();
        let features = registry.resolve(keys.iter().copied()).unwrap().features;
        let options = BuildOptions::new(features, profile.default_output(), format);
        let config =
            BundleConfig::for_profile(profile, &registry, &options, "/project", String::new())
                .unwrap();
        lower(&config).unwrap()
    }

    #[test]
    fn test_custom_build_lowering() {
        let (options, plugins) = lowered(BuildProfile::Custom, &["core", "hls"], OutputFormat::Umd);

        let input = options.input.as_ref().unwrap();
        assert_eq!(input.len(), 1);
        assert_eq!(input[0].import, "/project/__vjs_entry__.js");
        assert_eq!(options.name.as_deref(), Some("videojs"));
        assert!(options.minify.is_none());
        assert!(options.transform.is_some());

        assert_eq!(
            plugins.phases(),
            vec![
                PluginPhase::Virtual,
                PluginPhase::Rewrite,
                PluginPhase::Interop,
                PluginPhase::Embed,
            ]
        );
    }

    #[test]
    fn test_resolution_lowering() {
        let (options, _) = lowered(BuildProfile::Minimal, &[], OutputFormat::Umd);
        let resolve = options.resolve.unwrap();

        assert_eq!(
            resolve.main_fields.unwrap(),
            vec!["browser", "jsnext:main", "module", "main"]
        );
        assert_eq!(
            resolve.alias.unwrap(),
            vec![(
                "video.js".to_string(),
                vec![Some("/project/src/js/video.js".to_string())]
            )]
        );
        assert!(resolve.extensions.unwrap().contains(&".json".to_string()));
        assert_eq!(
            resolve.modules.unwrap().first().map(String::as_str),
            Some("/project/node_modules")
        );
        assert!(options.minify.is_some());
    }

    #[test]
    fn test_fixed_profile_has_no_virtual_entry() {
        let (options, plugins) = lowered(BuildProfile::PlayerOnly, &[], OutputFormat::Umd);
        assert_eq!(
            options.input.unwrap()[0].import,
            "/project/src/js/video.js"
        );
        assert!(!plugins.phases().contains(&PluginPhase::Virtual));
    }

    #[test]
    fn test_global_name_only_for_umd() {
        let (options, _) = lowered(BuildProfile::Custom, &["core"], OutputFormat::Es);
        assert!(options.name.is_none());
    }

    #[test]
    fn test_node_modules_chain() {
        assert_eq!(
            node_modules_chain(Path::new("/a/b")),
            vec!["/a/b/node_modules", "/a/node_modules", "/node_modules", "node_modules"]
        );
    }

    #[test]
    fn test_banner_joining() {
        assert_eq!(with_banner("", "code"), "code");
        assert_eq!(with_banner("/* b */", "code"), "/* b */\ncode");
        assert_eq!(with_banner("/* b */\n", "code"), "/* b */\ncode");
    }
}
