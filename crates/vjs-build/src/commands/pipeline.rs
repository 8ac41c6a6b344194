//! Phased build pipeline shared by every binary.
//!
//! A run walks the [`BuildPhase`] lifecycle in order. Any error raised along
//! the way is wrapped in [`CliError::Failed`] naming the phase it happened
//! in, and the tracker moves to `Failed`.

use std::path::{Path, PathBuf};
use std::time::Instant;

use vjs_bundle::{
    BuildArtifact, BuildOptions, BuildPhase, BuildProfile, BundleConfig, BundleInput,
    CompanionKind, FeatureRegistry, FeatureSet, LicenseBanner, OutputFormat, PackageMetadata,
    SizeComparison, report,
};

use crate::config::BuildSettings;
use crate::error::{CliError, ConfigError, Result, ResultExt};
use crate::ui;

/// Everything a build needs from the command line.
#[derive(Debug, Clone)]
pub struct BuildRequest {
    pub profile: BuildProfile,
    pub root: PathBuf,
    /// Selected keys; `None` selects the profile's default set.
    pub feature_keys: Option<Vec<String>>,
    pub output: PathBuf,
    pub format: OutputFormat,
    pub dry_run: bool,
}

impl BuildRequest {
    /// Request for one of the fixed profiles, which take no feature selection.
    pub fn fixed(profile: BuildProfile, root: impl Into<PathBuf>) -> Self {
        Self {
            profile,
            root: root.into(),
            feature_keys: None,
            output: PathBuf::from(profile.default_output()),
            format: OutputFormat::Umd,
            dry_run: false,
        }
    }
}

/// Result of a successful run.
#[derive(Debug)]
pub enum BuildOutcome {
    /// `--dry-run`: the configuration was assembled but nothing was bundled.
    Planned(BundleConfig),
    Built {
        config: BundleConfig,
        artifact: BuildArtifact,
        comparisons: Vec<SizeComparison>,
    },
}

/// Forward-only phase tracker.
#[derive(Debug)]
pub(crate) struct PhaseTracker {
    phase: BuildPhase,
}

impl PhaseTracker {
    pub(crate) fn new() -> Self {
        Self {
            phase: BuildPhase::Idle,
        }
    }

    pub(crate) fn phase(&self) -> BuildPhase {
        self.phase
    }

    pub(crate) fn advance(&mut self, next: BuildPhase) -> Result<()> {
        if !self.phase.can_advance_to(next) {
            return Err(CliError::Custom(format!(
                "cannot move from {} to {}",
                self.phase, next
            )));
        }
        tracing::debug!(from = %self.phase, to = %next, "build phase");
        self.phase = next;
        Ok(())
    }

    /// Mark the run failed and attach the current phase to `err`.
    pub(crate) fn fail(&mut self, err: CliError) -> CliError {
        let phase = self.phase;
        self.phase = BuildPhase::Failed;
        match err {
            CliError::Failed { .. } => err,
            source => CliError::Failed {
                phase,
                source: Box::new(source),
            },
        }
    }
}

/// Run one build from start to finish.
pub async fn run(request: &BuildRequest) -> Result<BuildOutcome> {
    let mut tracker = PhaseTracker::new();
    match run_phases(request, &mut tracker).await {
        Ok(outcome) => Ok(outcome),
        Err(err) => Err(tracker.fail(err)),
    }
}

async fn run_phases(request: &BuildRequest, tracker: &mut PhaseTracker) -> Result<BuildOutcome> {
    let registry = FeatureRegistry::player();
    let profile = request.profile;

    tracker.advance(BuildPhase::ParsingArgs)?;
    let features = select_features(profile, &registry, request.feature_keys.as_deref())?;
    if profile == BuildProfile::Custom {
        ui::info(&format!("Features included: {}", features));
    }
    let options = BuildOptions::new(features, &request.output, request.format);
    let root = project_dir(&request.root)?;

    tracker.advance(BuildPhase::SynthesizingEntry)?;
    let input = BundleInput::for_profile(profile, &registry, &options.features, &root)?;
    tracing::debug!(entry = %input.id().display(), "bundle input ready");

    tracker.advance(BuildPhase::Configuring)?;
    let settings = BuildSettings::load(&root)?;
    let metadata = PackageMetadata::load(settings.package_manifest(&root))?;
    let banner = LicenseBanner::load(settings.license_template(&root))?
        .render(&metadata, profile.includes_vtt(&options.features))?;
    let config = BundleConfig::assemble(profile, &registry, input, &options, root, banner)?;

    if request.dry_run {
        tracker.advance(BuildPhase::Done)?;
        return Ok(BuildOutcome::Planned(config));
    }

    tracker.advance(BuildPhase::Bundling)?;
    let started = Instant::now();
    let spinner = ui::Spinner::new(&format!("Bundling {}...", config.output.file.display()));
    let artifact = match vjs_bundle::bundle(&config).await {
        Ok(artifact) => {
            spinner.finish(&format!(
                "Bundled in {}",
                ui::format_duration(started.elapsed())
            ));
            artifact
        }
        Err(err) => {
            spinner.fail("Bundling failed");
            return Err(err.into());
        }
    };

    tracker.advance(BuildPhase::Reporting)?;
    let companions = settings.companions(profile, &config.root);
    for (kind, path) in unusable_companions(&companions) {
        ui::warning(&format!(
            "Cannot compare against the {}: {} is not a file",
            kind.label(),
            path.display()
        ));
    }
    let comparisons = report::compare(&artifact, &companions);
    print_report(&config, &artifact, &comparisons);

    tracker.advance(BuildPhase::CleaningUp)?;
    // The entry is served from memory, so there is nothing on disk to remove.
    tracker.advance(BuildPhase::Done)?;

    Ok(BuildOutcome::Built {
        config,
        artifact,
        comparisons,
    })
}

/// Resolve the feature selection for `profile`.
///
/// Required features left out of an explicit selection are added back and
/// announced.
pub(crate) fn select_features(
    profile: BuildProfile,
    registry: &FeatureRegistry,
    keys: Option<&[String]>,
) -> Result<FeatureSet> {
    match (profile, keys) {
        (BuildProfile::Custom, Some(keys)) => {
            let resolved = registry.resolve(keys)?;
            for key in &resolved.injected {
                ui::info(&format!("Auto-added required feature: {}", key));
            }
            Ok(resolved.features)
        }
        (BuildProfile::Custom, None) => Ok(registry.default_set()),
        (_, Some(_)) => Err(CliError::InvalidArgument(format!(
            "the {} build does not take a feature selection",
            profile
        ))),
        (_, None) => Ok(profile.default_options(registry).features),
    }
}

/// Absolute project root, which must be an existing directory.
fn project_dir(root: &Path) -> Result<PathBuf> {
    let root = vjs_bundle::config::project_root(root)?;
    let metadata = std::fs::metadata(&root).with_path(&root)?;
    if !metadata.is_dir() {
        return Err(ConfigError::RootNotFound(root).into());
    }
    Ok(root)
}

/// Companions that are configured and present but cannot be measured.
///
/// Companions that do not exist yet are skipped without a warning.
fn unusable_companions(
    companions: &[(CompanionKind, PathBuf)],
) -> impl Iterator<Item = &(CompanionKind, PathBuf)> {
    companions
        .iter()
        .filter(|(_, path)| path.exists() && !path.is_file())
}

fn print_report(config: &BundleConfig, artifact: &BuildArtifact, comparisons: &[SizeComparison]) {
    ui::success(&format!("Build complete: {}", config.output.file.display()));
    ui::info(&ui::size_line(artifact, config.minify));
    for comparison in comparisons {
        ui::info(&ui::comparison_line(comparison, artifact));
    }

    let capabilities = config.profile.capabilities();
    if !capabilities.is_empty() {
        ui::heading("This build includes:");
        for line in capabilities {
            ui::bullet(line);
        }
    }
}
