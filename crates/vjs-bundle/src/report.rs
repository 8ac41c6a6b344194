//! Artifact size reporting and comparison against earlier distributions.

use std::path::{Path, PathBuf};

use crate::{Error, Result};

const KIB: f64 = 1024.0;
const MIB: f64 = 1024.0 * 1024.0;

/// A written bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildArtifact {
    pub path: PathBuf,
    pub size: u64,
}

impl BuildArtifact {
    /// Measure the file at `path`.
    pub fn measure(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let size = std::fs::metadata(&path)
            .map_err(|e| Error::filesystem(&path, e))?
            .len();
        Ok(Self { path, size })
    }

    pub fn kb(&self) -> f64 {
        self.size as f64 / KIB
    }

    pub fn mb(&self) -> f64 {
        self.size as f64 / MIB
    }
}

/// Which earlier distribution a build is compared against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompanionKind {
    /// The full distribution with every feature.
    Full,
    /// The core-only alternative distribution.
    Core,
}

impl CompanionKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Full => "full version",
            Self::Core => "core version",
        }
    }
}

/// Size of an artifact relative to one companion.
#[derive(Debug, Clone, PartialEq)]
pub struct SizeComparison {
    pub kind: CompanionKind,
    pub companion: PathBuf,
    pub companion_size: u64,
    /// `(1 - size / companion_size) * 100`; negative when the artifact grew.
    pub reduction_percent: f64,
}

impl SizeComparison {
    pub fn companion_kb(&self) -> f64 {
        self.companion_size as f64 / KIB
    }
}

pub fn reduction_percent(size: u64, companion_size: u64) -> f64 {
    if companion_size == 0 {
        return 0.0;
    }
    (1.0 - size as f64 / companion_size as f64) * 100.0
}

/// Compare `artifact` with each companion that exists on disk.
///
/// Missing companions are skipped silently; they only exist after the full
/// distribution has been built.
pub fn compare(
    artifact: &BuildArtifact,
    companions: &[(CompanionKind, PathBuf)],
) -> Vec<SizeComparison> {
    companions
        .iter()
        .filter_map(|(kind, path)| {
            let companion_size = companion_size(path)?;
            Some(SizeComparison {
                kind: *kind,
                companion: path.clone(),
                companion_size,
                reduction_percent: reduction_percent(artifact.size, companion_size),
            })
        })
        .collect()
}

fn companion_size(path: &Path) -> Option<u64> {
    match std::fs::metadata(path) {
        Ok(meta) if meta.is_file() => Some(meta.len()),
        Ok(_) => None,
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "companion artifact not available");
            None
        }
    }
}
