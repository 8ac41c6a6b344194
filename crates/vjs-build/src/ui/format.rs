//! Formatting of durations and size report lines.

use std::time::Duration;

use vjs_bundle::{BuildArtifact, SizeComparison};

/// Format a duration as `ms`, seconds or `m s`.
///
/// ```
/// use std::time::Duration;
/// use vjs_build::ui::format_duration;
///
/// assert_eq!(format_duration(Duration::from_millis(50)), "50ms");
/// assert_eq!(format_duration(Duration::from_millis(1500)), "1.50s");
/// assert_eq!(format_duration(Duration::from_secs(90)), "1m 30s");
/// ```
pub fn format_duration(duration: Duration) -> String {
    let total_ms = duration.as_millis();

    if total_ms < 1000 {
        format!("{}ms", total_ms)
    } else if total_ms < 60_000 {
        format!("{:.2}s", duration.as_secs_f64())
    } else {
        let secs = duration.as_secs();
        format!("{}m {}s", secs / 60, secs % 60)
    }
}

/// `File size: 123.45 KB`, with megabytes appended for minified builds.
pub fn size_line(artifact: &BuildArtifact, with_mb: bool) -> String {
    if with_mb {
        format!(
            "File size: {:.2} KB ({:.2} MB)",
            artifact.kb(),
            artifact.mb()
        )
    } else {
        format!("File size: {:.2} KB", artifact.kb())
    }
}

/// `Reduced by 75.0% compared to full version (400.00 KB -> 100.00 KB)`.
pub fn comparison_line(comparison: &SizeComparison, artifact: &BuildArtifact) -> String {
    format!(
        "Reduced by {:.1}% compared to {} ({:.2} KB -> {:.2} KB)",
        comparison.reduction_percent,
        comparison.kind.label(),
        comparison.companion_kb(),
        artifact.kb()
    )
}
