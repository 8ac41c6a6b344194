//! End-to-end tests of the build binaries.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn bin(name: &str) -> Command {
    let mut cmd = Command::cargo_bin(name).unwrap();
    cmd.env("NO_COLOR", "1").env_remove("RUST_LOG");
    for var in ["PACKAGE_MANIFEST", "LICENSE_TEMPLATE", "FULL_ARTIFACT", "CORE_ARTIFACT"] {
        cmd.env_remove(format!("VJS_BUILD_{var}"));
    }
    cmd
}

/// Manifest and license header, enough for everything up to bundling.
fn write_project(root: &Path) {
    fs::create_dir_all(root.join("build")).unwrap();
    fs::write(
        root.join("package.json"),
        r#"{"name":"video.js","version":"8.10.0","copyright":"Copyright Brightcove, Inc."}"#,
    )
    .unwrap();
    fs::write(
        root.join("build/license-header.txt"),
        "/**\n * @license\n * Video.js <%= version %>\n */\n",
    )
    .unwrap();
}

#[test]
fn test_help_lists_features() {
    bin("build-custom")
        .arg("--help")
        .assert()
        .code(0)
        .stdout(predicate::str::contains("core"))
        .stdout(predicate::str::contains("(required)"))
        .stdout(predicate::str::contains("hls"))
        .stdout(predicate::str::contains("qualityLevels"))
        .stdout(predicate::str::contains("vtt"))
        .stdout(predicate::str::contains("--features"));
}

#[test]
fn test_unknown_feature_fails() {
    let temp = TempDir::new().unwrap();
    write_project(temp.path());

    bin("build-custom")
        .args(["--features", "core,dash", "--cwd"])
        .arg(temp.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("dash"));

    assert!(!temp.path().join("dist").exists());
}

#[test]
fn test_dry_run_prints_entry() {
    let temp = TempDir::new().unwrap();
    write_project(temp.path());

    bin("build-custom")
        .args(["--features", "qualityLevels", "--dry-run", "--cwd"])
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "import videojs from './src/js/video.js';",
        ))
        .stdout(predicate::str::contains(
            "import 'videojs-contrib-quality-levels';",
        ))
        .stdout(predicate::str::contains("http-streaming").not())
        .stderr(predicate::str::contains("Auto-added required feature: core"))
        .stderr(predicate::str::contains("Features included: core, qualityLevels"));

    assert!(!temp.path().join("dist").exists());
}

#[test]
fn test_dry_run_default_features() {
    let temp = TempDir::new().unwrap();
    write_project(temp.path());

    bin("build-custom")
        .args(["--dry-run", "--cwd"])
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("import 'videojs-vtt.js';"))
        .stderr(predicate::str::contains("Auto-added").not());
}

#[test]
fn test_quiet_dry_run_keeps_stderr_clean() {
    let temp = TempDir::new().unwrap();
    write_project(temp.path());

    bin("build-custom")
        .args(["--features", "hls", "--dry-run", "--quiet", "--cwd"])
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("@videojs/http-streaming"))
        .stderr(predicate::str::is_empty());
}

#[test]
fn test_version_exits_zero() {
    bin("build-player-only")
        .arg("--version")
        .assert()
        .code(0)
        .stdout(predicate::str::contains("build-player-only"));
}

#[test]
fn test_invalid_format_rejected() {
    bin("build-custom")
        .args(["--format", "amd"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("amd"));
}

#[test]
fn test_unknown_flag_rejected() {
    bin("build-minimal")
        .arg("--features")
        .arg("hls")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("--features"));
}

#[test]
fn test_minimal_without_project_fails() {
    let temp = TempDir::new().unwrap();

    bin("build-minimal")
        .arg("--cwd")
        .arg(temp.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Build failed while configuring"));
}

#[test]
fn test_player_only_missing_root() {
    let temp = TempDir::new().unwrap();

    bin("build-player-only")
        .arg("--cwd")
        .arg(temp.path().join("missing"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("missing"));
}
