use std::path::PathBuf;

pub fn default_package_manifest() -> PathBuf {
    PathBuf::from("package.json")
}

pub fn default_license_template() -> PathBuf {
    PathBuf::from("build/license-header.txt")
}

pub fn default_full_artifact() -> PathBuf {
    PathBuf::from("dist/video.js")
}

pub fn default_core_artifact() -> PathBuf {
    PathBuf::from("dist/alt/video.core.js")
}
