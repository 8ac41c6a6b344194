#[cfg(test)]
mod tests {
    use crate::config::*;
    use serial_test::serial;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    #[serial]
    fn test_defaults_without_file() {
        let temp = TempDir::new().unwrap();
        let settings = BuildSettings::load(temp.path()).unwrap();
        assert_eq!(settings, BuildSettings::default());
        assert_eq!(
            settings.license_template(temp.path()),
            temp.path().join("build/license-header.txt")
        );
    }

    #[test]
    #[serial]
    fn test_file_overrides_defaults() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(SETTINGS_FILE),
            "license_template = \"LICENSE.tpl\"\nfull_artifact = \"out/video.js\"\n",
        )
        .unwrap();

        let settings = BuildSettings::load(temp.path()).unwrap();
        assert_eq!(settings.license_template, PathBuf::from("LICENSE.tpl"));
        assert_eq!(settings.full_artifact, PathBuf::from("out/video.js"));
        assert_eq!(settings.package_manifest, PathBuf::from("package.json"));
    }

    #[test]
    #[serial]
    fn test_env_overrides_file() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(SETTINGS_FILE),
            "package_manifest = \"from-file.json\"\n",
        )
        .unwrap();

        unsafe {
            std::env::set_var("VJS_BUILD_PACKAGE_MANIFEST", "from-env.json");
        }
        let settings = BuildSettings::load(temp.path());
        unsafe {
            std::env::remove_var("VJS_BUILD_PACKAGE_MANIFEST");
        }

        assert_eq!(
            settings.unwrap().package_manifest,
            PathBuf::from("from-env.json")
        );
    }

    #[test]
    #[serial]
    fn test_unknown_key_rejected() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(SETTINGS_FILE), "licence = \"typo\"\n").unwrap();

        let err = BuildSettings::load(temp.path()).unwrap_err();
        assert!(err.to_string().contains("Hint:"));
    }

    #[test]
    fn test_companions_per_profile() {
        let settings = BuildSettings::default();
        let root = Path::new("/p");

        assert!(settings.companions(BuildProfile::Custom, root).is_empty());
        assert_eq!(
            settings.companions(BuildProfile::PlayerOnly, root),
            vec![
                (CompanionKind::Full, PathBuf::from("/p/dist/video.js")),
                (CompanionKind::Core, PathBuf::from("/p/dist/alt/video.core.js")),
            ]
        );
    }
}
