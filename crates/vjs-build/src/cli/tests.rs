#[cfg(test)]
mod tests {
    use crate::cli::{
        CustomCli, Format, MinimalCli, exit_code, features_help, parse_feature_list,
    };
    use clap::{CommandFactory, Parser};
    use std::path::PathBuf;

    #[test]
    fn test_parse_feature_list() {
        assert_eq!(parse_feature_list("core,hls"), vec!["core", "hls"]);
        assert_eq!(parse_feature_list(" vtt , qualityLevels,"), vec!["vtt", "qualityLevels"]);
        assert!(parse_feature_list("").is_empty());
        assert!(parse_feature_list(" , ").is_empty());
    }

    #[test]
    fn test_custom_defaults() {
        let cli = CustomCli::parse_from(["build-custom"]);
        assert_eq!(cli.output, PathBuf::from("dist/video-custom.js"));
        assert_eq!(cli.format, Format::Umd);
        assert!(cli.feature_keys().is_none());
        assert!(!cli.dry_run);
    }

    #[test]
    fn test_custom_all_flags() {
        let cli = CustomCli::parse_from([
            "build-custom",
            "--features",
            "core,hls",
            "--output",
            "out.js",
            "--format",
            "es",
            "-v",
        ]);
        assert_eq!(cli.feature_keys(), Some(vec!["core".into(), "hls".into()]));
        assert_eq!(cli.output, PathBuf::from("out.js"));
        assert_eq!(cli.format, Format::Es);
        assert!(cli.global.verbose);
    }

    #[test]
    fn test_empty_features_means_default() {
        let cli = CustomCli::parse_from(["build-custom", "--features", ""]);
        assert!(cli.feature_keys().is_none());
    }

    #[test]
    fn test_unknown_flag_rejected() {
        assert!(CustomCli::try_parse_from(["build-custom", "--minify"]).is_err());
        assert!(MinimalCli::try_parse_from(["build-minimal", "--features", "hls"]).is_err());
    }

    #[test]
    fn test_invalid_format_rejected() {
        assert!(CustomCli::try_parse_from(["build-custom", "--format", "iife"]).is_err());
        let cli = CustomCli::parse_from(["build-custom", "--format", "esm"]);
        assert_eq!(cli.format, Format::Es);
    }

    #[test]
    fn test_usage_errors_exit_one() {
        let err = CustomCli::try_parse_from(["build-custom", "--format", "amd"]).unwrap_err();
        assert_eq!(exit_code(&err), 1);
        let err = MinimalCli::try_parse_from(["build-minimal", "--output", "x.js"]).unwrap_err();
        assert_eq!(exit_code(&err), 1);
    }

    #[test]
    fn test_help_and_version_exit_zero() {
        let err = CustomCli::try_parse_from(["build-custom", "--help"]).unwrap_err();
        assert_eq!(exit_code(&err), 0);
        let err = MinimalCli::try_parse_from(["build-minimal", "--version"]).unwrap_err();
        assert_eq!(exit_code(&err), 0);
    }

    #[test]
    fn test_verbose_conflicts_with_quiet() {
        assert!(MinimalCli::try_parse_from(["build-minimal", "-v", "-q"]).is_err());
    }

    #[test]
    fn test_help_lists_features() {
        insta::assert_snapshot!(features_help(), @r"
        Features:
          core           Core player functionality (required)
          hls            HLS streaming support
          qualityLevels  Quality level selection
          vtt            WebVTT subtitle support

        Example:
          build-custom --features core,hls --output dist/video-hls.js --format es
        ");
    }

    #[test]
    fn test_cli_definitions_are_valid() {
        CustomCli::command().debug_assert();
        MinimalCli::command().debug_assert();
    }
}
