#[cfg(test)]
mod tests {
    use crate::*;

    #[test]
    fn test_defaults_match_fixed_output_name() {
        let args = CliArgs::try_parse_from(["unroll"]).expect("should parse");
        assert_eq!(args.output, PathBuf::from("execution_times.png"));
        assert!(!args.no_show);
    }

    #[test]
    fn test_output_and_no_show_flags() {
        let args = CliArgs::try_parse_from(["unroll", "-o", "plots/run.png", "--no-show"]).expect("should parse");
        assert_eq!(args.output, PathBuf::from("plots/run.png"));
        assert!(args.no_show);

        let args = CliArgs::try_parse_from(["unroll", "--output", "run.png"]).expect("should parse long flag");
        assert_eq!(args.output, PathBuf::from("run.png"));
    }

    #[test]
    fn test_sanitize_path_allows_simple_relative() {
        let p = sanitize_path("out/execution_times.png").expect("relative path should be allowed");
        assert_eq!(p, PathBuf::from("out/execution_times.png"));
    }

    #[test]
    fn test_sanitize_path_rejects_parent_dir() {
        let err = sanitize_path("out/../plot.png").unwrap_err();
        assert!(err.to_string().contains("Parent directory components"));
    }

    #[test]
    fn test_sanitize_path_rejects_empty() {
        assert!(sanitize_path("  ").is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_sanitize_path_allows_absolute_unix() {
        let p = sanitize_path("/tmp/plot.png").expect("absolute path should be allowed");
        assert_eq!(p, PathBuf::from("/tmp/plot.png"));
    }

    #[test]
    fn test_cli_args_rejects_parent_dir_in_output() {
        let err = CliArgs::try_parse_from(["unroll", "--output", "../plot.png"]).unwrap_err();
        assert!(err.to_string().contains("Parent directory components"));
    }

    #[test]
    fn test_cli_args_rejects_positional_arguments() {
        assert!(CliArgs::try_parse_from(["unroll", "extra"]).is_err());
    }
}
