#[cfg(test)]
mod tests {
    use crate::config::args::*;

    #[test]
    fn with_default_value() {
        init_dummy_tracing_subscriber();

        let args = vec!["s3deploy", "report.csv", "s3://bucket-a"];

        let tracing_config = build_config_from_args(args)
            .unwrap()
            .tracing_config
            .unwrap();

        assert_eq!(tracing_config.tracing_level, log::Level::Warn);
        assert!(!tracing_config.json_tracing);
        assert!(!tracing_config.aws_sdk_tracing);
        assert!(!tracing_config.span_events_tracing);
        assert!(!tracing_config.disable_color_tracing);
    }

    #[test]
    fn with_custom_value() {
        init_dummy_tracing_subscriber();

        let args = vec![
            "s3deploy",
            "-vvv",
            "--json-tracing",
            "--aws-sdk-tracing",
            "--span-events-tracing",
            "--disable-color-tracing",
            "report.csv",
            "s3://bucket-a",
        ];

        let tracing_config = build_config_from_args(args)
            .unwrap()
            .tracing_config
            .unwrap();

        assert_eq!(tracing_config.tracing_level, log::Level::Trace);
        assert!(tracing_config.json_tracing);
        assert!(tracing_config.aws_sdk_tracing);
        assert!(tracing_config.span_events_tracing);
        assert!(tracing_config.disable_color_tracing);
    }

    #[test]
    fn verbosity_levels() {
        init_dummy_tracing_subscriber();

        for (flag, level) in [
            ("-q", log::Level::Error),
            ("-v", log::Level::Info),
            ("-vv", log::Level::Debug),
        ] {
            let args = vec!["s3deploy", flag, "report.csv", "s3://bucket-a"];
            let config = build_config_from_args(args).unwrap();

            assert_eq!(config.tracing_config.unwrap().tracing_level, level);
        }
    }

    #[test]
    fn with_silent_option() {
        init_dummy_tracing_subscriber();

        let args = vec!["s3deploy", "-qq", "report.csv", "s3://bucket-a"];

        let config = build_config_from_args(args).unwrap();

        assert!(config.tracing_config.is_none());
    }

    fn init_dummy_tracing_subscriber() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("dummy=trace")
            .try_init();
    }
}
