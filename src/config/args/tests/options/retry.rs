#[cfg(test)]
mod tests {
    use crate::config::args::*;

    #[test]
    fn with_default_value() {
        init_dummy_tracing_subscriber();

        let args = vec!["s3deploy", "report.csv", "s3://bucket-a"];

        let config = build_config_from_args(args).unwrap();

        assert_eq!(config.client_config.retry_config.aws_max_attempts, 3);
        assert_eq!(
            config
                .client_config
                .retry_config
                .initial_backoff_milliseconds,
            100
        );
    }

    #[test]
    fn with_custom_value() {
        init_dummy_tracing_subscriber();

        let args = vec![
            "s3deploy",
            "--aws-max-attempts",
            "10",
            "--initial-backoff-milliseconds",
            "500",
            "report.csv",
            "s3://bucket-a",
        ];

        let config = build_config_from_args(args).unwrap();

        assert_eq!(config.client_config.retry_config.aws_max_attempts, 10);
        assert_eq!(
            config
                .client_config
                .retry_config
                .initial_backoff_milliseconds,
            500
        );
    }

    #[test]
    fn with_error() {
        init_dummy_tracing_subscriber();

        let args = vec![
            "s3deploy",
            "--aws-max-attempts",
            "-1",
            "report.csv",
            "s3://bucket-a",
        ];

        assert!(build_config_from_args(args).is_err());
    }

    fn init_dummy_tracing_subscriber() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("dummy=trace")
            .try_init();
    }
}
