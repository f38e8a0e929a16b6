#[cfg(test)]
mod tests {
    use crate::config::args::*;

    #[test]
    fn with_default_value() {
        init_dummy_tracing_subscriber();

        let args = vec!["s3deploy", "report.csv", "s3://bucket-a"];

        let config = build_config_from_args(args).unwrap();

        assert_eq!(config.transfer_config.integrity_block_size, 64 * 1024);
        assert!(config.transfer_config.guess_mime_type);
    }

    #[test]
    fn with_custom_value() {
        init_dummy_tracing_subscriber();

        let args = vec![
            "s3deploy",
            "--integrity-block-size",
            "8MiB",
            "--no-guess-mime-type",
            "report.csv",
            "s3://bucket-a",
        ];

        let config = build_config_from_args(args).unwrap();

        assert_eq!(
            config.transfer_config.integrity_block_size,
            8 * 1024 * 1024
        );
        assert!(!config.transfer_config.guess_mime_type);
    }

    #[test]
    fn with_error() {
        init_dummy_tracing_subscriber();

        let args = vec![
            "s3deploy",
            "--integrity-block-size",
            "512",
            "report.csv",
            "s3://bucket-a",
        ];
        assert!(build_config_from_args(args).is_err());

        let args = vec![
            "s3deploy",
            "--integrity-block-size",
            "32MiB",
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
