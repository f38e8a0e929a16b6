#[cfg(test)]
mod tests {
    use crate::config::args::*;

    #[test]
    fn with_default_value() {
        init_dummy_tracing_subscriber();

        let args = vec!["s3deploy", "report.csv", "s3://bucket-a"];

        let config = build_config_from_args(args).unwrap();

        assert_eq!(config.upload_config.canned_acl, ObjectCannedAcl::PublicRead);
    }

    #[test]
    fn with_custom_value() {
        init_dummy_tracing_subscriber();

        let args = vec![
            "s3deploy",
            "--acl",
            "bucket-owner-full-control",
            "report.csv",
            "s3://bucket-a",
        ];

        let config = build_config_from_args(args).unwrap();

        assert_eq!(
            config.upload_config.canned_acl,
            ObjectCannedAcl::BucketOwnerFullControl
        );
    }

    #[test]
    fn with_error() {
        init_dummy_tracing_subscriber();

        let args = vec![
            "s3deploy",
            "--acl",
            "world-readable",
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
