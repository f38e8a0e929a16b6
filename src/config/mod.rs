use crate::types::{ClientConfigLocation, Destination, S3Credentials};
use aws_sdk_s3::types::ObjectCannedAcl;
use std::collections::HashMap;
use std::path::PathBuf;

pub mod args;

pub const DEFAULT_REGION: &str = "us-east-1";

#[derive(Debug, Clone)]
pub struct Config {
    pub source: PathBuf,
    /// Destinations in first-occurrence order. Duplicates are uploaded once.
    pub destinations: Vec<Destination>,
    pub client_config: ClientConfig,
    pub tracing_config: Option<TracingConfig>,
    pub transfer_config: TransferConfig,
    pub upload_config: UploadConfig,
    pub dry_run: bool,
    pub auto_complete_shell: Option<clap_complete::shells::Shell>,
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub client_config_location: ClientConfigLocation,
    pub credential: S3Credentials,
    pub region: Option<String>,
    pub endpoint_url: Option<String>,
    pub force_path_style: bool,
    pub retry_config: RetryConfig,
    pub cli_timeout_config: CLITimeoutConfig,
    pub disable_stalled_stream_protection: bool,
}

impl ClientConfig {
    /// The region location lookups are sent to.
    pub fn default_region(&self) -> &str {
        self.region.as_deref().unwrap_or(DEFAULT_REGION)
    }

    /// The region of buckets without a location constraint.
    ///
    /// On AWS this is always `us-east-1`. Only an S3-compatible endpoint lets `--region` stand in for it.
    pub fn provider_default_region(&self) -> &str {
        if self.endpoint_url.is_some() {
            self.default_region()
        } else {
            DEFAULT_REGION
        }
    }
}

#[derive(Debug, Clone)]
pub struct RetryConfig {
    pub aws_max_attempts: u32,
    pub initial_backoff_milliseconds: u64,
}

#[derive(Debug, Clone)]
pub struct CLITimeoutConfig {
    pub operation_timeout_milliseconds: Option<u64>,
    pub operation_attempt_timeout_milliseconds: Option<u64>,
    pub connect_timeout_milliseconds: Option<u64>,
    pub read_timeout_milliseconds: Option<u64>,
}

#[derive(Debug, Clone, Copy)]
pub struct TracingConfig {
    pub tracing_level: log::Level,
    pub json_tracing: bool,
    pub aws_sdk_tracing: bool,
    pub span_events_tracing: bool,
    pub disable_color_tracing: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct TransferConfig {
    pub integrity_block_size: usize,
    pub guess_mime_type: bool,
}

/// Settings applied uniformly to every destination of one invocation.
#[derive(Debug, Clone)]
pub struct UploadConfig {
    pub canned_acl: ObjectCannedAcl,
    pub content_type: Option<String>,
    pub cache_control: Option<String>,
    pub metadata: Option<HashMap<String, String>>,
}
