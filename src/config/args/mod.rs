use crate::Config;
use crate::config::args::value_parser::{canned_acl, destination, human_bytes, metadata, url};
use crate::config::{
    CLITimeoutConfig, ClientConfig, RetryConfig, TracingConfig, TransferConfig, UploadConfig,
};
use crate::types::{AccessKeys, ClientConfigLocation, S3Credentials};
use aws_sdk_s3::types::ObjectCannedAcl;
use clap::Parser;
use clap::builder::{ArgPredicate, NonEmptyStringValueParser};
use clap_verbosity_flag::{Verbosity, WarnLevel};
#[cfg(feature = "version")]
use shadow_rs::shadow;
use std::ffi::OsString;
use std::path::PathBuf;
use std::str::FromStr;

pub mod value_parser;

const DEFAULT_ACL: &str = "public-read";
const DEFAULT_AWS_MAX_ATTEMPTS: u32 = 3;
const DEFAULT_INITIAL_BACKOFF_MILLISECONDS: u64 = 100;
const DEFAULT_JSON_TRACING: bool = false;
const DEFAULT_AWS_SDK_TRACING: bool = false;
const DEFAULT_SPAN_EVENTS_TRACING: bool = false;
const DEFAULT_DISABLE_COLOR_TRACING: bool = false;
const DEFAULT_INTEGRITY_BLOCK_SIZE: &str = "64KiB";
const DEFAULT_FORCE_PATH_STYLE: bool = false;
const DEFAULT_NO_GUESS_MIME_TYPE: bool = false;
const DEFAULT_DRY_RUN: bool = false;
const DEFAULT_DISABLE_STALLED_STREAM_PROTECTION: bool = false;

const NO_DESTINATION_SPECIFIED: &str = "at least one destination must be specified\n";

#[cfg(feature = "version")]
shadow!(build);

#[derive(Parser, Clone, Debug)]
#[cfg_attr(feature = "version", command(version=format!("{} ({} {}), {}", build::PKG_VERSION, build::SHORT_COMMIT, build::BUILD_TARGET, build::RUST_VERSION)))]
pub struct CLIArgs {
    #[arg(env, help = "local file to deploy", default_value_if("auto_complete_shell", ArgPredicate::IsPresent, "ignored"), required = false)]
    source: PathBuf,

    #[arg(help = "s3://<BUCKET_NAME>[/key or prefix/] (a trailing '/' appends the source file name)", value_parser = destination::check_destination, num_args = 1.., required_unless_present = "auto_complete_shell")]
    destinations: Vec<String>,

    /// A simulation mode. bucket regions are resolved, but no object is uploaded
    #[arg(long, env, default_value_t = DEFAULT_DRY_RUN, help_heading = "General")]
    dry_run: bool,

    /// ACL for the uploaded objects
    /// valid choices: private | public-read | public-read-write | authenticated-read | aws-exec-read | bucket-owner-read | bucket-owner-full-control
    #[arg(short, long, env, default_value = DEFAULT_ACL, value_parser = canned_acl::parse_canned_acl, help_heading = "General")]
    acl: String,

    /// location of the file that the AWS CLI uses to store configuration profiles
    #[arg(long, env, value_name = "FILE", help_heading = "AWS Configuration")]
    aws_config_file: Option<PathBuf>,

    /// location of the file that the AWS CLI uses to store access keys
    #[arg(long, env, value_name = "FILE", help_heading = "AWS Configuration")]
    aws_shared_credentials_file: Option<PathBuf>,

    /// AWS CLI profile
    #[arg(long, env, conflicts_with_all = ["access_key", "secret_access_key", "session_token"], help_heading = "AWS Configuration")]
    profile: Option<String>,

    /// access key
    #[arg(long, env, conflicts_with_all = ["profile"], requires = "secret_access_key", help_heading = "AWS Configuration")]
    access_key: Option<String>,

    /// secret access key
    #[arg(long, env, conflicts_with_all = ["profile"], requires = "access_key", help_heading = "AWS Configuration")]
    secret_access_key: Option<String>,

    /// session token
    #[arg(long, env, conflicts_with_all = ["profile"], requires = "access_key", help_heading = "AWS Configuration")]
    session_token: Option<String>,

    /// region used for bucket location lookups [default: us-east-1]. With --endpoint-url, also the region of buckets without a location constraint
    #[arg(long, env, value_parser = NonEmptyStringValueParser::new(), help_heading = "Storage Options")]
    region: Option<String>,

    /// endpoint url (S3-compatible storage)
    #[arg(long, env, value_parser = url::check_scheme, help_heading = "Storage Options")]
    endpoint_url: Option<String>,

    /// force path-style addressing
    #[arg(long, env, default_value_t = DEFAULT_FORCE_PATH_STYLE, help_heading = "Storage Options")]
    force_path_style: bool,

    /// Content-Type HTTP header to set on the uploaded objects. By default, it is guessed from the file name
    #[arg(long, env, help_heading = "Metadata/Headers")]
    content_type: Option<String>,

    /// Cache-Control HTTP header to set on the uploaded objects
    #[arg(long, env, help_heading = "Metadata/Headers")]
    cache_control: Option<String>,

    /// metadata to set on the uploaded objects. e.g. --metadata "key1=value1,key2=value2".
    #[arg(long, env, value_parser = metadata::check_metadata, help_heading = "Metadata/Headers")]
    metadata: Option<String>,

    /// do not try to guess the mime type of the source file
    #[arg(long, env, conflicts_with_all = ["content_type"], default_value_t = DEFAULT_NO_GUESS_MIME_TYPE, help_heading = "Metadata/Headers")]
    no_guess_mime_type: bool,

    /// block size used to read the source file while computing digests, Allow suffixes: KiB, MiB.
    #[arg(long, env, default_value = DEFAULT_INTEGRITY_BLOCK_SIZE, value_parser = human_bytes::check_block_size, help_heading = "Performance")]
    integrity_block_size: String,

    /// trace verbosity(-v: show info, -vv: show debug, -vvv show trace)
    #[clap(flatten)]
    verbosity: Verbosity<WarnLevel>,

    /// show trace as json format
    #[arg(long, env, default_value_t = DEFAULT_JSON_TRACING, help_heading = "Tracing/Logging")]
    json_tracing: bool,

    /// enable aws sdk tracing
    #[arg(long, env, default_value_t = DEFAULT_AWS_SDK_TRACING, help_heading = "Tracing/Logging")]
    aws_sdk_tracing: bool,

    /// show span event tracing
    #[arg(long, env, default_value_t = DEFAULT_SPAN_EVENTS_TRACING, help_heading = "Tracing/Logging")]
    span_events_tracing: bool,

    /// disable ANSI terminal colors
    #[arg(long, env, default_value_t = DEFAULT_DISABLE_COLOR_TRACING, help_heading = "Tracing/Logging")]
    disable_color_tracing: bool,

    /// maximum attempts of the AWS SDK retry handler for a single request. s3deploy itself never retries a destination
    #[arg(long, env, default_value_t = DEFAULT_AWS_MAX_ATTEMPTS, value_name = "max_attempts", help_heading = "Retry Options")]
    aws_max_attempts: u32,

    /// a multiplier value used when calculating backoff times as part of an exponential backoff with jitter strategy.
    #[arg(long, env, default_value_t = DEFAULT_INITIAL_BACKOFF_MILLISECONDS, value_name = "initial_backoff", help_heading = "Retry Options")]
    initial_backoff_milliseconds: u64,

    /// operation timeout (milliseconds). For details, see the AWS SDK for Rust TimeoutConfig documentation.
    /// The default has no timeout.
    #[arg(
        long,
        env,
        value_name = "operation_timeout",
        help_heading = "Timeout Options"
    )]
    operation_timeout_milliseconds: Option<u64>,

    /// operation attempt timeout (milliseconds). For details, see the AWS SDK for Rust TimeoutConfig documentation.
    /// The default has no timeout.
    #[arg(
        long,
        env,
        value_name = "operation_attempt_timeout",
        help_heading = "Timeout Options"
    )]
    operation_attempt_timeout_milliseconds: Option<u64>,

    /// connect timeout (milliseconds).
    /// The default has AWS SDK default timeout (Currently 3100 milliseconds).
    #[arg(
        long,
        env,
        value_name = "connect_timeout",
        help_heading = "Timeout Options"
    )]
    connect_timeout_milliseconds: Option<u64>,

    /// read timeout (milliseconds).
    /// The default has no timeout.
    #[arg(
        long,
        env,
        value_name = "read_timeout",
        help_heading = "Timeout Options"
    )]
    read_timeout_milliseconds: Option<u64>,

    /// generate a auto completions script. Valid values: bash, fish, zsh, powershell, elvish.
    #[arg(long, env, value_name = "SHELL", value_parser = clap_complete::shells::Shell::from_str, help_heading = "Advanced")]
    auto_complete_shell: Option<clap_complete::shells::Shell>,

    /// disable stalled stream protection
    #[arg(long, env, default_value_t = DEFAULT_DISABLE_STALLED_STREAM_PROTECTION, help_heading = "Advanced")]
    disable_stalled_stream_protection: bool,
}

pub fn parse_from_args<I, T>(args: I) -> Result<CLIArgs, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    CLIArgs::try_parse_from(args)
}

pub fn build_config_from_args<I, T>(args: I) -> Result<Config, String>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let config_args = CLIArgs::try_parse_from(args).map_err(|e| e.to_string())?;
    crate::Config::try_from(config_args)
}

impl CLIArgs {
    fn build_credential(&self) -> S3Credentials {
        if let Some(profile) = self.profile.clone() {
            return S3Credentials::Profile(profile);
        }

        match (&self.access_key, &self.secret_access_key) {
            (Some(access_key), Some(secret_access_key)) => S3Credentials::Credentials {
                access_keys: AccessKeys {
                    access_key: access_key.to_string(),
                    secret_access_key: secret_access_key.to_string(),
                    session_token: self.session_token.clone(),
                },
            },
            _ => S3Credentials::FromEnvironment,
        }
    }

    fn build_client_config(&self) -> ClientConfig {
        ClientConfig {
            client_config_location: ClientConfigLocation {
                aws_config_file: self.aws_config_file.clone(),
                aws_shared_credentials_file: self.aws_shared_credentials_file.clone(),
            },
            credential: self.build_credential(),
            region: self.region.clone(),
            endpoint_url: self.endpoint_url.clone(),
            force_path_style: self.force_path_style,
            retry_config: RetryConfig {
                aws_max_attempts: self.aws_max_attempts,
                initial_backoff_milliseconds: self.initial_backoff_milliseconds,
            },
            cli_timeout_config: CLITimeoutConfig {
                operation_timeout_milliseconds: self.operation_timeout_milliseconds,
                operation_attempt_timeout_milliseconds: self.operation_attempt_timeout_milliseconds,
                connect_timeout_milliseconds: self.connect_timeout_milliseconds,
                read_timeout_milliseconds: self.read_timeout_milliseconds,
            },
            disable_stalled_stream_protection: self.disable_stalled_stream_protection,
        }
    }

    fn build_tracing_config(&self) -> Option<TracingConfig> {
        let mut tracing_config = self.verbosity.log_level().map(|log_level| TracingConfig {
            tracing_level: log_level,
            json_tracing: self.json_tracing,
            aws_sdk_tracing: self.aws_sdk_tracing,
            span_events_tracing: self.span_events_tracing,
            disable_color_tracing: self.disable_color_tracing,
        });

        // dry-run output is reported through info level tracing.
        if self.dry_run {
            tracing_config = match tracing_config {
                None => Some(TracingConfig {
                    tracing_level: log::Level::Info,
                    json_tracing: DEFAULT_JSON_TRACING,
                    aws_sdk_tracing: DEFAULT_AWS_SDK_TRACING,
                    span_events_tracing: DEFAULT_SPAN_EVENTS_TRACING,
                    disable_color_tracing: DEFAULT_DISABLE_COLOR_TRACING,
                }),
                Some(config) if config.tracing_level < log::Level::Info => Some(TracingConfig {
                    tracing_level: log::Level::Info,
                    ..config
                }),
                config => config,
            };
        }

        tracing_config
    }
}

impl TryFrom<CLIArgs> for Config {
    type Error = String;

    fn try_from(value: CLIArgs) -> Result<Self, Self::Error> {
        if value.destinations.is_empty() && value.auto_complete_shell.is_none() {
            return Err(NO_DESTINATION_SPECIFIED.to_string());
        }

        let destinations = destination::parse_destinations(&value.source, &value.destinations)
            .map_err(|e| e.to_string())?;

        let canned_acl = ObjectCannedAcl::from_str(&value.acl).map_err(|e| e.to_string())?;

        let metadata = value
            .metadata
            .as_deref()
            .map(metadata::parse_metadata)
            .transpose()?;

        Ok(Config {
            client_config: value.build_client_config(),
            tracing_config: value.build_tracing_config(),
            transfer_config: TransferConfig {
                integrity_block_size: human_bytes::parse_block_size(&value.integrity_block_size)?,
                guess_mime_type: !value.no_guess_mime_type,
            },
            upload_config: UploadConfig {
                canned_acl,
                content_type: value.content_type,
                cache_control: value.cache_control,
                metadata,
            },
            source: value.source,
            destinations,
            dry_run: value.dry_run,
            auto_complete_shell: value.auto_complete_shell,
        })
    }
}
