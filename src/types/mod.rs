use std::fmt;
use std::fmt::{Debug, Formatter};
use std::path::PathBuf;

use zeroize_derive::{Zeroize, ZeroizeOnDrop};

use crate::types::error::S3deployError;

pub mod error;

pub const S3_SCHEME: &str = "s3://";
pub const CONTENT_SHA256_METADATA_KEY: &str = "x-amz-content-sha256";
pub const DEPLOY_REPORT_SUMMARY_NAME: &str = "DEPLOY_SUMMARY";

/// A single place the artifact is written to.
///
/// Two destinations are the same logical destination when both bucket and key are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Destination {
    pub bucket: String,
    pub key: String,
}

impl Destination {
    pub fn new(bucket: &str, key: &str) -> Self {
        Destination {
            bucket: bucket.to_string(),
            key: key.to_string(),
        }
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}/{}", S3_SCHEME, self.bucket, self.key)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactDigests {
    /// base64 encoded MD5, sent as `Content-MD5` and verified by S3.
    pub content_md5: String,
    /// hex encoded SHA-256, stored as user-defined metadata only.
    pub content_sha256: String,
}

/// The local file being deployed. Built once per invocation and never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceArtifact {
    pub path: PathBuf,
    pub file_name: String,
    pub content_length: u64,
    pub digests: ArtifactDigests,
    pub content_type: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SigningMode {
    Default,
    SigV4,
}

impl SigningMode {
    pub fn for_region(region: Option<&str>, default_region: &str) -> Self {
        match region {
            Some(region) if region != default_region => SigningMode::SigV4,
            _ => SigningMode::Default,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionBinding {
    pub bucket: String,
    /// `None` means the default region is correct for this bucket.
    pub region: Option<String>,
    pub signing_mode: SigningMode,
}

#[derive(Debug)]
pub struct UploadOutcome {
    pub destination: Destination,
    pub result: Result<(), S3deployError>,
}

impl UploadOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DeploymentReport {
    pub successes: u64,
    pub failures: u64,
}

impl DeploymentReport {
    pub fn from_outcomes(outcomes: &[UploadOutcome]) -> Self {
        outcomes
            .iter()
            .fold(DeploymentReport::default(), |mut report, outcome| {
                if outcome.is_success() {
                    report.successes += 1;
                } else {
                    report.failures += 1;
                }
                report
            })
    }

    pub fn has_failure(&self) -> bool {
        0 < self.failures
    }
}

impl fmt::Display for DeploymentReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} succeeded, {} failed",
            self.successes, self.failures
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeployStatistics {
    UploadComplete {
        bucket: String,
        key: String,
        dry_run: bool,
    },
    UploadError {
        bucket: String,
        key: String,
        cause: String,
    },
    UploadBytes(u64),
}

#[derive(Debug, Clone)]
pub struct ClientConfigLocation {
    pub aws_config_file: Option<PathBuf>,
    pub aws_shared_credentials_file: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub enum S3Credentials {
    Profile(String),
    Credentials { access_keys: AccessKeys },
    FromEnvironment,
}

#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct AccessKeys {
    pub access_key: String,
    pub secret_access_key: String,
    pub session_token: Option<String>,
}

impl Debug for AccessKeys {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut keys = f.debug_struct("AccessKeys");
        let session_token = self
            .session_token
            .as_ref()
            .map_or("None", |_| "** redacted **");
        keys.field("access_key", &self.access_key)
            .field("secret_access_key", &"** redacted **")
            .field("session_token", &session_token);
        keys.finish()
    }
}
