#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{Result, anyhow};
use async_channel::Receiver;
use async_trait::async_trait;
use tokio::sync::Barrier;

use s3deploy::Config;
use s3deploy::config::UploadConfig;
use s3deploy::config::args::parse_from_args;
use s3deploy::storage::{Storage, StorageFactory, StorageTrait};
use s3deploy::types::{DeployStatistics, Destination, RegionBinding, SigningMode, SourceArtifact};

pub const DEFAULT_REGION: &str = "us-east-1";
pub const TEST_CONTENT: &[u8] = b"hello world";
pub const TEST_CONTENT_MD5: &str = "XrY7u+Ae7tCTyyK7j1rNww==";
pub const TEST_CONTENT_SHA256: &str =
    "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9";

pub const NO_SUCH_BUCKET: &str = "NoSuchBucket: The specified bucket does not exist";
pub const ACCESS_DENIED: &str = "AccessDenied: Access Denied";

#[derive(Debug, Clone, PartialEq)]
pub enum MockCall {
    GetBucketLocation {
        bucket: String,
        client_region: Option<String>,
    },
    PutObject {
        bucket: String,
        key: String,
        client_region: Option<String>,
        signing_mode: SigningMode,
        content_md5: String,
        content_sha256: String,
        content_type: Option<String>,
        body_length: usize,
    },
}

/// An in-memory S3. Buckets without a registered location do not exist.
#[derive(Default)]
pub struct MockStorageFactory {
    locations: HashMap<String, Option<String>>,
    failing_buckets: HashSet<String>,
    panicking_buckets: HashSet<String>,
    put_barrier: Option<Arc<Barrier>>,
    calls: Arc<Mutex<Vec<MockCall>>>,
}

impl MockStorageFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bucket(mut self, bucket: &str, location_constraint: Option<&str>) -> Self {
        self.locations.insert(
            bucket.to_string(),
            location_constraint.map(|location| location.to_string()),
        );
        self
    }

    /// PutObject to this bucket is rejected.
    pub fn with_failing_bucket(mut self, bucket: &str, location_constraint: Option<&str>) -> Self {
        self.failing_buckets.insert(bucket.to_string());
        self.with_bucket(bucket, location_constraint)
    }

    /// PutObject to this bucket panics inside the worker task.
    pub fn with_panicking_bucket(mut self, bucket: &str) -> Self {
        self.panicking_buckets.insert(bucket.to_string());
        self.with_bucket(bucket, None)
    }

    /// Every PutObject waits until `count` uploads are in flight at the same time.
    pub fn with_put_barrier(mut self, count: usize) -> Self {
        self.put_barrier = Some(Arc::new(Barrier::new(count)));
        self
    }

    pub fn calls(&self) -> Vec<MockCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn put_calls(&self) -> Vec<MockCall> {
        self.calls()
            .into_iter()
            .filter(|call| matches!(call, MockCall::PutObject { .. }))
            .collect()
    }

    pub fn put_call(&self, bucket: &str, key: &str) -> Option<MockCall> {
        self.put_calls().into_iter().find(|call| {
            matches!(call, MockCall::PutObject { bucket: b, key: k, .. } if b == bucket && k == key)
        })
    }

    pub fn location_call_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| matches!(call, MockCall::GetBucketLocation { .. }))
            .count()
    }

    fn create_storage(&self, client_region: Option<String>, signing_mode: SigningMode) -> Storage {
        Box::new(MockStorage {
            client_region,
            signing_mode,
            locations: self.locations.clone(),
            failing_buckets: self.failing_buckets.clone(),
            panicking_buckets: self.panicking_buckets.clone(),
            put_barrier: self.put_barrier.clone(),
            calls: self.calls.clone(),
        })
    }
}

impl StorageFactory for MockStorageFactory {
    fn create_default(&self) -> Storage {
        self.create_storage(None, SigningMode::Default)
    }

    fn create(&self, binding: &RegionBinding) -> Storage {
        self.create_storage(binding.region.clone(), binding.signing_mode)
    }
}

struct MockStorage {
    client_region: Option<String>,
    signing_mode: SigningMode,
    locations: HashMap<String, Option<String>>,
    failing_buckets: HashSet<String>,
    panicking_buckets: HashSet<String>,
    put_barrier: Option<Arc<Barrier>>,
    calls: Arc<Mutex<Vec<MockCall>>>,
}

#[async_trait]
impl StorageTrait for MockStorage {
    async fn get_bucket_location(&self, bucket: &str) -> Result<Option<String>> {
        self.calls
            .lock()
            .unwrap()
            .push(MockCall::GetBucketLocation {
                bucket: bucket.to_string(),
                client_region: self.client_region.clone(),
            });

        self.locations
            .get(bucket)
            .cloned()
            .ok_or_else(|| anyhow!(NO_SUCH_BUCKET))
    }

    async fn put_object(
        &self,
        destination: &Destination,
        artifact: &SourceArtifact,
        upload_config: &UploadConfig,
    ) -> Result<()> {
        if let Some(barrier) = &self.put_barrier {
            tokio::time::timeout(Duration::from_secs(10), barrier.wait())
                .await
                .map_err(|_| anyhow!("uploads were not in flight concurrently"))?;
        }

        if self.panicking_buckets.contains(&destination.bucket) {
            panic!("simulated worker panic");
        }

        let body = tokio::fs::read(&artifact.path).await?;

        self.calls.lock().unwrap().push(MockCall::PutObject {
            bucket: destination.bucket.clone(),
            key: destination.key.clone(),
            client_region: self.client_region.clone(),
            signing_mode: self.signing_mode,
            content_md5: artifact.digests.content_md5.clone(),
            content_sha256: artifact.digests.content_sha256.clone(),
            content_type: upload_config
                .content_type
                .clone()
                .or_else(|| artifact.content_type.clone()),
            body_length: body.len(),
        });

        if self.failing_buckets.contains(&destination.bucket) {
            return Err(anyhow!(ACCESS_DENIED));
        }

        Ok(())
    }
}

pub struct TestSource {
    _dir: tempfile::TempDir,
    path: PathBuf,
}

impl TestSource {
    pub fn new(file_name: &str) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(file_name);
        std::fs::write(&path, TEST_CONTENT).unwrap();

        Self { _dir: dir, path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn path_str(&self) -> String {
        self.path.to_string_lossy().to_string()
    }
}

pub fn build_config(source: &str, destinations: &[&str], options: &[&str]) -> Config {
    let mut args = vec!["s3deploy"];
    args.extend_from_slice(options);
    args.push(source);
    args.extend_from_slice(destinations);

    Config::try_from(parse_from_args(args).unwrap()).unwrap()
}

pub fn collect_stats(stats_receiver: &Receiver<DeployStatistics>) -> Vec<DeployStatistics> {
    let mut stats = Vec::new();
    while let Ok(deploy_stats) = stats_receiver.try_recv() {
        stats.push(deploy_stats);
    }
    stats
}

#[cfg(feature = "e2e_test")]
pub use e2e::*;

#[cfg(feature = "e2e_test")]
mod e2e {
    use std::time::{Duration, SystemTime, UNIX_EPOCH};

    use aws_config::BehaviorVersion;
    use aws_sdk_s3::Client;
    use aws_sdk_s3::operation::head_object::HeadObjectOutput;
    use aws_sdk_s3::types::{BucketLocationConstraint, CreateBucketConfiguration};
    use aws_types::region::Region;

    pub const PROFILE_NAME: &str = "s3deploy-e2e-test";
    pub const SLEEP_SECS_AFTER_DELETE_BUCKET: u64 = 10;

    /// A bucket name that does not collide with other test runs.
    pub fn unique_bucket_name(prefix: &str) -> String {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        format!("s3deploy-e2e-{prefix}-{nanos}")
    }

    pub struct TestHelper {
        client: Client,
    }

    impl TestHelper {
        pub async fn new(region: &str) -> Self {
            let sdk_config = aws_config::defaults(BehaviorVersion::latest())
                .credentials_provider(
                    aws_config::profile::ProfileFileCredentialsProvider::builder()
                        .profile_name(PROFILE_NAME)
                        .build(),
                )
                .region(Region::new(region.to_string()))
                .load()
                .await;

            Self {
                client: Client::new(&sdk_config),
            }
        }

        pub async fn create_bucket(&self, bucket: &str, region: &str) {
            let mut request = self.client.create_bucket().bucket(bucket);
            if region != "us-east-1" {
                request = request.create_bucket_configuration(
                    CreateBucketConfiguration::builder()
                        .location_constraint(BucketLocationConstraint::from(region))
                        .build(),
                );
            }

            request.send().await.unwrap();
        }

        pub async fn head_object(&self, bucket: &str, key: &str) -> HeadObjectOutput {
            self.client
                .head_object()
                .bucket(bucket)
                .key(key)
                .send()
                .await
                .unwrap()
        }

        pub async fn delete_bucket_with_cascade(&self, bucket: &str) {
            let Ok(list_objects_output) =
                self.client.list_objects_v2().bucket(bucket).send().await
            else {
                return;
            };

            for object in list_objects_output.contents() {
                self.client
                    .delete_object()
                    .bucket(bucket)
                    .key(object.key().unwrap())
                    .send()
                    .await
                    .unwrap();
            }

            self.client.delete_bucket().bucket(bucket).send().await.unwrap();

            tokio::time::sleep(Duration::from_secs(SLEEP_SECS_AFTER_DELETE_BUCKET)).await;
        }
    }
}

pub fn init_dummy_tracing_subscriber() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("dummy=trace")
        .try_init();
}
