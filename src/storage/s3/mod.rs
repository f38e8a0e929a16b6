use std::error::Error;
use std::fmt::Debug;

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use aws_sdk_s3::Client;
use aws_sdk_s3::error::{ProvideErrorMetadata, SdkError};
use aws_smithy_types::error::display::DisplayErrorContext;
use aws_types::SdkConfig;
use tracing::{debug, trace};

use crate::config::{ClientConfig, UploadConfig};
use crate::storage::s3::upload_manager::UploadManager;
use crate::storage::{Storage, StorageFactory, StorageTrait};
use crate::types::{Destination, RegionBinding, SourceArtifact};

pub mod client_builder;
pub mod upload_manager;

/// Creates S3 storages that share one loaded `SdkConfig`.
pub struct S3StorageFactory {
    client_config: ClientConfig,
    sdk_config: SdkConfig,
}

impl S3StorageFactory {
    pub async fn new(client_config: ClientConfig) -> Self {
        let sdk_config = client_config.load_sdk_config().await;
        S3StorageFactory {
            client_config,
            sdk_config,
        }
    }
}

impl StorageFactory for S3StorageFactory {
    fn create_default(&self) -> Storage {
        Box::new(S3Storage {
            client: self
                .client_config
                .create_client(&self.sdk_config, Some(self.client_config.default_region())),
        })
    }

    fn create(&self, binding: &RegionBinding) -> Storage {
        debug!(
            bucket = binding.bucket,
            region = binding.region,
            signing_mode = format!("{:?}", binding.signing_mode),
            "create a client bound to the bucket region."
        );

        Box::new(S3Storage {
            client: self
                .client_config
                .create_client(&self.sdk_config, binding.region.as_deref()),
        })
    }
}

struct S3Storage {
    client: Client,
}

#[async_trait]
impl StorageTrait for S3Storage {
    async fn get_bucket_location(&self, bucket: &str) -> Result<Option<String>> {
        let output = self
            .client
            .get_bucket_location()
            .bucket(bucket)
            .send()
            .await
            .map_err(|e| anyhow!(sdk_error_cause(&e)))?;

        trace!(bucket = bucket, "{output:?}");

        Ok(output
            .location_constraint()
            .map(|location_constraint| location_constraint.as_str().to_string()))
    }

    async fn put_object(
        &self,
        destination: &Destination,
        artifact: &SourceArtifact,
        upload_config: &UploadConfig,
    ) -> Result<()> {
        UploadManager::new(&self.client, upload_config)
            .upload(destination, artifact)
            .await?;

        Ok(())
    }
}

/// Renders an SDK error as `<code>: <message>` when the service supplied them.
pub fn sdk_error_cause<E, R>(error: &SdkError<E, R>) -> String
where
    E: ProvideErrorMetadata + Error + 'static,
    R: Debug,
{
    match (error.code(), error.message()) {
        (Some(code), Some(message)) => format!("{code}: {message}"),
        (Some(code), None) => code.to_string(),
        _ => DisplayErrorContext(error).to_string(),
    }
}
