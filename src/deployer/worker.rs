use std::sync::Arc;

use async_channel::Sender;
use tracing::{error, info, trace};

use crate::config::UploadConfig;
use crate::storage::StorageFactory;
use crate::storage::region::RegionResolver;
use crate::types::error::S3deployError;
use crate::types::{DeployStatistics, Destination, SourceArtifact, UploadOutcome};

/// One destination's unit of work: resolve the bucket region, then upload.
///
/// Never fails as a whole; every error becomes the destination's outcome.
pub struct DeployWorker {
    pub destination: Destination,
    pub artifact: Arc<SourceArtifact>,
    pub resolver: Arc<RegionResolver>,
    pub storage_factory: Arc<dyn StorageFactory>,
    pub upload_config: Arc<UploadConfig>,
    pub dry_run: bool,
    pub stats_sender: Sender<DeployStatistics>,
}

impl DeployWorker {
    pub async fn deploy(self) -> UploadOutcome {
        trace!(
            bucket = self.destination.bucket,
            key = self.destination.key,
            "deploy worker has started."
        );

        let result = self.resolve_and_upload().await;
        match &result {
            Ok(()) => {
                info!(
                    bucket = self.destination.bucket,
                    key = self.destination.key,
                    dry_run = self.dry_run,
                    "upload completed."
                );

                self.send_stats(DeployStatistics::UploadComplete {
                    bucket: self.destination.bucket.clone(),
                    key: self.destination.key.clone(),
                    dry_run: self.dry_run,
                })
                .await;
                if !self.dry_run {
                    self.send_stats(DeployStatistics::UploadBytes(self.artifact.content_length))
                        .await;
                }
            }
            Err(e) => {
                error!(
                    bucket = self.destination.bucket,
                    key = self.destination.key,
                    cause = e.cause(),
                    "upload failed."
                );

                self.send_stats(DeployStatistics::UploadError {
                    bucket: self.destination.bucket.clone(),
                    key: self.destination.key.clone(),
                    cause: e.cause(),
                })
                .await;
            }
        }

        UploadOutcome {
            destination: self.destination,
            result,
        }
    }

    async fn resolve_and_upload(&self) -> Result<(), S3deployError> {
        let binding = self.resolver.resolve(&self.destination.bucket).await?;

        if self.dry_run {
            info!(
                bucket = self.destination.bucket,
                key = self.destination.key,
                region = binding.region,
                "[dry-run] upload skipped."
            );
            return Ok(());
        }

        let storage = self.storage_factory.create(&binding);
        storage
            .put_object(&self.destination, &self.artifact, &self.upload_config)
            .await
            .map_err(|e| S3deployError::Upload {
                bucket: self.destination.bucket.clone(),
                key: self.destination.key.clone(),
                cause: format!("{e:#}"),
            })
    }

    async fn send_stats(&self, stats: DeployStatistics) {
        let _ = self.stats_sender.send(stats).await;
    }
}
