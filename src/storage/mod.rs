use anyhow::Result;
use async_trait::async_trait;

use crate::config::UploadConfig;
use crate::types::{Destination, RegionBinding, SourceArtifact};

pub mod checksum;
pub mod local;
pub mod region;
pub mod s3;

pub type Storage = Box<dyn StorageTrait + Send + Sync>;

/// Creates storages bound to a region.
///
/// Every destination gets its own storage, so no client state is shared across regions.
pub trait StorageFactory: Send + Sync {
    /// A storage in the lookup region (`--region`, else `us-east-1`), used for bucket location lookups.
    fn create_default(&self) -> Storage;
    fn create(&self, binding: &RegionBinding) -> Storage;
}

#[async_trait]
pub trait StorageTrait {
    /// Returns the raw location constraint of the bucket. `None` when the bucket has none.
    async fn get_bucket_location(&self, bucket: &str) -> Result<Option<String>>;

    async fn put_object(
        &self,
        destination: &Destination,
        artifact: &SourceArtifact,
        upload_config: &UploadConfig,
    ) -> Result<()>;
}
