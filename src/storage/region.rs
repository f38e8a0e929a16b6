use std::collections::HashMap;
use std::sync::Mutex;

use tracing::{debug, trace};

use crate::storage::Storage;
use crate::types::error::S3deployError;
use crate::types::{RegionBinding, SigningMode};

/// The legacy location constraint of buckets created in Ireland.
const LEGACY_EU_LOCATION_CONSTRAINT: &str = "EU";
const EU_WEST_1: &str = "eu-west-1";

/// Maps a raw location constraint to a region name.
///
/// `None` means the default region is correct for the bucket.
pub fn resolve_region(location_constraint: Option<&str>) -> Option<String> {
    match location_constraint {
        None | Some("") => None,
        Some(LEGACY_EU_LOCATION_CONSTRAINT) => Some(EU_WEST_1.to_string()),
        Some(region) => Some(region.to_string()),
    }
}

/// Resolves bucket regions through a storage in the default region.
///
/// Bindings are cached per bucket for the lifetime of the resolver. Two destinations
/// racing on the same uncached bucket may both perform the lookup; both get the same answer.
pub struct RegionResolver {
    storage: Storage,
    default_region: String,
    cache: Mutex<HashMap<String, RegionBinding>>,
}

impl RegionResolver {
    pub fn new(storage: Storage, default_region: &str) -> Self {
        RegionResolver {
            storage,
            default_region: default_region.to_string(),
            cache: Mutex::new(HashMap::new()),
        }
    }

    pub async fn resolve(&self, bucket: &str) -> Result<RegionBinding, S3deployError> {
        if let Some(binding) = self.cached(bucket) {
            trace!(bucket = bucket, "region binding found in cache.");
            return Ok(binding);
        }

        let location_constraint = self
            .storage
            .get_bucket_location(bucket)
            .await
            .map_err(|e| S3deployError::Resolution {
                bucket: bucket.to_string(),
                cause: format!("{e:#}"),
            })?;

        let region = resolve_region(location_constraint.as_deref());
        let binding = RegionBinding {
            bucket: bucket.to_string(),
            signing_mode: SigningMode::for_region(region.as_deref(), &self.default_region),
            region,
        };

        debug!(
            bucket = bucket,
            region = binding.region,
            signing_mode = format!("{:?}", binding.signing_mode),
            "bucket region resolved."
        );

        if let Ok(mut cache) = self.cache.lock() {
            cache.insert(bucket.to_string(), binding.clone());
        }

        Ok(binding)
    }

    fn cached(&self, bucket: &str) -> Option<RegionBinding> {
        self.cache
            .lock()
            .ok()
            .and_then(|cache| cache.get(bucket).cloned())
    }
}
