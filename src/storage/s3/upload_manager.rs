use std::collections::HashMap;

use anyhow::{Context, Result, anyhow};
use aws_sdk_s3::Client;
use aws_sdk_s3::operation::put_object::PutObjectOutput;
use aws_sdk_s3::primitives::ByteStream;
use tracing::trace;

use crate::config::UploadConfig;
use crate::storage::s3::sdk_error_cause;
use crate::types::{CONTENT_SHA256_METADATA_KEY, Destination, SourceArtifact};

/// Writes the artifact to one destination with a single PutObject request.
pub struct UploadManager<'a> {
    client: &'a Client,
    upload_config: &'a UploadConfig,
}

impl<'a> UploadManager<'a> {
    pub fn new(client: &'a Client, upload_config: &'a UploadConfig) -> Self {
        UploadManager {
            client,
            upload_config,
        }
    }

    pub async fn upload(
        &self,
        destination: &Destination,
        artifact: &SourceArtifact,
    ) -> Result<PutObjectOutput> {
        // every upload gets its own read cursor over the source file.
        let body = ByteStream::from_path(&artifact.path)
            .await
            .with_context(|| format!("failed to open {}", artifact.path.display()))?;

        let content_length = content_length_header(artifact.content_length)?;

        let put_object_output = self
            .client
            .put_object()
            .bucket(&destination.bucket)
            .key(&destination.key)
            .content_length(content_length)
            .body(body)
            .content_md5(&artifact.digests.content_md5)
            .set_metadata(Some(build_metadata(
                self.upload_config.metadata.as_ref(),
                &artifact.digests.content_sha256,
            )))
            .acl(self.upload_config.canned_acl.clone())
            .set_content_type(resolve_content_type(self.upload_config, artifact))
            .set_cache_control(self.upload_config.cache_control.clone())
            .send()
            .await
            .map_err(|e| anyhow!(sdk_error_cause(&e)))?;

        trace!(
            bucket = destination.bucket,
            key = destination.key,
            "{put_object_output:?}"
        );

        Ok(put_object_output)
    }
}

pub fn content_length_header(content_length: u64) -> Result<i64> {
    i64::try_from(content_length)
        .with_context(|| format!("content length {content_length} is too large"))
}

/// User metadata merged with the content digest. The digest always wins.
pub fn build_metadata(
    user_metadata: Option<&HashMap<String, String>>,
    content_sha256: &str,
) -> HashMap<String, String> {
    let mut metadata = user_metadata.cloned().unwrap_or_default();
    metadata.insert(
        CONTENT_SHA256_METADATA_KEY.to_string(),
        content_sha256.to_string(),
    );
    metadata
}

/// An explicit `--content-type` takes precedence over the guessed one.
pub fn resolve_content_type(
    upload_config: &UploadConfig,
    artifact: &SourceArtifact,
) -> Option<String> {
    upload_config
        .content_type
        .clone()
        .or_else(|| artifact.content_type.clone())
}
