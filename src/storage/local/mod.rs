use std::io;
use std::path::Path;

use tracing::{debug, trace};

use crate::config::args::value_parser::destination::source_file_name;
use crate::storage::checksum::compute_digests;
use crate::types::SourceArtifact;
use crate::types::error::S3deployError;

const NOT_A_REGULAR_FILE: &str = "not a regular file";

/// Validates the source file and computes everything the uploads share.
///
/// Runs before any destination is attempted, so a failure here means nothing was uploaded.
pub async fn prepare_source_artifact(
    path: &Path,
    integrity_block_size: usize,
    guess_mime_type: bool,
) -> Result<SourceArtifact, S3deployError> {
    let file_name = source_file_name(path)?;

    let artifact_read_error = |source: io::Error| S3deployError::ArtifactRead {
        path: path.to_path_buf(),
        source,
    };

    let metadata = tokio::fs::metadata(path)
        .await
        .map_err(artifact_read_error)?;
    if !metadata.is_file() {
        return Err(artifact_read_error(io::Error::new(
            io::ErrorKind::InvalidInput,
            NOT_A_REGULAR_FILE,
        )));
    }
    trace!(
        path = path.to_string_lossy().to_string(),
        content_length = metadata.len(),
        "source artifact found."
    );

    let digests = compute_digests(path, integrity_block_size)
        .await
        .map_err(artifact_read_error)?;

    let content_type = if guess_mime_type {
        Some(
            mime_guess::from_path(path)
                .first_or_octet_stream()
                .to_string(),
        )
    } else {
        None
    };

    let artifact = SourceArtifact {
        path: path.to_path_buf(),
        file_name,
        content_length: metadata.len(),
        digests,
        content_type,
    };

    debug!(
        path = artifact.path.to_string_lossy().to_string(),
        content_length = artifact.content_length,
        content_type = artifact.content_type,
        "source artifact prepared."
    );

    Ok(artifact)
}
