use std::path::Path;

use tokio::fs::File;
use tokio::io::AsyncReadExt;
use tracing::debug;

use crate::storage::checksum::md5::ChecksumMd5;
use crate::storage::checksum::sha256::ChecksumSha256;
use crate::types::ArtifactDigests;

pub mod md5;
pub mod sha256;

const ZERO_BLOCK_SIZE: &str = "integrity block size must be greater than zero";

pub trait Checksum {
    fn update(&mut self, data: &[u8]);
    fn finalize(&mut self) -> String;
}

/// Reads the file once, feeding every block to both digests.
pub async fn compute_digests(path: &Path, block_size: usize) -> std::io::Result<ArtifactDigests> {
    // a zero sized read buffer would look like an empty file.
    if block_size == 0 {
        return Err(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            ZERO_BLOCK_SIZE,
        ));
    }

    let mut file = File::open(path).await?;

    let mut md5 = ChecksumMd5::default();
    let mut sha256 = ChecksumSha256::default();

    let mut buffer = vec![0_u8; block_size];
    let mut total_bytes: u64 = 0;
    loop {
        let read_bytes = file.read(buffer.as_mut_slice()).await?;
        if read_bytes == 0 {
            break;
        }

        md5.update(&buffer[..read_bytes]);
        sha256.update(&buffer[..read_bytes]);
        total_bytes += read_bytes as u64;
    }

    let digests = ArtifactDigests {
        content_md5: md5.finalize(),
        content_sha256: sha256.finalize(),
    };

    debug!(
        path = path.to_string_lossy().to_string(),
        total_bytes = total_bytes,
        content_md5 = digests.content_md5,
        content_sha256 = digests.content_sha256,
        "artifact digests computed."
    );

    Ok(digests)
}
