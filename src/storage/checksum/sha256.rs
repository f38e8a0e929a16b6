use sha2::Digest;

use crate::storage::checksum::Checksum;

pub struct ChecksumSha256 {
    hasher: sha2::Sha256,
}

impl Default for ChecksumSha256 {
    fn default() -> Self {
        ChecksumSha256 {
            hasher: sha2::Sha256::new(),
        }
    }
}

impl Checksum for ChecksumSha256 {
    fn update(&mut self, data: &[u8]) {
        self.hasher.update(data);
    }

    /// lowercase hex, as stored in the object metadata.
    fn finalize(&mut self) -> String {
        let digest = self.hasher.clone().finalize();
        hex::encode(digest.as_slice())
    }
}
