use base64::{Engine as _, engine::general_purpose};

use crate::storage::checksum::Checksum;

pub struct ChecksumMd5 {
    context: md5::Context,
}

impl Default for ChecksumMd5 {
    fn default() -> Self {
        ChecksumMd5 {
            context: md5::Context::new(),
        }
    }
}

impl Checksum for ChecksumMd5 {
    fn update(&mut self, data: &[u8]) {
        self.context.consume(data);
    }

    /// base64 encoded, as the `Content-MD5` header expects.
    fn finalize(&mut self) -> String {
        let digest = self.context.clone().compute();
        general_purpose::STANDARD.encode(digest.0)
    }
}
