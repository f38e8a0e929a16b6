use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum S3deployError {
    #[error("destination must begin with s3:// : {0}")]
    InvalidDestinationScheme(String),
    #[error("bucket name must be specified: {0}")]
    NoBucketName(String),
    #[error("source must be a file with a name: {}", .0.display())]
    InvalidSource(PathBuf),
    #[error("failed to read the source artifact {}: {source}", path.display())]
    ArtifactRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to resolve the region of bucket {bucket}: {cause}")]
    Resolution { bucket: String, cause: String },
    #[error("failed to upload to s3://{bucket}/{key}: {cause}")]
    Upload {
        bucket: String,
        key: String,
        cause: String,
    },
}

impl S3deployError {
    pub fn is_usage_error(&self) -> bool {
        matches!(
            self,
            S3deployError::InvalidDestinationScheme(_)
                | S3deployError::NoBucketName(_)
                | S3deployError::InvalidSource(_)
        )
    }

    /// The text reported after a failed destination. The destination itself is printed separately.
    pub fn cause(&self) -> String {
        match self {
            S3deployError::Upload { cause, .. } => cause.clone(),
            _ => self.to_string(),
        }
    }
}
