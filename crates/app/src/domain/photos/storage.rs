//! Photo storage seam.

use async_trait::async_trait;
use mockall::automock;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PhotoStorageError {
    #[error("unsupported content type `{0}`")]
    UnsupportedContentType(String),

    #[error("photo is {actual} bytes, limit is {limit}")]
    TooLarge { actual: usize, limit: usize },

    #[error("photo is empty")]
    Empty,

    #[error("invalid storage path")]
    InvalidPath,

    #[error("failed to write photo")]
    Io(#[from] std::io::Error),
}

#[automock]
#[async_trait]
pub trait PhotoStorage: Send + Sync {
    /// Persist `bytes` at the relative `path` and return the public URL.
    async fn store(
        &self,
        bytes: Vec<u8>,
        content_type: &str,
        path: &str,
    ) -> Result<String, PhotoStorageError>;
}
