//! Image storage port - where accepted uploads are written.

use async_trait::async_trait;

/// Byte storage for uploaded images, addressed by bare filename.
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Write `bytes` under `name`, replacing any existing file.
    /// The file must be complete once this returns `Ok`.
    async fn put(&self, name: &str, bytes: &[u8]) -> Result<(), ImageStoreError>;

    /// Remove `name`. Removing a missing file is not an error.
    async fn remove(&self, name: &str) -> Result<(), ImageStoreError>;
}

/// Image storage errors.
#[derive(Debug, thiserror::Error)]
pub enum ImageStoreError {
    #[error("Invalid image name: {0}")]
    InvalidName(String),

    #[error("I/O failed for {name}: {message}")]
    Io { name: String, message: String },
}
