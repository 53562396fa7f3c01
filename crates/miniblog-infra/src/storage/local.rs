//! Filesystem image store - one directory, one file per stored image.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use uuid::Uuid;

use miniblog_core::domain::image::is_plain_filename;
use miniblog_core::ports::{ImageStore, ImageStoreError};

/// Writes images into a single upload directory.
///
/// Each write lands in a hidden temporary file first and is renamed into
/// place, so a stored name never points at a partially written file.
pub struct LocalImageStore {
    root: PathBuf,
}

impl LocalImageStore {
    /// Use `root` as the upload directory, creating it if needed.
    pub async fn open(root: impl Into<PathBuf>) -> Result<Self, ImageStoreError> {
        let root = root.into();
        tokio::fs::create_dir_all(&root)
            .await
            .map_err(|e| io_err(&root.display().to_string(), e))?;
        tracing::info!(dir = %root.display(), "Upload directory ready");
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, name: &str) -> Result<PathBuf, ImageStoreError> {
        if !is_plain_filename(name) {
            return Err(ImageStoreError::InvalidName(name.to_string()));
        }
        Ok(self.root.join(name))
    }
}

fn io_err(name: &str, e: std::io::Error) -> ImageStoreError {
    ImageStoreError::Io {
        name: name.to_string(),
        message: e.to_string(),
    }
}

#[async_trait]
impl ImageStore for LocalImageStore {
    async fn put(&self, name: &str, bytes: &[u8]) -> Result<(), ImageStoreError> {
        let target = self.path_for(name)?;
        // Fixed-length staging name, independent of how long `name` is.
        let staging = self.root.join(format!(".{}.part", Uuid::new_v4()));

        if let Err(e) = tokio::fs::write(&staging, bytes).await {
            let _ = tokio::fs::remove_file(&staging).await;
            return Err(io_err(name, e));
        }
        if let Err(e) = tokio::fs::rename(&staging, &target).await {
            let _ = tokio::fs::remove_file(&staging).await;
            return Err(io_err(name, e));
        }

        Ok(())
    }

    async fn remove(&self, name: &str) -> Result<(), ImageStoreError> {
        let target = self.path_for(name)?;
        match tokio::fs::remove_file(&target).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(name = %name, "Image already gone");
                Ok(())
            }
            Err(e) => Err(io_err(name, e)),
        }
    }
}
