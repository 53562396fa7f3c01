//! Upload Handler - validates image uploads and hands them to an [`ImageStore`].

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::domain::image::{
    DEFAULT_IMAGE_EXTENSIONS, SANITIZED_MAX_LEN, has_allowed_extension, is_plain_filename,
    sanitize_filename, stored_image_name, truncate_filename,
};
use crate::error::DomainError;
use crate::ports::ImageStore;

/// What uploads are accepted.
#[derive(Debug, Clone)]
pub struct UploadPolicy {
    /// Allowed extensions, compared case-insensitively.
    pub allowed_extensions: Vec<String>,
    /// Largest accepted upload in bytes.
    pub max_bytes: usize,
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self {
            allowed_extensions: DEFAULT_IMAGE_EXTENSIONS
                .iter()
                .map(|e| e.to_string())
                .collect(),
            max_bytes: 16 * 1024 * 1024,
        }
    }
}

#[derive(Clone)]
pub struct UploadHandler {
    store: Arc<dyn ImageStore>,
    policy: UploadPolicy,
}

impl UploadHandler {
    pub fn new(store: Arc<dyn ImageStore>, policy: UploadPolicy) -> Self {
        Self { store, policy }
    }

    pub fn policy(&self) -> &UploadPolicy {
        &self.policy
    }

    /// Store an uploaded image and return its stored filename.
    ///
    /// Returns `Ok(None)` without writing anything when no file was
    /// supplied or the extension is not allowed. Long names are shortened
    /// so the stored name always fits a post's `image_filename`. Two uploads with the same
    /// sanitized name in the same second share a stored name; the later
    /// write replaces the earlier one.
    pub async fn accept_upload(
        &self,
        original_filename: Option<&str>,
        bytes: &[u8],
    ) -> Result<Option<String>, DomainError> {
        self.accept_upload_at(original_filename, bytes, Utc::now())
            .await
    }

    async fn accept_upload_at(
        &self,
        original_filename: Option<&str>,
        bytes: &[u8],
        now: DateTime<Utc>,
    ) -> Result<Option<String>, DomainError> {
        let Some(original) = original_filename.filter(|name| !name.is_empty()) else {
            return Ok(None);
        };

        let allowed = &self.policy.allowed_extensions;
        if !has_allowed_extension(original, allowed) {
            tracing::debug!(filename = %original, "Upload rejected: extension not allowed");
            return Ok(None);
        }

        let sanitized = sanitize_filename(original);
        if !has_allowed_extension(&sanitized, allowed) {
            tracing::debug!(filename = %original, "Upload rejected: nothing usable left after sanitizing");
            return Ok(None);
        }
        let Some(sanitized) = truncate_filename(&sanitized, SANITIZED_MAX_LEN) else {
            tracing::debug!(filename = %original, "Upload rejected: extension too long");
            return Ok(None);
        };

        if bytes.len() > self.policy.max_bytes {
            return Err(DomainError::Validation(format!(
                "image is {} bytes, limit is {}",
                bytes.len(),
                self.policy.max_bytes
            )));
        }

        let stored = stored_image_name(&sanitized, now);
        self.store.put(&stored, bytes).await?;
        tracing::info!(stored = %stored, size = bytes.len(), "Image stored");

        Ok(Some(stored))
    }

    /// Remove a previously stored image.
    pub async fn discard(&self, stored_filename: &str) -> Result<(), DomainError> {
        if !is_plain_filename(stored_filename) {
            return Err(DomainError::Validation(format!(
                "not a stored image name: {stored_filename}"
            )));
        }
        self.store.remove(stored_filename).await?;
        tracing::info!(stored = %stored_filename, "Image discarded");
        Ok(())
    }
}
