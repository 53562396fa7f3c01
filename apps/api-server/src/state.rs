//! Application state - shared across all handlers.

use std::sync::Arc;

use miniblog_core::ports::ContentRepository;
use miniblog_core::{ContentStore, UploadHandler};
use miniblog_infra::{InMemoryContentRepository, LocalImageStore};

#[cfg(feature = "sql")]
use miniblog_infra::{DatabaseConnections, SqlContentRepository};

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub content: ContentStore,
    pub uploads: UploadHandler,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> std::io::Result<Self> {
        let repo = Self::content_repository(config).await;

        let image_store = LocalImageStore::open(&config.upload_dir)
            .await
            .map_err(std::io::Error::other)?;

        tracing::info!("Application state initialized");

        Ok(Self::from_parts(
            ContentStore::new(repo),
            UploadHandler::new(Arc::new(image_store), config.upload_policy.clone()),
        ))
    }

    pub fn from_parts(content: ContentStore, uploads: UploadHandler) -> Self {
        Self { content, uploads }
    }

    #[cfg(feature = "sql")]
    async fn content_repository(config: &AppConfig) -> Arc<dyn ContentRepository> {
        let connected = match DatabaseConnections::init(&config.database).await {
            Ok(db) => db.migrate().await.map(|()| db),
            Err(e) => Err(e),
        };

        match connected {
            Ok(db) => Arc::new(SqlContentRepository::new(db.main)),
            Err(e) => {
                tracing::error!(
                    "Failed to prepare database: {}. Using in-memory fallback.",
                    e
                );
                Arc::new(InMemoryContentRepository::new())
            }
        }
    }

    #[cfg(not(feature = "sql"))]
    async fn content_repository(_config: &AppConfig) -> Arc<dyn ContentRepository> {
        tracing::info!("Running without sql feature - using in-memory repository");
        Arc::new(InMemoryContentRepository::new())
    }
}
