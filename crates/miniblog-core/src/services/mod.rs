//! Services - the operations exposed to request-handling layers.

mod content_store;
mod upload_handler;

pub use content_store::ContentStore;
pub use upload_handler::{UploadHandler, UploadPolicy};
