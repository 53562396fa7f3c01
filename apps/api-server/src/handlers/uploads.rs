//! Image upload handler.

use actix_web::{HttpResponse, web};

use miniblog_shared::ApiResponse;
use miniblog_shared::dto::{UploadQuery, UploadResponse};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /api/uploads?filename=photo.jpg
///
/// The raw request body is the file content. Returns the stored filename
/// to pass as `image_filename` when creating or editing a post.
pub async fn upload_image(
    state: web::Data<AppState>,
    query: web::Query<UploadQuery>,
    body: web::Bytes,
) -> AppResult<HttpResponse> {
    let stored = state
        .uploads
        .accept_upload(query.filename.as_deref(), &body)
        .await?;

    match stored {
        Some(filename) => Ok(HttpResponse::Created().json(ApiResponse::ok(UploadResponse { filename }))),
        None => Err(AppError::Validation(format!(
            "a file with one of these extensions is required: {}",
            state.uploads.policy().allowed_extensions.join(", ")
        ))),
    }
}
