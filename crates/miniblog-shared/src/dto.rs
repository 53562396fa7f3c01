//! Data Transfer Objects - request/response types for the API.

use serde::{Deserialize, Serialize};

/// Query string of `GET /api/posts`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListPostsQuery {
    #[serde(default)]
    pub q: Option<String>,
}

/// Request to create a post. `image_filename` is a name returned by the
/// upload endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePostRequest {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub tags: Option<String>,
    #[serde(default)]
    pub image_filename: Option<String>,
}

/// Request to edit a post. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePostRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub tags: Option<String>,
    #[serde(default)]
    pub image_filename: Option<String>,
}

/// Request to add a comment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCommentRequest {
    #[serde(default)]
    pub author: Option<String>,
    pub content: String,
}

/// Query string of `POST /api/uploads`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UploadQuery {
    #[serde(default)]
    pub filename: Option<String>,
}

/// Response of a successful upload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    pub filename: String,
}
