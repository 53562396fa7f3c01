//! Post and comment handlers.

use actix_web::{HttpResponse, web};

use miniblog_core::domain::{CommentDraft, PostChanges, PostDraft, PostId};
use miniblog_shared::ApiResponse;
use miniblog_shared::dto::{
    CreateCommentRequest, CreatePostRequest, ListPostsQuery, UpdatePostRequest,
};

use crate::middleware::error::AppResult;
use crate::state::AppState;

/// Remove an image once no post refers to it any more. Failures only cost
/// disk space, so they are logged rather than returned.
async fn release_image(state: &AppState, filename: &str) {
    match state.content.image_in_use(filename).await {
        Ok(false) => {}
        Ok(true) => {
            tracing::debug!(image = %filename, "Image still referenced, keeping it");
            return;
        }
        Err(e) => {
            tracing::warn!(image = %filename, error = %e, "Could not check image references");
            return;
        }
    }

    if let Err(e) = state.uploads.discard(filename).await {
        tracing::warn!(image = %filename, error = %e, "Failed to remove image");
    }
}

/// GET /api/posts?q=term
pub async fn list_posts(
    state: web::Data<AppState>,
    query: web::Query<ListPostsQuery>,
) -> AppResult<HttpResponse> {
    let posts = state.content.list_posts(query.q.as_deref()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(posts)))
}

/// POST /api/posts
pub async fn create_post(
    state: web::Data<AppState>,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let draft = PostDraft {
        title: req.title,
        content: req.content,
        author: req.author,
        tags: req.tags,
        image_filename: req.image_filename,
    };

    let post = state.content.create_post(draft).await?;
    Ok(HttpResponse::Created().json(ApiResponse::ok_with_message(post, "Post added successfully!")))
}

/// GET /api/posts/{id}
pub async fn get_post(
    state: web::Data<AppState>,
    path: web::Path<PostId>,
) -> AppResult<HttpResponse> {
    let post = state.content.get_post(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(post)))
}

/// PUT /api/posts/{id}
pub async fn update_post(
    state: web::Data<AppState>,
    path: web::Path<PostId>,
    body: web::Json<UpdatePostRequest>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let req = body.into_inner();
    let changes = PostChanges {
        title: req.title,
        content: req.content,
        author: req.author,
        tags: req.tags,
        image_filename: req.image_filename,
    };

    let revision = state.content.revise_post(id, changes).await?;
    if let Some(old) = revision.replaced_image() {
        release_image(&state, old).await;
    }

    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(
        revision.current,
        "Post updated successfully!",
    )))
}

/// DELETE /api/posts/{id}
pub async fn delete_post(
    state: web::Data<AppState>,
    path: web::Path<PostId>,
) -> AppResult<HttpResponse> {
    let post = state.content.delete_post(path.into_inner()).await?;

    if let Some(image) = &post.image_filename {
        release_image(&state, image).await;
    }

    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(post.id, "Post deleted.")))
}

/// GET /api/posts/{id}/comments
pub async fn list_comments(
    state: web::Data<AppState>,
    path: web::Path<PostId>,
) -> AppResult<HttpResponse> {
    let comments = state.content.list_comments(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(comments)))
}

/// POST /api/posts/{id}/comments
pub async fn add_comment(
    state: web::Data<AppState>,
    path: web::Path<PostId>,
    body: web::Json<CreateCommentRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let draft = CommentDraft {
        author: req.author,
        content: req.content,
    };

    let comment = state.content.add_comment(path.into_inner(), draft).await?;
    Ok(HttpResponse::Created().json(ApiResponse::ok_with_message(comment, "Comment added!")))
}

#[cfg(test)]
mod tests {
    use actix_web::{App, test, web};
    use serde_json::{Value, json};

    use crate::handlers::{configure_routes, test_support};

    macro_rules! app {
        ($state:expr) => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new($state))
                    .configure(configure_routes),
            )
            .await
        };
    }

    #[actix_rt::test]
    async fn test_post_and_comment_lifecycle() {
        let tmp = tempfile::tempdir().unwrap();
        let app = app!(test_support::state(tmp.path()).await);

        let req = test::TestRequest::post()
            .uri("/api/posts")
            .set_json(json!({ "title": "Hello", "content": "World" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 201);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["data"]["author"], "Anonymous");
        let id = body["data"]["id"].as_i64().unwrap();

        let req = test::TestRequest::post()
            .uri(&format!("/api/posts/{id}/comments"))
            .set_json(json!({ "content": "Nice!" }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), 201);

        let req = test::TestRequest::get()
            .uri(&format!("/api/posts/{id}/comments"))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"].as_array().unwrap().len(), 1);
        assert_eq!(body["data"][0]["content"], "Nice!");

        let req = test::TestRequest::delete()
            .uri(&format!("/api/posts/{id}"))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), 200);

        let req = test::TestRequest::get()
            .uri(&format!("/api/posts/{id}/comments"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 404);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["status"], 404);
    }

    #[actix_rt::test]
    async fn test_search_and_validation() {
        let tmp = tempfile::tempdir().unwrap();
        let app = app!(test_support::state(tmp.path()).await);

        for (title, content) in [("Rust", "ownership"), ("Cooking", "xyz soup")] {
            let req = test::TestRequest::post()
                .uri("/api/posts")
                .set_json(json!({ "title": title, "content": content }))
                .to_request();
            assert_eq!(test::call_service(&app, req).await.status(), 201);
        }

        let req = test::TestRequest::get().uri("/api/posts?q=xyz").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        let posts = body["data"].as_array().unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0]["title"], "Cooking");

        let req = test::TestRequest::post()
            .uri("/api/posts")
            .set_json(json!({ "title": "", "content": "body" }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), 422);
    }

    #[actix_rt::test]
    async fn test_replacing_and_deleting_release_images() {
        let tmp = tempfile::tempdir().unwrap();
        let app = app!(test_support::state(tmp.path()).await);

        let mut stored = Vec::new();
        for name in ["first.png", "second.gif"] {
            let req = test::TestRequest::post()
                .uri(&format!("/api/uploads?filename={name}"))
                .set_payload("img")
                .to_request();
            let body: Value = test::call_and_read_body_json(&app, req).await;
            stored.push(body["data"]["filename"].as_str().unwrap().to_string());
        }

        let req = test::TestRequest::post()
            .uri("/api/posts")
            .set_json(json!({ "title": "Pics", "content": "x", "image_filename": stored[0] }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        let id = body["data"]["id"].as_i64().unwrap();

        let req = test::TestRequest::put()
            .uri(&format!("/api/posts/{id}"))
            .set_json(json!({ "image_filename": stored[1] }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["title"], "Pics");
        assert_eq!(body["data"]["image_filename"], stored[1].as_str());
        assert!(!tmp.path().join(&stored[0]).exists());
        assert!(tmp.path().join(&stored[1]).exists());

        let req = test::TestRequest::delete()
            .uri(&format!("/api/posts/{id}"))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), 200);
        assert!(!tmp.path().join(&stored[1]).exists());
    }

    #[actix_rt::test]
    async fn test_shared_image_survives_until_last_post_releases_it() {
        let tmp = tempfile::tempdir().unwrap();
        let app = app!(test_support::state(tmp.path()).await);

        let req = test::TestRequest::post()
            .uri("/api/uploads?filename=cat.png")
            .set_payload("img")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        let image = body["data"]["filename"].as_str().unwrap().to_string();

        let mut ids = Vec::new();
        for title in ["A", "B", "C"] {
            let req = test::TestRequest::post()
                .uri("/api/posts")
                .set_json(json!({ "title": title, "content": "x", "image_filename": image }))
                .to_request();
            let body: Value = test::call_and_read_body_json(&app, req).await;
            ids.push(body["data"]["id"].as_i64().unwrap());
        }

        let req = test::TestRequest::delete()
            .uri(&format!("/api/posts/{}", ids[0]))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), 200);
        assert!(tmp.path().join(&image).exists());

        let req = test::TestRequest::put()
            .uri(&format!("/api/posts/{}", ids[1]))
            .set_json(json!({ "image_filename": "20240101000000_other.png" }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), 200);
        assert!(tmp.path().join(&image).exists());

        let req = test::TestRequest::get()
            .uri(&format!("/api/posts/{}", ids[2]))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["image_filename"], image.as_str());

        let req = test::TestRequest::delete()
            .uri(&format!("/api/posts/{}", ids[2]))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), 200);
        assert!(!tmp.path().join(&image).exists());
    }

    #[actix_rt::test]
    async fn test_unknown_post_is_not_found() {
        let tmp = tempfile::tempdir().unwrap();
        let app = app!(test_support::state(tmp.path()).await);

        let req = test::TestRequest::get().uri("/api/posts/99").to_request();
        assert_eq!(test::call_service(&app, req).await.status(), 404);

        let req = test::TestRequest::put()
            .uri("/api/posts/99")
            .set_json(json!({ "title": "x" }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), 404);
    }
}
