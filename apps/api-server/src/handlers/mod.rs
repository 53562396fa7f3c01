//! HTTP handlers and route configuration.

mod health;
mod posts;
mod uploads;

use actix_web::web;

/// Largest accepted JSON body.
const JSON_LIMIT: usize = 1024 * 1024;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .app_data(web::JsonConfig::default().limit(JSON_LIMIT))
            .route("/health", web::get().to(health::health_check))
            .service(
                web::scope("/posts")
                    .route("", web::get().to(posts::list_posts))
                    .route("", web::post().to(posts::create_post))
                    .route("/{id}", web::get().to(posts::get_post))
                    .route("/{id}", web::put().to(posts::update_post))
                    .route("/{id}", web::delete().to(posts::delete_post))
                    .route("/{id}/comments", web::get().to(posts::list_comments))
                    .route("/{id}/comments", web::post().to(posts::add_comment)),
            )
            .route("/uploads", web::post().to(uploads::upload_image)),
    );
}
