use actix_multipart::form::MultipartFormConfig;
use actix_web::{error, http::StatusCode, web, HttpRequest, ResponseError};

use crate::handlers;
use crate::handlers::upload::MULTIPART_MEMORY_LIMIT;
use crate::models::ServiceError;

fn json_error(err: error::JsonPayloadError, _req: &HttpRequest) -> error::Error {
    ServiceError::ValidationError(format!("Invalid request body: {}", err)).into()
}

fn path_error(_err: error::PathError, _req: &HttpRequest) -> error::Error {
    ServiceError::ValidationError("Invalid item ID".to_string()).into()
}

fn query_error(err: error::QueryPayloadError, _req: &HttpRequest) -> error::Error {
    ServiceError::ValidationError(format!("Invalid query string: {}", err)).into()
}

fn multipart_error(err: actix_multipart::MultipartError, _req: &HttpRequest) -> error::Error {
    let message = if err.status_code() == StatusCode::PAYLOAD_TOO_LARGE {
        "File too large. Maximum 5MB".to_string()
    } else {
        "No file uploaded".to_string()
    };
    ServiceError::ValidationError(message).into()
}

/// Extractor settings and the full route table, shared by the server and tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error))
        .app_data(web::PathConfig::default().error_handler(path_error))
        .app_data(web::QueryConfig::default().error_handler(query_error))
        .app_data(
            MultipartFormConfig::default()
                .memory_limit(MULTIPART_MEMORY_LIMIT)
                .total_limit(MULTIPART_MEMORY_LIMIT + 64 * 1024)
                .error_handler(multipart_error),
        )
        .route("/health", web::get().to(handlers::health))
        .service(
            web::scope("/api")
                .route("/health", web::get().to(handlers::health))
                .service(
                    web::scope("/auth")
                        .route("/register", web::post().to(handlers::register))
                        .route("/login", web::post().to(handlers::login))
                        .route("/profile", web::get().to(handlers::get_profile))
                        .route("/profile", web::put().to(handlers::update_profile))
                        .route("/password", web::put().to(handlers::update_password))
                        .route("/forgot-password", web::post().to(handlers::forgot_password))
                        .route("/verify-otp", web::post().to(handlers::verify_otp))
                        .route("/reset-password", web::post().to(handlers::reset_password)),
                )
                .route("/analytics/track", web::post().to(handlers::track_view))
                .route("/analytics", web::get().to(handlers::get_analytics))
                .route("/carousel", web::get().to(handlers::get_carousel))
                .route("/carousel/all", web::get().to(handlers::get_all_carousel))
                .route("/carousel", web::post().to(handlers::create_carousel_item))
                .route("/carousel/{id}", web::put().to(handlers::update_carousel_item))
                .route("/carousel/{id}", web::delete().to(handlers::delete_carousel_item))
                .route("/instagram-feed", web::get().to(handlers::get_instagram_feed))
                .route("/instagram-feed/all", web::get().to(handlers::get_all_instagram_posts))
                .route("/instagram-feed", web::post().to(handlers::create_instagram_post))
                .route("/instagram-feed/{id}", web::put().to(handlers::update_instagram_post))
                .route("/instagram-feed/{id}", web::delete().to(handlers::delete_instagram_post))
                .route("/settings", web::get().to(handlers::get_settings))
                .route("/settings", web::put().to(handlers::update_settings))
                .route("/settings/initialize", web::post().to(handlers::initialize_settings))
                .route("/upload", web::post().to(handlers::upload_image))
                .route("/upload", web::delete().to(handlers::delete_image)),
        );
}
