use actix_web::{web, HttpRequest, HttpResponse};

use crate::auth::JwtManager;
use crate::handlers::carousel::no_store;
use crate::middleware::auth::authenticate_request;
use crate::models::{ApiResponse, InstagramPostForm, ServiceError};
use crate::services::InstagramService;

#[utoipa::path(
    get,
    path = "/api/instagram-feed",
    tag = "instagram",
    responses(
        (status = 200, description = "Active posts ordered by sort order", body = [InstagramPost])
    ),
    security()
)]
pub async fn get_instagram_feed(instagram_service: web::Data<InstagramService>) -> HttpResponse {
    let posts = instagram_service.get_active_posts().await;

    no_store(HttpResponse::Ok()).json(ApiResponse::ok(posts))
}

#[utoipa::path(
    get,
    path = "/api/instagram-feed/all",
    tag = "instagram",
    responses(
        (status = 200, description = "All posts", body = [InstagramPost]),
        (status = 401, description = "Not authenticated", body = ErrorResponse)
    )
)]
pub async fn get_all_instagram_posts(
    req: HttpRequest,
    jwt_manager: web::Data<JwtManager>,
    instagram_service: web::Data<InstagramService>,
) -> Result<HttpResponse, ServiceError> {
    authenticate_request(&req, &jwt_manager)?;

    let posts = instagram_service.get_all_posts().await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(posts)))
}

#[utoipa::path(
    post,
    path = "/api/instagram-feed",
    tag = "instagram",
    request_body = InstagramPostForm,
    responses(
        (status = 201, description = "Instagram post created successfully", body = InstagramPost),
        (status = 400, description = "Missing fields", body = ErrorResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse)
    )
)]
pub async fn create_instagram_post(
    req: HttpRequest,
    form: web::Json<InstagramPostForm>,
    jwt_manager: web::Data<JwtManager>,
    instagram_service: web::Data<InstagramService>,
) -> Result<HttpResponse, ServiceError> {
    authenticate_request(&req, &jwt_manager)?;

    let post = instagram_service.create_post(form.into_inner()).await?;

    Ok(HttpResponse::Created().json(ApiResponse::with_message(
        post,
        "Instagram post created successfully",
    )))
}

#[utoipa::path(
    put,
    path = "/api/instagram-feed/{id}",
    tag = "instagram",
    params(("id" = i64, Path, description = "Instagram post ID")),
    request_body = InstagramPostForm,
    responses(
        (status = 200, description = "Instagram post updated successfully", body = InstagramPost),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 404, description = "Post not found", body = ErrorResponse)
    )
)]
pub async fn update_instagram_post(
    req: HttpRequest,
    path: web::Path<i64>,
    form: web::Json<InstagramPostForm>,
    jwt_manager: web::Data<JwtManager>,
    instagram_service: web::Data<InstagramService>,
) -> Result<HttpResponse, ServiceError> {
    authenticate_request(&req, &jwt_manager)?;

    let post = instagram_service
        .update_post(path.into_inner(), form.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::with_message(
        post,
        "Instagram post updated successfully",
    )))
}

#[utoipa::path(
    delete,
    path = "/api/instagram-feed/{id}",
    tag = "instagram",
    params(("id" = i64, Path, description = "Instagram post ID")),
    responses(
        (status = 200, description = "Instagram post deleted successfully"),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 404, description = "Post not found", body = ErrorResponse)
    )
)]
pub async fn delete_instagram_post(
    req: HttpRequest,
    path: web::Path<i64>,
    jwt_manager: web::Data<JwtManager>,
    instagram_service: web::Data<InstagramService>,
) -> Result<HttpResponse, ServiceError> {
    authenticate_request(&req, &jwt_manager)?;

    instagram_service.delete_post(path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::message_only(
        "Instagram post deleted successfully",
    )))
}
