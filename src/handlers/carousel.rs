use actix_web::{http::header, web, HttpRequest, HttpResponse, HttpResponseBuilder};

use crate::auth::JwtManager;
use crate::middleware::auth::authenticate_request;
use crate::models::{ApiResponse, CarouselItemForm, ServiceError};
use crate::services::CarouselService;

/// Marks a public listing as uncacheable.
pub(crate) fn no_store(mut builder: HttpResponseBuilder) -> HttpResponseBuilder {
    builder
        .insert_header((header::CACHE_CONTROL, "no-store, no-cache, must-revalidate"))
        .insert_header((header::PRAGMA, "no-cache"))
        .insert_header((header::EXPIRES, "0"));
    builder
}

#[utoipa::path(
    get,
    path = "/api/carousel",
    tag = "carousel",
    responses(
        (status = 200, description = "Active items ordered by sort order", body = [CarouselItem])
    ),
    security()
)]
pub async fn get_carousel(carousel_service: web::Data<CarouselService>) -> HttpResponse {
    let items = carousel_service.get_active_items().await;

    no_store(HttpResponse::Ok()).json(ApiResponse::ok(items))
}

#[utoipa::path(
    get,
    path = "/api/carousel/all",
    tag = "carousel",
    responses(
        (status = 200, description = "All items", body = [CarouselItem]),
        (status = 401, description = "Not authenticated", body = ErrorResponse)
    )
)]
pub async fn get_all_carousel(
    req: HttpRequest,
    jwt_manager: web::Data<JwtManager>,
    carousel_service: web::Data<CarouselService>,
) -> Result<HttpResponse, ServiceError> {
    authenticate_request(&req, &jwt_manager)?;

    let items = carousel_service.get_all_items().await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(items)))
}

#[utoipa::path(
    post,
    path = "/api/carousel",
    tag = "carousel",
    request_body = CarouselItemForm,
    responses(
        (status = 201, description = "Carousel item created successfully", body = CarouselItem),
        (status = 400, description = "Missing or invalid fields", body = ErrorResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse)
    )
)]
pub async fn create_carousel_item(
    req: HttpRequest,
    form: web::Json<CarouselItemForm>,
    jwt_manager: web::Data<JwtManager>,
    carousel_service: web::Data<CarouselService>,
) -> Result<HttpResponse, ServiceError> {
    authenticate_request(&req, &jwt_manager)?;

    let item = carousel_service.create_item(form.into_inner()).await?;

    Ok(HttpResponse::Created().json(ApiResponse::with_message(
        item,
        "Carousel item created successfully",
    )))
}

#[utoipa::path(
    put,
    path = "/api/carousel/{id}",
    tag = "carousel",
    params(("id" = i64, Path, description = "Carousel item ID")),
    request_body = CarouselItemForm,
    responses(
        (status = 200, description = "Carousel item updated successfully", body = CarouselItem),
        (status = 400, description = "Invalid ID or fields", body = ErrorResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 404, description = "Item not found", body = ErrorResponse)
    )
)]
pub async fn update_carousel_item(
    req: HttpRequest,
    path: web::Path<i64>,
    form: web::Json<CarouselItemForm>,
    jwt_manager: web::Data<JwtManager>,
    carousel_service: web::Data<CarouselService>,
) -> Result<HttpResponse, ServiceError> {
    authenticate_request(&req, &jwt_manager)?;

    let item = carousel_service
        .update_item(path.into_inner(), form.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::with_message(
        item,
        "Carousel item updated successfully",
    )))
}

#[utoipa::path(
    delete,
    path = "/api/carousel/{id}",
    tag = "carousel",
    params(("id" = i64, Path, description = "Carousel item ID")),
    responses(
        (status = 200, description = "Carousel item deleted successfully"),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 404, description = "Item not found", body = ErrorResponse)
    )
)]
pub async fn delete_carousel_item(
    req: HttpRequest,
    path: web::Path<i64>,
    jwt_manager: web::Data<JwtManager>,
    carousel_service: web::Data<CarouselService>,
) -> Result<HttpResponse, ServiceError> {
    authenticate_request(&req, &jwt_manager)?;

    carousel_service.delete_item(path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::message_only(
        "Carousel item deleted successfully",
    )))
}
