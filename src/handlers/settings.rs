use actix_web::{web, HttpRequest, HttpResponse};
use serde_json::Value;

use crate::auth::JwtManager;
use crate::middleware::auth::authenticate_request;
use crate::models::{ApiResponse, ServiceError};
use crate::services::SettingsService;

#[utoipa::path(
    get,
    path = "/api/settings",
    tag = "settings",
    responses(
        (status = 200, description = "All settings as a key to value object")
    ),
    security()
)]
pub async fn get_settings(settings_service: web::Data<SettingsService>) -> HttpResponse {
    let settings = settings_service.get_public().await;

    HttpResponse::Ok().json(ApiResponse::ok(settings))
}

#[utoipa::path(
    put,
    path = "/api/settings",
    tag = "settings",
    responses(
        (status = 200, description = "Settings updated successfully"),
        (status = 400, description = "No settings provided", body = ErrorResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse)
    )
)]
pub async fn update_settings(
    req: HttpRequest,
    body: web::Json<Value>,
    jwt_manager: web::Data<JwtManager>,
    settings_service: web::Data<SettingsService>,
) -> Result<HttpResponse, ServiceError> {
    authenticate_request(&req, &jwt_manager)?;

    let Value::Object(updates) = body.into_inner() else {
        return Err(ServiceError::ValidationError(
            "No settings provided".to_string(),
        ));
    };

    let settings = settings_service.update_many(&updates).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::with_message(
        settings,
        "Settings updated successfully",
    )))
}

#[utoipa::path(
    post,
    path = "/api/settings/initialize",
    tag = "settings",
    responses(
        (status = 200, description = "Default settings initialized"),
        (status = 401, description = "Not authenticated", body = ErrorResponse)
    )
)]
pub async fn initialize_settings(
    req: HttpRequest,
    jwt_manager: web::Data<JwtManager>,
    settings_service: web::Data<SettingsService>,
) -> Result<HttpResponse, ServiceError> {
    authenticate_request(&req, &jwt_manager)?;

    let settings = settings_service.initialize_defaults().await?;

    Ok(HttpResponse::Ok().json(ApiResponse::with_message(
        settings,
        "Default settings initialized",
    )))
}
