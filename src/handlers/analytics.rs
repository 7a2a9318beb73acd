use actix_web::{web, HttpRequest, HttpResponse};

use crate::auth::JwtManager;
use crate::middleware::auth::authenticate_request;
use crate::middleware::client_address;
use crate::models::{AnalyticsQuery, AnalyticsRange, ApiResponse, ServiceError};
use crate::services::AnalyticsService;

#[utoipa::path(
    post,
    path = "/api/analytics/track",
    tag = "analytics",
    responses(
        (status = 200, description = "View recorded, or skipped for bots", body = TrackResult),
        (status = 500, description = "View could not be stored", body = ErrorResponse)
    ),
    security()
)]
pub async fn track_view(
    req: HttpRequest,
    analytics_service: web::Data<AnalyticsService>,
) -> Result<HttpResponse, ServiceError> {
    let address = client_address(req.peer_addr());
    let user_agent = req
        .headers()
        .get("user-agent")
        .and_then(|v| v.to_str().ok());

    let result = analytics_service.record_view(&address, user_agent).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(result)))
}

#[utoipa::path(
    get,
    path = "/api/analytics",
    tag = "analytics",
    params(AnalyticsQuery),
    responses(
        (status = 200, description = "View counts for the range", body = AnalyticsReport),
        (status = 400, description = "Unknown range", body = ErrorResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse)
    )
)]
pub async fn get_analytics(
    req: HttpRequest,
    query: web::Query<AnalyticsQuery>,
    jwt_manager: web::Data<JwtManager>,
    analytics_service: web::Data<AnalyticsService>,
) -> Result<HttpResponse, ServiceError> {
    authenticate_request(&req, &jwt_manager)?;

    let range = match query.range.as_deref() {
        Some(range) => range
            .parse::<AnalyticsRange>()
            .map_err(ServiceError::ValidationError)?,
        None => AnalyticsRange::default(),
    };

    let report = analytics_service.get_analytics(range).await;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(report)))
}
