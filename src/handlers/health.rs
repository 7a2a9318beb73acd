use actix_web::{web, HttpResponse};
use chrono::Utc;
use sqlx::SqlitePool;

use crate::models::HealthResponse;
use crate::state::RuntimeInfo;

#[utoipa::path(
    get,
    path = "/api/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is up", body = HealthResponse)
    ),
    security()
)]
pub async fn health(
    pool: web::Data<SqlitePool>,
    runtime: web::Data<RuntimeInfo>,
) -> HttpResponse {
    let database = match sqlx::query_scalar::<_, i64>("SELECT 1")
        .fetch_one(pool.get_ref())
        .await
    {
        Ok(_) => "connected",
        Err(e) => {
            tracing::warn!("Health check could not reach the database: {}", e);
            "disconnected"
        }
    };

    HttpResponse::Ok().json(HealthResponse {
        status: "ok".to_string(),
        timestamp: Utc::now().to_rfc3339(),
        environment: runtime.environment.clone(),
        database: database.to_string(),
    })
}
