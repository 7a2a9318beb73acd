use crate::auth::{verify_jwt, Claims, JwtManager};
use crate::models::ServiceError;

/// Claims of the bearer token on `req`, or a 401 error.
pub fn authenticate_request(
    req: &actix_web::HttpRequest,
    jwt_manager: &JwtManager,
) -> Result<Claims, ServiceError> {
    verify_jwt(req, jwt_manager).map_err(|e| {
        tracing::debug!("Rejected request to {}: {}", req.path(), e);
        e
    })
}
