use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Validation error: {0}")]
    ValidationError(String),
    /// Rejected email/code/password pairs. Messages are fixed so callers
    /// cannot tell a missing record from a wrong value.
    #[error("Credential error: {0}")]
    CredentialError(String),
    #[error("Authentication error: {0}")]
    AuthenticationError(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("Upstream error: {0}")]
    UpstreamError(String),
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl ServiceError {
    fn client_message(&self) -> String {
        match self {
            ServiceError::ValidationError(msg)
            | ServiceError::CredentialError(msg)
            | ServiceError::AuthenticationError(msg)
            | ServiceError::NotFound(msg) => msg.clone(),
            ServiceError::DatabaseError(_) => "Database error occurred".to_string(),
            ServiceError::UpstreamError(_) => "Upstream service error".to_string(),
            ServiceError::InternalError(_) => "Internal server error".to_string(),
        }
    }
}

impl ResponseError for ServiceError {
    fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::ValidationError(_) | ServiceError::CredentialError(_) => {
                StatusCode::BAD_REQUEST
            }
            ServiceError::AuthenticationError(_) => StatusCode::UNAUTHORIZED,
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::DatabaseError(_)
            | ServiceError::UpstreamError(_)
            | ServiceError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("{}", self);
        }

        HttpResponse::build(status).json(json!({
            "success": false,
            "message": self.client_message(),
            "errors": null
        }))
    }
}

// Conversion from sqlx errors
impl From<sqlx::Error> for ServiceError {
    fn from(err: sqlx::Error) -> Self {
        ServiceError::DatabaseError(err.to_string())
    }
}

impl From<reqwest::Error> for ServiceError {
    fn from(err: reqwest::Error) -> Self {
        ServiceError::UpstreamError(err.to_string())
    }
}
