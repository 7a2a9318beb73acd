use serde::Serialize;
use utoipa::ToSchema;

use crate::models::AdminProfile;

/// Success envelope shared by every endpoint: `{success, message, data}`.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub message: String,
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self::with_message(data, "Success")
    }

    pub fn with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    pub fn message_only(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: None,
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
    #[schema(value_type = Option<Object>)]
    pub errors: Option<serde_json::Value>,
}

/// Outcome of a password reset step, echoed inside `data`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ActionResult {
    pub success: bool,
    pub message: String,
}

impl ActionResult {
    pub fn done(message: &str) -> Self {
        Self {
            success: true,
            message: message.to_string(),
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct LoginData {
    pub admin: AdminProfile,
    pub token: String,
    pub expires_in: u64, // seconds
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UploadedImage {
    #[serde(rename = "imageUrl")]
    pub image_url: String,
    #[serde(rename = "publicId")]
    pub public_id: String,
}

#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub environment: String,
    pub database: String,
}
