use actix_web::{web, HttpResponse};

use crate::models::{
    required, ActionResult, ApiResponse, ForgotPasswordForm, ResetPasswordForm, ServiceError,
    VerifyOtpForm,
};
use crate::services::{PasswordResetService, MIN_PASSWORD_LENGTH};

fn respond(result: ActionResult) -> HttpResponse {
    let message = result.message.clone();
    HttpResponse::Ok().json(ApiResponse::with_message(result, message))
}

#[utoipa::path(
    post,
    path = "/api/auth/forgot-password",
    tag = "password-reset",
    request_body = ForgotPasswordForm,
    responses(
        (status = 200, description = "Code issued and sent to the registered address", body = ActionResult),
        (status = 400, description = "Email missing, not configured or not registered", body = ErrorResponse),
        (status = 404, description = "No admin account", body = ErrorResponse)
    ),
    security()
)]
pub async fn forgot_password(
    form: web::Json<ForgotPasswordForm>,
    reset_service: web::Data<PasswordResetService>,
) -> Result<HttpResponse, ServiceError> {
    let Some(email) = required(&form.email) else {
        return Err(ServiceError::ValidationError("Email diperlukan".to_string()));
    };

    let result = reset_service.request_reset(email).await?;

    Ok(respond(result))
}

#[utoipa::path(
    post,
    path = "/api/auth/verify-otp",
    tag = "password-reset",
    request_body = VerifyOtpForm,
    responses(
        (status = 200, description = "Code is valid", body = ActionResult),
        (status = 400, description = "Missing fields or invalid/expired code", body = ErrorResponse)
    ),
    security()
)]
pub async fn verify_otp(
    form: web::Json<VerifyOtpForm>,
    reset_service: web::Data<PasswordResetService>,
) -> Result<HttpResponse, ServiceError> {
    let (Some(email), Some(otp)) = (required(&form.email), required(&form.otp)) else {
        return Err(ServiceError::ValidationError(
            "Email dan OTP diperlukan".to_string(),
        ));
    };

    let result = reset_service.verify_code(email, otp).await?;

    Ok(respond(result))
}

#[utoipa::path(
    post,
    path = "/api/auth/reset-password",
    tag = "password-reset",
    request_body = ResetPasswordForm,
    responses(
        (status = 200, description = "Password reset", body = ActionResult),
        (status = 400, description = "Missing fields, short password, wrong email or invalid code", body = ErrorResponse),
        (status = 404, description = "No admin account", body = ErrorResponse)
    ),
    security()
)]
pub async fn reset_password(
    form: web::Json<ResetPasswordForm>,
    reset_service: web::Data<PasswordResetService>,
) -> Result<HttpResponse, ServiceError> {
    let (Some(email), Some(otp), Some(new_password)) = (
        required(&form.email),
        required(&form.otp),
        required(&form.new_password),
    ) else {
        return Err(ServiceError::ValidationError(
            "Email, OTP, dan password baru diperlukan".to_string(),
        ));
    };

    if new_password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(ServiceError::ValidationError(
            "Password minimal 6 karakter".to_string(),
        ));
    }

    let result = reset_service.reset_password(email, otp, new_password).await?;

    Ok(respond(result))
}
