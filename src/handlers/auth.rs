use actix_web::{web, HttpRequest, HttpResponse};

use crate::auth::JwtManager;
use crate::middleware::auth::authenticate_request;
use crate::models::{
    required, ApiResponse, LoginForm, PasswordChangeForm, RegisterForm, ServiceError,
    UpdateProfileForm,
};
use crate::services::{AuthService, MIN_PASSWORD_LENGTH};

#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = "auth",
    request_body = RegisterForm,
    responses(
        (status = 201, description = "Admin registered successfully", body = AdminProfile),
        (status = 400, description = "Missing fields, short password or admin already exists", body = ErrorResponse)
    ),
    security()
)]
pub async fn register(
    form: web::Json<RegisterForm>,
    auth_service: web::Data<AuthService>,
) -> Result<HttpResponse, ServiceError> {
    let (Some(email), Some(username), Some(password)) = (
        required(&form.email),
        required(&form.username),
        required(&form.password),
    ) else {
        return Err(ServiceError::ValidationError(
            "Email, username, and password are required".to_string(),
        ));
    };

    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(ServiceError::ValidationError(
            "Password must be at least 6 characters".to_string(),
        ));
    }

    let admin = auth_service.register(email, username, password).await?;

    Ok(HttpResponse::Created().json(ApiResponse::with_message(
        admin,
        "Admin registered successfully",
    )))
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "auth",
    request_body = LoginForm,
    responses(
        (status = 200, description = "Login successful - JWT token returned in data", body = LoginData),
        (status = 400, description = "Missing fields", body = ErrorResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse)
    ),
    security()
)]
pub async fn login(
    form: web::Json<LoginForm>,
    auth_service: web::Data<AuthService>,
) -> Result<HttpResponse, ServiceError> {
    let (Some(username_or_email), Some(password)) =
        (required(&form.username_or_email), required(&form.password))
    else {
        return Err(ServiceError::ValidationError(
            "Username/email and password are required".to_string(),
        ));
    };

    let login = auth_service.login(username_or_email, password).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::with_message(login, "Login successful")))
}

#[utoipa::path(
    get,
    path = "/api/auth/profile",
    tag = "auth",
    responses(
        (status = 200, description = "Current admin", body = AdminProfile),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 404, description = "Admin not found", body = ErrorResponse)
    )
)]
pub async fn get_profile(
    req: HttpRequest,
    jwt_manager: web::Data<JwtManager>,
    auth_service: web::Data<AuthService>,
) -> Result<HttpResponse, ServiceError> {
    authenticate_request(&req, &jwt_manager)?;

    let admin = auth_service.profile().await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(admin)))
}

#[utoipa::path(
    put,
    path = "/api/auth/profile",
    tag = "auth",
    request_body = UpdateProfileForm,
    responses(
        (status = 200, description = "Profile updated successfully", body = AdminProfile),
        (status = 400, description = "Missing fields", body = ErrorResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse)
    )
)]
pub async fn update_profile(
    req: HttpRequest,
    form: web::Json<UpdateProfileForm>,
    jwt_manager: web::Data<JwtManager>,
    auth_service: web::Data<AuthService>,
) -> Result<HttpResponse, ServiceError> {
    authenticate_request(&req, &jwt_manager)?;

    let (Some(email), Some(username)) = (required(&form.email), required(&form.username)) else {
        return Err(ServiceError::ValidationError(
            "Email and username are required".to_string(),
        ));
    };

    let admin = auth_service.update_profile(email, username).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::with_message(
        admin,
        "Profile updated successfully",
    )))
}

#[utoipa::path(
    put,
    path = "/api/auth/password",
    tag = "auth",
    request_body = PasswordChangeForm,
    responses(
        (status = 200, description = "Password updated successfully", body = AdminProfile),
        (status = 400, description = "Invalid input or wrong current password", body = ErrorResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse)
    )
)]
pub async fn update_password(
    req: HttpRequest,
    form: web::Json<PasswordChangeForm>,
    jwt_manager: web::Data<JwtManager>,
    auth_service: web::Data<AuthService>,
) -> Result<HttpResponse, ServiceError> {
    authenticate_request(&req, &jwt_manager)?;

    let (Some(current_password), Some(new_password)) =
        (required(&form.current_password), required(&form.new_password))
    else {
        return Err(ServiceError::ValidationError(
            "Current password and new password are required".to_string(),
        ));
    };

    if new_password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(ServiceError::ValidationError(
            "New password must be at least 6 characters".to_string(),
        ));
    }

    let admin = auth_service
        .update_password(current_password, new_password)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::with_message(
        admin,
        "Password updated successfully",
    )))
}
