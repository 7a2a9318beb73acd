use serde::Deserialize;
use utoipa::ToSchema;

// Fields are optional so handlers can answer with their own message instead
// of a generic deserialization error.

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterForm {
    pub email: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginForm {
    pub username_or_email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateProfileForm {
    pub email: Option<String>,
    pub username: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PasswordChangeForm {
    pub current_password: Option<String>,
    pub new_password: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ForgotPasswordForm {
    pub email: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct VerifyOtpForm {
    pub email: Option<String>,
    pub otp: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordForm {
    pub email: Option<String>,
    pub otp: Option<String>,
    pub new_password: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteImageForm {
    pub public_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UploadQuery {
    pub folder: Option<String>,
}

/// Value of an optional form field unless it is missing or blank. The value
/// itself is returned untouched (passwords and codes are compared verbatim).
pub fn required(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.trim().is_empty())
}
