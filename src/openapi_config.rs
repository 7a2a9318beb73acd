use std::collections::BTreeMap;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::openapi::OpenApi as OpenApiSpec;
use utoipa::OpenApi;

use crate::handlers;
use crate::models::{
    ActionResult, AdminProfile, AnalyticsReport, CarouselItem, CarouselItemForm, ChartPoint,
    DeleteImageForm, ErrorResponse, ForgotPasswordForm, HealthResponse, InstagramPost,
    InstagramPostForm, LoginData, LoginForm, PasswordChangeForm, PriceInput, RegisterForm,
    ResetPasswordForm, TrackResult, UpdateProfileForm, UploadedImage, VerifyOtpForm,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health::health,
        handlers::auth::register,
        handlers::auth::login,
        handlers::auth::get_profile,
        handlers::auth::update_profile,
        handlers::auth::update_password,
        handlers::password_reset::forgot_password,
        handlers::password_reset::verify_otp,
        handlers::password_reset::reset_password,
        handlers::analytics::track_view,
        handlers::analytics::get_analytics,
        handlers::carousel::get_carousel,
        handlers::carousel::get_all_carousel,
        handlers::carousel::create_carousel_item,
        handlers::carousel::update_carousel_item,
        handlers::carousel::delete_carousel_item,
        handlers::instagram::get_instagram_feed,
        handlers::instagram::get_all_instagram_posts,
        handlers::instagram::create_instagram_post,
        handlers::instagram::update_instagram_post,
        handlers::instagram::delete_instagram_post,
        handlers::settings::get_settings,
        handlers::settings::update_settings,
        handlers::settings::initialize_settings,
        handlers::upload::upload_image,
        handlers::upload::delete_image,
    ),
    components(schemas(
        ActionResult,
        AdminProfile,
        AnalyticsReport,
        CarouselItem,
        CarouselItemForm,
        ChartPoint,
        DeleteImageForm,
        ErrorResponse,
        ForgotPasswordForm,
        HealthResponse,
        InstagramPost,
        InstagramPostForm,
        LoginData,
        LoginForm,
        PasswordChangeForm,
        PriceInput,
        RegisterForm,
        ResetPasswordForm,
        TrackResult,
        UpdateProfileForm,
        UploadedImage,
        VerifyOtpForm,
    )),
    tags(
        (name = "auth", description = "Admin account"),
        (name = "password-reset", description = "One-time code password reset"),
        (name = "analytics", description = "Page view tracking and reports"),
        (name = "carousel", description = "Landing page product carousel"),
        (name = "instagram", description = "Instagram feed mirror"),
        (name = "settings", description = "Storefront settings"),
        (name = "upload", description = "Image hosting"),
        (name = "health", description = "Liveness"),
    ),
    info(title = "Storefront CMS API", description = "Content management backend for the storefront landing page")
)]
pub struct ApiDoc;

pub fn configure_openapi(mut openapi: OpenApiSpec) -> OpenApiSpec {
    // Add Bearer token security scheme (HTTP Bearer type, not ApiKey)
    let mut security_schemes = BTreeMap::new();
    security_schemes.insert(
        "bearer_auth".to_string(),
        SecurityScheme::Http(
            HttpBuilder::new()
                .scheme(HttpAuthScheme::Bearer)
                .bearer_format("JWT")
                .description(Some("JWT token from /api/auth/login"))
                .build(),
        ),
    );

    if let Some(components) = openapi.components.as_mut() {
        components.security_schemes = security_schemes;
    }

    // Applies to every endpoint without a security() override
    openapi.security = Some(vec![
        utoipa::openapi::security::SecurityRequirement::new("bearer_auth", Vec::<String>::new()),
    ]);

    openapi
}
