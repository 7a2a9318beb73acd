use actix_web::web;
use sqlx::SqlitePool;
use std::sync::Arc;

use crate::auth::JwtManager;
use crate::config::{AppConfig, RateLimitConfig};
use crate::middleware::RateLimiter;
use crate::repositories::{
    SqliteAdminRepository, SqliteCarouselRepository, SqliteInstagramRepository,
    SqliteOtpRepository, SqlitePageViewRepository, SqliteSettingsRepository,
};
use crate::services::{
    AnalyticsService, AuthService, CarouselService, EmailService, InstagramService,
    PasswordResetService, SettingsService, UploadService,
};

/// Values reported by the health endpoint
pub struct RuntimeInfo {
    pub environment: String,
}

/// Every service the handlers extract, wired once and shared by all workers.
#[derive(Clone)]
pub struct AppState {
    pool: web::Data<SqlitePool>,
    runtime: web::Data<RuntimeInfo>,
    jwt_manager: web::Data<JwtManager>,
    rate_limiter: web::Data<RateLimiter>,
    auth_service: web::Data<AuthService>,
    password_reset_service: web::Data<PasswordResetService>,
    analytics_service: web::Data<AnalyticsService>,
    carousel_service: web::Data<CarouselService>,
    instagram_service: web::Data<InstagramService>,
    settings_service: web::Data<SettingsService>,
    upload_service: web::Data<UploadService>,
}

impl AppState {
    pub fn from_config(pool: SqlitePool, config: &AppConfig) -> Self {
        Self::new(
            pool,
            JwtManager::new(&config.jwt_secret),
            &config.environment,
            config.rate_limit,
            EmailService::from_config(&config.email),
            UploadService::from_config(config.media.as_ref()),
        )
    }

    pub fn new(
        pool: SqlitePool,
        jwt_manager: JwtManager,
        environment: &str,
        rate_limit: RateLimitConfig,
        email_service: EmailService,
        upload_service: UploadService,
    ) -> Self {
        // Initialize repositories
        let admin_repository = Arc::new(SqliteAdminRepository::new(pool.clone()));
        let settings_repository = Arc::new(SqliteSettingsRepository::new(pool.clone()));
        let otp_repository = Arc::new(SqliteOtpRepository::new(pool.clone()));
        let page_view_repository = Arc::new(SqlitePageViewRepository::new(pool.clone()));
        let carousel_repository = Arc::new(SqliteCarouselRepository::new(pool.clone()));
        let instagram_repository = Arc::new(SqliteInstagramRepository::new(pool.clone()));

        // Initialize services with dependency injection
        let password_reset_service = PasswordResetService::new(
            admin_repository.clone(),
            settings_repository.clone(),
            otp_repository,
            Arc::new(email_service),
        );

        Self {
            pool: web::Data::new(pool),
            runtime: web::Data::new(RuntimeInfo {
                environment: environment.to_string(),
            }),
            auth_service: web::Data::new(AuthService::new(admin_repository, jwt_manager.clone())),
            jwt_manager: web::Data::new(jwt_manager),
            rate_limiter: web::Data::new(RateLimiter::new(rate_limit)),
            password_reset_service: web::Data::new(password_reset_service),
            analytics_service: web::Data::new(AnalyticsService::new(page_view_repository)),
            carousel_service: web::Data::new(CarouselService::new(carousel_repository)),
            instagram_service: web::Data::new(InstagramService::new(instagram_repository)),
            settings_service: web::Data::new(SettingsService::new(settings_repository)),
            upload_service: web::Data::new(upload_service),
        }
    }

    pub fn register(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(self.pool.clone())
            .app_data(self.runtime.clone())
            .app_data(self.jwt_manager.clone())
            .app_data(self.rate_limiter.clone())
            .app_data(self.auth_service.clone())
            .app_data(self.password_reset_service.clone())
            .app_data(self.analytics_service.clone())
            .app_data(self.carousel_service.clone())
            .app_data(self.instagram_service.clone())
            .app_data(self.settings_service.clone())
            .app_data(self.upload_service.clone());
    }
}
