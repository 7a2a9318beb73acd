#![allow(dead_code)]

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    middleware::from_fn,
    test, App,
};
use async_trait::async_trait;
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::TempDir;
use storefront_cms::{
    auth::JwtManager,
    config::RateLimitConfig,
    middleware::rate_limit,
    models::{Admin, ServiceError, UploadedImage},
    repositories::{AdminRepository, SettingsRepository, SqliteAdminRepository, SqliteSettingsRepository},
    routes,
    services::{EmailSender, EmailService, MediaStorage, UploadService},
    state::AppState,
    utils::password::hash_password,
};

pub const ADMIN_USERNAME: &str = "admin";
pub const ADMIN_ACCOUNT_EMAIL: &str = "admin@gudangpancing.com";
pub const ADMIN_PASSWORD: &str = "admin123";
/// Value of the `admin_email` setting, distinct from the account email.
pub const REGISTERED_EMAIL: &str = "owner@gudangpancing.com";

/// Captures outgoing mail instead of calling the provider.
#[derive(Default)]
pub struct RecordingSender {
    pub sent: Mutex<Vec<(String, String)>>,
}

#[async_trait]
impl EmailSender for RecordingSender {
    async fn send(&self, to: &str, _subject: &str, html: &str) -> Result<String, ServiceError> {
        let mut sent = self.sent.lock().unwrap();
        sent.push((to.to_string(), html.to_string()));
        Ok(format!("email_{}", sent.len()))
    }
}

/// In-memory stand-in for the hosted image store.
#[derive(Default)]
pub struct FakeMedia {
    pub uploads: Mutex<Vec<(String, String, usize)>>,
    pub deleted: Mutex<Vec<String>>,
}

#[async_trait]
impl MediaStorage for FakeMedia {
    async fn upload(
        &self,
        bytes: Vec<u8>,
        file_name: &str,
        _content_type: &str,
        folder: &str,
    ) -> Result<UploadedImage, ServiceError> {
        self.uploads
            .lock()
            .unwrap()
            .push((folder.to_string(), file_name.to_string(), bytes.len()));
        Ok(UploadedImage {
            image_url: format!("https://media.test/{}/{}", folder, file_name),
            public_id: format!("{}/{}", folder, file_name),
        })
    }

    async fn destroy(&self, public_id: &str) -> Result<(), ServiceError> {
        self.deleted.lock().unwrap().push(public_id.to_string());
        Ok(())
    }
}

pub struct TestApp {
    pub pool: SqlitePool,
    pub state: AppState,
    pub jwt_manager: JwtManager,
    pub mail: Arc<RecordingSender>,
    pub media: Arc<FakeMedia>,
    pub temp_dir: TempDir,
}

impl TestApp {
    async fn seed_admin(pool: &SqlitePool) {
        let password_hash = hash_password(ADMIN_PASSWORD).unwrap();
        let admin = Admin::new(
            ADMIN_ACCOUNT_EMAIL.to_string(),
            ADMIN_USERNAME.to_string(),
            password_hash,
        );
        assert!(SqliteAdminRepository::new(pool.clone())
            .create(&admin)
            .await
            .expect("Failed to seed admin"));

        SqliteSettingsRepository::new(pool.clone())
            .upsert("admin_email", REGISTERED_EMAIL)
            .await
            .expect("Failed to seed admin_email");
    }

    /// Fresh database with migrations applied and no admin account.
    pub async fn empty() -> Self {
        Self::build(false, RateLimitConfig {
            max_requests: 10_000,
            window: Duration::from_secs(60),
        })
        .await
    }

    /// Database with the seeded admin account and `admin_email` setting.
    pub async fn new() -> Self {
        Self::build(true, RateLimitConfig {
            max_requests: 10_000,
            window: Duration::from_secs(60),
        })
        .await
    }

    pub async fn with_rate_limit(max_requests: u32) -> Self {
        Self::build(true, RateLimitConfig {
            max_requests,
            window: Duration::from_secs(60),
        })
        .await
    }

    async fn build(seed: bool, rate_limit: RateLimitConfig) -> Self {
        // Create temporary database
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let db_path = temp_dir.path().join("test.db");
        let database_url = format!("sqlite://{}?mode=rwc", db_path.display());

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect(&database_url)
            .await
            .expect("Failed to create database pool");

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .expect("Failed to run migrations");

        if seed {
            Self::seed_admin(&pool).await;
        }

        let jwt_manager = JwtManager::new("test_secret_key");
        let mail = Arc::new(RecordingSender::default());
        let media = Arc::new(FakeMedia::default());

        let state = AppState::new(
            pool.clone(),
            jwt_manager.clone(),
            "test",
            rate_limit,
            EmailService::new(Some(mail.clone() as Arc<dyn EmailSender>)),
            UploadService::new(Some(media.clone() as Arc<dyn MediaStorage>)),
        );

        Self {
            pool,
            state,
            jwt_manager,
            mail,
            media,
            temp_dir,
        }
    }

    pub fn create_app(
        &self,
    ) -> App<
        impl ServiceFactory<
            ServiceRequest,
            Config = (),
            Response = ServiceResponse<impl MessageBody>,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        let state = self.state.clone();
        App::new()
            .configure(move |cfg| state.register(cfg))
            .wrap(from_fn(rate_limit))
            .configure(routes::configure)
    }

    pub async fn login_and_get_token(&self) -> String {
        let app = test::init_service(self.create_app()).await;

        let req = test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(serde_json::json!({
                "usernameOrEmail": ADMIN_USERNAME,
                "password": ADMIN_PASSWORD
            }))
            .to_request();

        let resp = test::call_service(&app, req).await;
        let body: serde_json::Value = test::read_body_json(resp).await;

        body["data"]["token"].as_str().unwrap().to_string()
    }

    /// Latest stored reset code for `email`, read straight from the table.
    pub async fn stored_code(&self, email: &str) -> Option<String> {
        sqlx::query_scalar::<_, String>("SELECT code FROM otp_codes WHERE email = ?")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .unwrap()
    }

    pub async fn expire_codes(&self) {
        sqlx::query("UPDATE otp_codes SET expires_at = ?")
            .bind(chrono::Utc::now() - chrono::Duration::minutes(1))
            .execute(&self.pool)
            .await
            .unwrap();
    }
}

pub fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {}", token))
}
