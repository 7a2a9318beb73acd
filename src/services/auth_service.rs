use crate::auth::{JwtManager, TOKEN_TTL_SECS};
use crate::models::{Admin, AdminProfile, LoginData, ServiceError};
use crate::repositories::AdminRepository;
use crate::utils::password::{hash_password, verify_password};
use std::sync::Arc;

pub const MIN_PASSWORD_LENGTH: usize = 6;

pub struct AuthService {
    repository: Arc<dyn AdminRepository>,
    jwt_manager: JwtManager,
}

impl AuthService {
    pub fn new(repository: Arc<dyn AdminRepository>, jwt_manager: JwtManager) -> Self {
        Self {
            repository,
            jwt_manager,
        }
    }

    /// Creates the admin account. Only possible while none exists.
    pub async fn register(
        &self,
        email: &str,
        username: &str,
        password: &str,
    ) -> Result<AdminProfile, ServiceError> {
        if self.repository.get().await?.is_some() {
            return Err(ServiceError::ValidationError(
                "Admin account already exists".to_string(),
            ));
        }

        let admin = Admin::new(email.to_string(), username.to_string(), hash_password(password)?);
        if !self.repository.create(&admin).await? {
            return Err(ServiceError::ValidationError(
                "Admin account already exists".to_string(),
            ));
        }

        tracing::info!("Registered admin account {}", admin.username);
        Ok(admin.profile())
    }

    pub async fn login(
        &self,
        username_or_email: &str,
        password: &str,
    ) -> Result<LoginData, ServiceError> {
        let invalid = || ServiceError::AuthenticationError("Invalid credentials".to_string());

        let admin = self
            .repository
            .find_by_login(username_or_email)
            .await?
            .ok_or_else(invalid)?;

        if !verify_password(password, &admin.password_hash) {
            tracing::info!("Failed login attempt for {}", username_or_email);
            return Err(invalid());
        }

        let token = self
            .jwt_manager
            .generate_token(&admin)
            .map_err(|e| ServiceError::InternalError(format!("Failed to generate token: {}", e)))?;

        tracing::info!("Admin {} logged in", admin.username);
        Ok(LoginData {
            admin: admin.profile(),
            token,
            expires_in: TOKEN_TTL_SECS,
        })
    }

    pub async fn profile(&self) -> Result<AdminProfile, ServiceError> {
        self.repository
            .get()
            .await?
            .map(|admin| admin.profile())
            .ok_or_else(|| ServiceError::NotFound("Admin not found".to_string()))
    }

    pub async fn update_profile(
        &self,
        email: &str,
        username: &str,
    ) -> Result<AdminProfile, ServiceError> {
        let admin = self
            .repository
            .update_profile(email, username)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Admin not found".to_string()))?;

        tracing::info!("Updated admin profile ({})", admin.username);
        Ok(admin.profile())
    }

    pub async fn update_password(
        &self,
        current_password: &str,
        new_password: &str,
    ) -> Result<AdminProfile, ServiceError> {
        let admin = self
            .repository
            .get()
            .await?
            .ok_or_else(|| ServiceError::NotFound("Admin not found".to_string()))?;

        if !verify_password(current_password, &admin.password_hash) {
            return Err(ServiceError::CredentialError(
                "Current password is incorrect".to_string(),
            ));
        }

        self.repository
            .update_password(&hash_password(new_password)?)
            .await?;

        tracing::info!("Admin password changed");
        Ok(admin.profile())
    }
}
