use crate::models::{ActionResult, OneTimeCode, ServiceError, SettingsEntry};
use crate::repositories::{AdminRepository, OtpRepository, SettingsRepository};
use crate::services::email_service::{EmailDelivery, EmailService};
use crate::utils::password::hash_password;
use chrono::Utc;
use std::sync::Arc;

const INVALID_CODE: &str = "OTP tidak valid atau sudah expired";
const DEFAULT_STORE_NAME: &str = "Gudang Pancing";

/// Issues and consumes the one-time codes that let the administrator reset
/// a forgotten password. Only the address stored in the `admin_email`
/// setting may request a code.
pub struct PasswordResetService {
    admins: Arc<dyn AdminRepository>,
    settings: Arc<dyn SettingsRepository>,
    codes: Arc<dyn OtpRepository>,
    email: Arc<EmailService>,
}

impl PasswordResetService {
    pub fn new(
        admins: Arc<dyn AdminRepository>,
        settings: Arc<dyn SettingsRepository>,
        codes: Arc<dyn OtpRepository>,
        email: Arc<EmailService>,
    ) -> Self {
        Self {
            admins,
            settings,
            codes,
            email,
        }
    }

    async fn registered_email(&self) -> Result<Option<String>, ServiceError> {
        Ok(self
            .settings
            .find_by_key(SettingsEntry::ADMIN_EMAIL)
            .await?
            .map(|entry| entry.value)
            .filter(|value| !value.trim().is_empty()))
    }

    async fn store_name(&self) -> String {
        match self.settings.find_by_key(SettingsEntry::STORE_NAME).await {
            Ok(Some(entry)) if !entry.value.trim().is_empty() => entry.value,
            _ => DEFAULT_STORE_NAME.to_string(),
        }
    }

    pub async fn request_reset(&self, claimed_email: &str) -> Result<ActionResult, ServiceError> {
        let registered = self.registered_email().await?.ok_or_else(|| {
            ServiceError::ValidationError(
                "Email admin belum diatur di Settings. Hubungi administrator.".to_string(),
            )
        })?;

        if claimed_email.to_lowercase() != registered.to_lowercase() {
            return Err(ServiceError::CredentialError(
                "Email tidak terdaftar. Gunakan email yang terdaftar di Settings.".to_string(),
            ));
        }

        let admin = self
            .admins
            .get()
            .await?
            .ok_or_else(|| ServiceError::NotFound("Akun admin tidak ditemukan".to_string()))?;

        let otp = OneTimeCode::issue(&registered, Utc::now());
        self.codes.replace_for_email(&otp).await?;
        tracing::info!("Issued password reset code for {}", registered);

        let store_name = self.store_name().await;
        match self
            .email
            .send_otp(&registered, &admin.username, &otp.code, &store_name)
            .await
        {
            EmailDelivery::Sent { .. } | EmailDelivery::Unconfigured { .. } => {}
            EmailDelivery::Failed { error } => {
                tracing::warn!("Reset code stored but not delivered: {}", error);
            }
        }

        Ok(ActionResult::done("OTP telah dikirim ke email"))
    }

    /// Marks a matching unexpired code as verified. The record is kept so the
    /// reset step can still consume it.
    pub async fn verify_code(&self, email: &str, code: &str) -> Result<ActionResult, ServiceError> {
        let otp = self
            .codes
            .find_unused(email, code, Utc::now())
            .await?
            .ok_or_else(|| ServiceError::CredentialError(INVALID_CODE.to_string()))?;

        self.codes.mark_used(otp.id).await?;
        tracing::info!("Reset code verified for {}", email);

        Ok(ActionResult::done("OTP valid"))
    }

    /// Sets a new password when `code` is an unexpired code for the
    /// registered address. Verification beforehand is not required.
    pub async fn reset_password(
        &self,
        claimed_email: &str,
        code: &str,
        new_password: &str,
    ) -> Result<ActionResult, ServiceError> {
        let registered = match self.registered_email().await? {
            Some(registered) if claimed_email.to_lowercase() == registered.to_lowercase() => {
                registered
            }
            _ => return Err(ServiceError::CredentialError("Email tidak valid".to_string())),
        };

        self.codes
            .find_unexpired(&registered, code, Utc::now())
            .await?
            .ok_or_else(|| ServiceError::CredentialError(INVALID_CODE.to_string()))?;

        let password_hash = hash_password(new_password)?;
        if !self.admins.update_password(&password_hash).await? {
            return Err(ServiceError::NotFound("Admin tidak ditemukan".to_string()));
        }

        // Codes are removed under the address the caller typed, which can
        // differ in case from the stored one.
        let removed = self.codes.delete_for_email(claimed_email).await?;
        tracing::info!(
            "Admin password reset via OTP ({} code(s) removed for {})",
            removed,
            claimed_email
        );

        Ok(ActionResult::done("Password berhasil direset"))
    }
}
