use crate::models::{OneTimeCode, ServiceError};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

#[async_trait]
pub trait OtpRepository: Send + Sync {
    /// Store `otp` as the only code for its email, replacing any earlier one
    /// in a single statement.
    async fn replace_for_email(&self, otp: &OneTimeCode) -> Result<(), ServiceError>;
    /// Unexpired code that has not been verified yet.
    async fn find_unused(
        &self,
        email: &str,
        code: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<OneTimeCode>, ServiceError>;
    /// Unexpired code whether or not it was verified.
    async fn find_unexpired(
        &self,
        email: &str,
        code: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<OneTimeCode>, ServiceError>;
    async fn mark_used(&self, id: i64) -> Result<(), ServiceError>;
    async fn delete_for_email(&self, email: &str) -> Result<u64, ServiceError>;
}

pub struct SqliteOtpRepository {
    pool: SqlitePool,
}

impl SqliteOtpRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

const OTP_COLUMNS: &str = "id, email, code, expires_at, used, created_at";

#[async_trait]
impl OtpRepository for SqliteOtpRepository {
    async fn replace_for_email(&self, otp: &OneTimeCode) -> Result<(), ServiceError> {
        sqlx::query(
            "INSERT INTO otp_codes (email, code, expires_at, used, created_at) VALUES (?, ?, ?, ?, ?)
             ON CONFLICT(email) DO UPDATE SET
                 code = excluded.code,
                 expires_at = excluded.expires_at,
                 used = excluded.used,
                 created_at = excluded.created_at",
        )
        .bind(&otp.email)
        .bind(&otp.code)
        .bind(otp.expires_at)
        .bind(otp.used)
        .bind(otp.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_unused(
        &self,
        email: &str,
        code: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<OneTimeCode>, ServiceError> {
        let otp = sqlx::query_as::<_, OneTimeCode>(&format!(
            "SELECT {} FROM otp_codes WHERE email = ? AND code = ? AND used = 0 AND expires_at > ?",
            OTP_COLUMNS
        ))
        .bind(email)
        .bind(code)
        .bind(now)
        .fetch_optional(&self.pool)
        .await?;

        Ok(otp)
    }

    async fn find_unexpired(
        &self,
        email: &str,
        code: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<OneTimeCode>, ServiceError> {
        let otp = sqlx::query_as::<_, OneTimeCode>(&format!(
            "SELECT {} FROM otp_codes WHERE email = ? AND code = ? AND expires_at > ?",
            OTP_COLUMNS
        ))
        .bind(email)
        .bind(code)
        .bind(now)
        .fetch_optional(&self.pool)
        .await?;

        Ok(otp)
    }

    async fn mark_used(&self, id: i64) -> Result<(), ServiceError> {
        sqlx::query("UPDATE otp_codes SET used = 1 WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn delete_for_email(&self, email: &str) -> Result<u64, ServiceError> {
        let result = sqlx::query("DELETE FROM otp_codes WHERE email = ?")
            .bind(email)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
