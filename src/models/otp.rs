use chrono::{DateTime, Duration, Utc};
use rand::Rng;

/// How long an issued reset code stays valid.
pub const OTP_VALIDITY_MINUTES: i64 = 10;

/// Stored password reset code
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct OneTimeCode {
    pub id: i64,
    pub email: String,
    pub code: String,
    pub expires_at: DateTime<Utc>,
    pub used: bool,
    pub created_at: DateTime<Utc>,
}

impl OneTimeCode {
    /// Fresh code for `email`, expiring `OTP_VALIDITY_MINUTES` after `now`.
    pub fn issue(email: &str, now: DateTime<Utc>) -> Self {
        Self {
            id: 0, // Will be set by database on insert
            email: email.to_string(),
            code: generate_code(),
            expires_at: now + Duration::minutes(OTP_VALIDITY_MINUTES),
            used: false,
            created_at: now,
        }
    }
}

/// Six decimal digits, uniform over 100000..=999999 (never a leading zero).
pub fn generate_code() -> String {
    rand::thread_rng().gen_range(100_000..=999_999u32).to_string()
}
