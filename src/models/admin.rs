use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

/// Database entity for the single administrator account
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Admin {
    pub id: i64,
    pub email: String,
    pub username: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Admin {
    /// Primary key of the only admin row the schema accepts.
    pub const SINGLETON_ID: i64 = 1;

    pub fn new(email: String, username: String, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id: Self::SINGLETON_ID,
            email,
            username,
            password_hash,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn profile(&self) -> AdminProfile {
        AdminProfile {
            id: self.id.to_string(),
            email: self.email.clone(),
            username: self.username.clone(),
            created_at: self.created_at,
        }
    }
}

/// Public view of the admin account (never carries the password hash)
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminProfile {
    pub id: String,
    pub email: String,
    pub username: String,
    pub created_at: DateTime<Utc>,
}
