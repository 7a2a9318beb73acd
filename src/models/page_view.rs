use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::utils::hash::hash_text;

/// One recorded visit. Rows are append-only.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PageView {
    pub id: i64,
    pub hashed_ip: String,
    pub hashed_user_agent: String,
    pub viewed_at: DateTime<Utc>,
}

impl PageView {
    /// Substituted for a missing user agent before hashing.
    pub const UNKNOWN_AGENT: &'static str = "unknown";

    pub fn new(address: &str, user_agent: Option<&str>, viewed_at: DateTime<Utc>) -> Self {
        Self {
            id: 0, // Will be set by database on insert
            hashed_ip: hash_text(address),
            hashed_user_agent: hash_text(user_agent.unwrap_or(Self::UNKNOWN_AGENT)),
            viewed_at,
        }
    }
}

/// Result of a tracking call
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TrackResult {
    pub tracked: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl TrackResult {
    pub fn tracked() -> Self {
        Self {
            tracked: true,
            reason: None,
        }
    }

    pub fn skipped(reason: &str) -> Self {
        Self {
            tracked: false,
            reason: Some(reason.to_string()),
        }
    }
}
