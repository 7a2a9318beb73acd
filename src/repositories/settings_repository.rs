use crate::models::{ServiceError, SettingsEntry};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;

#[async_trait]
pub trait SettingsRepository: Send + Sync {
    async fn find_by_key(&self, key: &str) -> Result<Option<SettingsEntry>, ServiceError>;
    async fn find_all(&self) -> Result<Vec<SettingsEntry>, ServiceError>;
    async fn upsert(&self, key: &str, value: &str) -> Result<(), ServiceError>;
    /// Inserts only when `key` is absent. Returns whether a row was written.
    async fn insert_if_missing(&self, key: &str, value: &str) -> Result<bool, ServiceError>;
}

pub struct SqliteSettingsRepository {
    pool: SqlitePool,
}

impl SqliteSettingsRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SettingsRepository for SqliteSettingsRepository {
    async fn find_by_key(&self, key: &str) -> Result<Option<SettingsEntry>, ServiceError> {
        let entry = sqlx::query_as::<_, SettingsEntry>(
            "SELECT id, key, value, created_at, updated_at FROM site_settings WHERE key = ?",
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await?;

        Ok(entry)
    }

    async fn find_all(&self) -> Result<Vec<SettingsEntry>, ServiceError> {
        let entries = sqlx::query_as::<_, SettingsEntry>(
            "SELECT id, key, value, created_at, updated_at FROM site_settings ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }

    async fn upsert(&self, key: &str, value: &str) -> Result<(), ServiceError> {
        let now = Utc::now();
        sqlx::query(
            "INSERT INTO site_settings (key, value, created_at, updated_at) VALUES (?, ?, ?, ?)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
        )
        .bind(key)
        .bind(value)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn insert_if_missing(&self, key: &str, value: &str) -> Result<bool, ServiceError> {
        let now = Utc::now();
        let result = sqlx::query(
            "INSERT INTO site_settings (key, value, created_at, updated_at) VALUES (?, ?, ?, ?)
             ON CONFLICT(key) DO NOTHING",
        )
        .bind(key)
        .bind(value)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }
}
