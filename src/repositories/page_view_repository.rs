use crate::models::{PageView, ServiceError};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

#[async_trait]
pub trait PageViewRepository: Send + Sync {
    async fn insert(&self, view: &PageView) -> Result<(), ServiceError>;
    /// Exact number of views at or after `since` (all views when `None`).
    async fn count_since(&self, since: Option<DateTime<Utc>>) -> Result<i64, ServiceError>;
    /// Up to `limit` view timestamps at or after `since`, oldest first.
    async fn timestamps_since(
        &self,
        since: Option<DateTime<Utc>>,
        limit: i64,
    ) -> Result<Vec<DateTime<Utc>>, ServiceError>;
}

pub struct SqlitePageViewRepository {
    pool: SqlitePool,
}

impl SqlitePageViewRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PageViewRepository for SqlitePageViewRepository {
    async fn insert(&self, view: &PageView) -> Result<(), ServiceError> {
        sqlx::query(
            "INSERT INTO page_views (hashed_ip, hashed_user_agent, viewed_at) VALUES (?, ?, ?)",
        )
        .bind(&view.hashed_ip)
        .bind(&view.hashed_user_agent)
        .bind(view.viewed_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn count_since(&self, since: Option<DateTime<Utc>>) -> Result<i64, ServiceError> {
        let count = match since {
            Some(since) => {
                sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM page_views WHERE viewed_at >= ?")
                    .bind(since)
                    .fetch_one(&self.pool)
                    .await?
            }
            None => {
                sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM page_views")
                    .fetch_one(&self.pool)
                    .await?
            }
        };

        Ok(count)
    }

    async fn timestamps_since(
        &self,
        since: Option<DateTime<Utc>>,
        limit: i64,
    ) -> Result<Vec<DateTime<Utc>>, ServiceError> {
        let timestamps = match since {
            Some(since) => {
                sqlx::query_scalar::<_, DateTime<Utc>>(
                    "SELECT viewed_at FROM page_views WHERE viewed_at >= ? ORDER BY viewed_at ASC LIMIT ?",
                )
                .bind(since)
                .bind(limit)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_scalar::<_, DateTime<Utc>>(
                    "SELECT viewed_at FROM page_views ORDER BY viewed_at ASC LIMIT ?",
                )
                .bind(limit)
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(timestamps)
    }
}
