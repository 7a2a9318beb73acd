use crate::models::{InstagramPost, ServiceError};
use async_trait::async_trait;
use sqlx::SqlitePool;

#[async_trait]
pub trait InstagramRepository: Send + Sync {
    async fn find_active(&self, limit: i64) -> Result<Vec<InstagramPost>, ServiceError>;
    async fn find_all(&self, limit: i64) -> Result<Vec<InstagramPost>, ServiceError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<InstagramPost>, ServiceError>;
    async fn insert(&self, post: &InstagramPost) -> Result<i64, ServiceError>;
    async fn update(&self, post: &InstagramPost) -> Result<(), ServiceError>;
    async fn delete(&self, id: i64) -> Result<bool, ServiceError>;
}

pub struct SqliteInstagramRepository {
    pool: SqlitePool,
}

impl SqliteInstagramRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

const POST_COLUMNS: &str =
    "id, image_url, post_url, caption, is_active, sort_order, created_at, updated_at";

#[async_trait]
impl InstagramRepository for SqliteInstagramRepository {
    async fn find_active(&self, limit: i64) -> Result<Vec<InstagramPost>, ServiceError> {
        let posts = sqlx::query_as::<_, InstagramPost>(&format!(
            "SELECT {} FROM instagram_posts WHERE is_active = 1 ORDER BY sort_order ASC, id ASC LIMIT ?",
            POST_COLUMNS
        ))
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(posts)
    }

    async fn find_all(&self, limit: i64) -> Result<Vec<InstagramPost>, ServiceError> {
        let posts = sqlx::query_as::<_, InstagramPost>(&format!(
            "SELECT {} FROM instagram_posts ORDER BY sort_order ASC, id ASC LIMIT ?",
            POST_COLUMNS
        ))
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(posts)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<InstagramPost>, ServiceError> {
        let post = sqlx::query_as::<_, InstagramPost>(&format!(
            "SELECT {} FROM instagram_posts WHERE id = ?",
            POST_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(post)
    }

    async fn insert(&self, post: &InstagramPost) -> Result<i64, ServiceError> {
        let result = sqlx::query(
            "INSERT INTO instagram_posts
                (image_url, post_url, caption, is_active, sort_order, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&post.image_url)
        .bind(&post.post_url)
        .bind(&post.caption)
        .bind(post.is_active)
        .bind(post.sort_order)
        .bind(post.created_at)
        .bind(post.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    async fn update(&self, post: &InstagramPost) -> Result<(), ServiceError> {
        sqlx::query(
            "UPDATE instagram_posts SET
                image_url = ?, post_url = ?, caption = ?, is_active = ?, sort_order = ?, updated_at = ?
             WHERE id = ?",
        )
        .bind(&post.image_url)
        .bind(&post.post_url)
        .bind(&post.caption)
        .bind(post.is_active)
        .bind(post.sort_order)
        .bind(post.updated_at)
        .bind(post.id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<bool, ServiceError> {
        let result = sqlx::query("DELETE FROM instagram_posts WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
