use crate::models::{CarouselItem, ServiceError};
use async_trait::async_trait;
use sqlx::SqlitePool;

#[async_trait]
pub trait CarouselRepository: Send + Sync {
    async fn find_active(&self, limit: i64) -> Result<Vec<CarouselItem>, ServiceError>;
    async fn find_all(&self, limit: i64) -> Result<Vec<CarouselItem>, ServiceError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<CarouselItem>, ServiceError>;
    /// Returns the new row id.
    async fn insert(&self, item: &CarouselItem) -> Result<i64, ServiceError>;
    async fn update(&self, item: &CarouselItem) -> Result<(), ServiceError>;
    /// Returns whether a row was removed.
    async fn delete(&self, id: i64) -> Result<bool, ServiceError>;
}

pub struct SqliteCarouselRepository {
    pool: SqlitePool,
}

impl SqliteCarouselRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

const CAROUSEL_COLUMNS: &str = "id, image_url, product_name, price, currency, link, badge, is_active, sort_order, created_at, updated_at";

#[async_trait]
impl CarouselRepository for SqliteCarouselRepository {
    async fn find_active(&self, limit: i64) -> Result<Vec<CarouselItem>, ServiceError> {
        let items = sqlx::query_as::<_, CarouselItem>(&format!(
            "SELECT {} FROM carousel_items WHERE is_active = 1 ORDER BY sort_order ASC, id ASC LIMIT ?",
            CAROUSEL_COLUMNS
        ))
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    async fn find_all(&self, limit: i64) -> Result<Vec<CarouselItem>, ServiceError> {
        let items = sqlx::query_as::<_, CarouselItem>(&format!(
            "SELECT {} FROM carousel_items ORDER BY sort_order ASC, id ASC LIMIT ?",
            CAROUSEL_COLUMNS
        ))
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<CarouselItem>, ServiceError> {
        let item = sqlx::query_as::<_, CarouselItem>(&format!(
            "SELECT {} FROM carousel_items WHERE id = ?",
            CAROUSEL_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(item)
    }

    async fn insert(&self, item: &CarouselItem) -> Result<i64, ServiceError> {
        let result = sqlx::query(
            "INSERT INTO carousel_items
                (image_url, product_name, price, currency, link, badge, is_active, sort_order, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&item.image_url)
        .bind(&item.product_name)
        .bind(item.price)
        .bind(&item.currency)
        .bind(&item.link)
        .bind(&item.badge)
        .bind(item.is_active)
        .bind(item.sort_order)
        .bind(item.created_at)
        .bind(item.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    async fn update(&self, item: &CarouselItem) -> Result<(), ServiceError> {
        sqlx::query(
            "UPDATE carousel_items SET
                image_url = ?, product_name = ?, price = ?, currency = ?, link = ?,
                badge = ?, is_active = ?, sort_order = ?, updated_at = ?
             WHERE id = ?",
        )
        .bind(&item.image_url)
        .bind(&item.product_name)
        .bind(item.price)
        .bind(&item.currency)
        .bind(&item.link)
        .bind(&item.badge)
        .bind(item.is_active)
        .bind(item.sort_order)
        .bind(item.updated_at)
        .bind(item.id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<bool, ServiceError> {
        let result = sqlx::query("DELETE FROM carousel_items WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
