use crate::models::{Admin, ServiceError};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;

/// Access to the single administrator row. There is no listing or lookup by
/// arbitrary id: the account is always `Admin::SINGLETON_ID`.
#[async_trait]
pub trait AdminRepository: Send + Sync {
    async fn get(&self) -> Result<Option<Admin>, ServiceError>;
    async fn find_by_login(&self, username_or_email: &str) -> Result<Option<Admin>, ServiceError>;
    /// Returns `false` when an admin already exists.
    async fn create(&self, admin: &Admin) -> Result<bool, ServiceError>;
    async fn update_profile(&self, email: &str, username: &str) -> Result<Option<Admin>, ServiceError>;
    async fn update_password(&self, password_hash: &str) -> Result<bool, ServiceError>;
}

pub struct SqliteAdminRepository {
    pool: SqlitePool,
}

impl SqliteAdminRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

const ADMIN_COLUMNS: &str = "id, email, username, password_hash, created_at, updated_at";

#[async_trait]
impl AdminRepository for SqliteAdminRepository {
    async fn get(&self) -> Result<Option<Admin>, ServiceError> {
        let admin = sqlx::query_as::<_, Admin>(&format!(
            "SELECT {} FROM admins WHERE id = ?",
            ADMIN_COLUMNS
        ))
        .bind(Admin::SINGLETON_ID)
        .fetch_optional(&self.pool)
        .await?;

        Ok(admin)
    }

    async fn find_by_login(&self, username_or_email: &str) -> Result<Option<Admin>, ServiceError> {
        let admin = sqlx::query_as::<_, Admin>(&format!(
            "SELECT {} FROM admins WHERE id = ? AND (email = ? OR username = ?)",
            ADMIN_COLUMNS
        ))
        .bind(Admin::SINGLETON_ID)
        .bind(username_or_email)
        .bind(username_or_email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(admin)
    }

    async fn create(&self, admin: &Admin) -> Result<bool, ServiceError> {
        let result = sqlx::query(
            "INSERT INTO admins (id, email, username, password_hash, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?)
             ON CONFLICT(id) DO NOTHING",
        )
        .bind(Admin::SINGLETON_ID)
        .bind(&admin.email)
        .bind(&admin.username)
        .bind(&admin.password_hash)
        .bind(admin.created_at)
        .bind(admin.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn update_profile(&self, email: &str, username: &str) -> Result<Option<Admin>, ServiceError> {
        sqlx::query("UPDATE admins SET email = ?, username = ?, updated_at = ? WHERE id = ?")
            .bind(email)
            .bind(username)
            .bind(Utc::now())
            .bind(Admin::SINGLETON_ID)
            .execute(&self.pool)
            .await?;

        self.get().await
    }

    async fn update_password(&self, password_hash: &str) -> Result<bool, ServiceError> {
        let result = sqlx::query("UPDATE admins SET password_hash = ?, updated_at = ? WHERE id = ?")
            .bind(password_hash)
            .bind(Utc::now())
            .bind(Admin::SINGLETON_ID)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() == 1)
    }
}
