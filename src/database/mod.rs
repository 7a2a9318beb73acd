use anyhow::{Context, Result};
use sqlx::{migrate::MigrateDatabase, sqlite::SqlitePoolOptions, Sqlite, SqlitePool};

use crate::config::BootstrapAdmin;
use crate::models::{Admin, SettingsEntry};
use crate::repositories::{
    AdminRepository, SettingsRepository, SqliteAdminRepository, SqliteSettingsRepository,
};
use crate::utils::password::hash_password;

pub async fn initialize_database(database_url: &str) -> Result<SqlitePool> {
    // Create database file if it doesn't exist
    if !Sqlite::database_exists(database_url).await.unwrap_or(false) {
        Sqlite::create_database(database_url)
            .await
            .with_context(|| format!("Failed to create database {}", database_url))?;
        tracing::info!("Created database file");
    }

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await
        .with_context(|| format!("Failed to connect to {}", database_url))?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    tracing::info!("Database initialized successfully");
    Ok(pool)
}

/// Creates the admin account from the environment on first start and points
/// the `admin_email` setting at it when that setting is not set yet.
pub async fn bootstrap_admin(pool: &SqlitePool, bootstrap: Option<&BootstrapAdmin>) -> Result<()> {
    let admins = SqliteAdminRepository::new(pool.clone());
    if admins.get().await?.is_some() {
        return Ok(());
    }

    let Some(bootstrap) = bootstrap else {
        tracing::warn!("No admin account yet; set ADMIN_PASSWORD or call /api/auth/register");
        return Ok(());
    };

    let password_hash = hash_password(&bootstrap.password)?;
    let admin = Admin::new(
        bootstrap.email.clone(),
        bootstrap.username.clone(),
        password_hash,
    );
    if admins.create(&admin).await? {
        tracing::info!("Created admin account {}", admin.username);
    }

    let settings = SqliteSettingsRepository::new(pool.clone());
    if settings
        .insert_if_missing(SettingsEntry::ADMIN_EMAIL, &bootstrap.email)
        .await?
    {
        tracing::info!("Set {} to {}", SettingsEntry::ADMIN_EMAIL, bootstrap.email);
    }

    Ok(())
}
