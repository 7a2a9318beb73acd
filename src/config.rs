use anyhow::{bail, Context};
use std::net::SocketAddr;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub bind_address: SocketAddr,
    pub environment: String,
    pub jwt_secret: String,
    pub email: EmailConfig,
    pub media: Option<MediaConfig>,
    pub rate_limit: RateLimitConfig,
    pub bootstrap_admin: Option<BootstrapAdmin>,
}

/// Resend credentials. Without an API key the email service runs unconfigured.
#[derive(Debug, Clone)]
pub struct EmailConfig {
    pub api_key: Option<String>,
    pub sender: String,
}

/// Cloudinary account used for image uploads
#[derive(Debug, Clone)]
pub struct MediaConfig {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
}

#[derive(Debug, Clone, Copy)]
pub struct RateLimitConfig {
    pub max_requests: u32,
    pub window: Duration,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: 100,
            window: Duration::from_secs(15 * 60),
        }
    }
}

/// Admin account created on first start when the database has none.
#[derive(Debug, Clone)]
pub struct BootstrapAdmin {
    pub email: String,
    pub username: String,
    pub password: String,
}

pub const DEFAULT_SENDER: &str = "GudangPancing <onboarding@resend.dev>";

fn var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let host = var("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = match var("PORT") {
            Some(port) => port.parse::<u16>().context("PORT must be a port number")?,
            None => 8001,
        };
        let bind_address = format!("{}:{}", host, port)
            .parse()
            .context("Invalid bind address")?;

        let database_url =
            var("DATABASE_URL").unwrap_or_else(|| "sqlite:storefront.db?mode=rwc".to_string());

        let environment = var("APP_ENV").unwrap_or_else(|| "development".to_string());

        let jwt_secret = match var("JWT_SECRET") {
            Some(secret) => secret,
            None if environment == "production" => {
                bail!("JWT_SECRET must be set when APP_ENV=production")
            }
            None => {
                use base64::Engine;
                use rand::Rng;
                let bytes: [u8; 32] = rand::thread_rng().gen();
                tracing::warn!("JWT_SECRET not set, tokens will not survive a restart");
                base64::engine::general_purpose::STANDARD.encode(bytes)
            }
        };

        let email = EmailConfig {
            api_key: var("RESEND_API_KEY"),
            sender: var("SENDER_EMAIL").unwrap_or_else(|| DEFAULT_SENDER.to_string()),
        };

        let media = match (
            var("CLOUDINARY_CLOUD_NAME"),
            var("CLOUDINARY_API_KEY"),
            var("CLOUDINARY_API_SECRET"),
        ) {
            (Some(cloud_name), Some(api_key), Some(api_secret)) => Some(MediaConfig {
                cloud_name,
                api_key,
                api_secret,
            }),
            _ => None,
        };

        let defaults = RateLimitConfig::default();
        let rate_limit = RateLimitConfig {
            max_requests: match var("RATE_LIMIT_MAX") {
                Some(max) => max.parse().context("RATE_LIMIT_MAX must be a number")?,
                None => defaults.max_requests,
            },
            window: match var("RATE_LIMIT_WINDOW_SECS") {
                Some(secs) => Duration::from_secs(
                    secs.parse().context("RATE_LIMIT_WINDOW_SECS must be a number")?,
                ),
                None => defaults.window,
            },
        };

        let bootstrap_admin = var("ADMIN_PASSWORD").map(|password| BootstrapAdmin {
            email: var("ADMIN_EMAIL").unwrap_or_else(|| "admin@localhost".to_string()),
            username: var("ADMIN_USERNAME").unwrap_or_else(|| "admin".to_string()),
            password,
        });

        Ok(Self {
            database_url,
            bind_address,
            environment,
            jwt_secret,
            email,
            media,
            rate_limit,
            bootstrap_admin,
        })
    }
}
