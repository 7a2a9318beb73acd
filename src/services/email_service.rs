use crate::config::EmailConfig;
use crate::models::{ServiceError, OTP_VALIDITY_MINUTES};
use askama::Template;
use async_trait::async_trait;
use chrono::{Datelike, Utc};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

const RESEND_ENDPOINT: &str = "https://api.resend.com/emails";
const OTP_SUBJECT: &str = "Kode OTP Reset Password - Gudang Pancing";

/// Outbound mail transport. Returns the provider's message id.
#[async_trait]
pub trait EmailSender: Send + Sync {
    async fn send(&self, to: &str, subject: &str, html: &str) -> Result<String, ServiceError>;
}

pub struct ResendEmailSender {
    client: reqwest::Client,
    api_key: String,
    from: String,
}

impl ResendEmailSender {
    pub fn new(api_key: String, from: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            from,
        }
    }
}

#[derive(Deserialize)]
struct ResendResponse {
    id: String,
}

#[async_trait]
impl EmailSender for ResendEmailSender {
    async fn send(&self, to: &str, subject: &str, html: &str) -> Result<String, ServiceError> {
        let response = self
            .client
            .post(RESEND_ENDPOINT)
            .bearer_auth(&self.api_key)
            .json(&json!({
                "from": self.from,
                "to": [to],
                "subject": subject,
                "html": html,
            }))
            .send()
            .await?
            .error_for_status()?;

        let body: ResendResponse = response.json().await?;
        Ok(body.id)
    }
}

#[derive(Template)]
#[template(path = "otp_email.html")]
struct OtpEmail<'a> {
    store_name: &'a str,
    username: &'a str,
    code: &'a str,
    valid_minutes: i64,
    year: i32,
}

/// What happened to a reset code handed to the email service
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmailDelivery {
    Sent { id: String },
    /// No transport configured; the code was only written to the log.
    Unconfigured { code: String },
    Failed { error: String },
}

pub struct EmailService {
    sender: Option<Arc<dyn EmailSender>>,
}

impl EmailService {
    pub fn new(sender: Option<Arc<dyn EmailSender>>) -> Self {
        if sender.is_none() {
            tracing::warn!("Email service not configured, reset codes will only be logged");
        }
        Self { sender }
    }

    pub fn from_config(config: &EmailConfig) -> Self {
        let sender = config.api_key.as_ref().map(|api_key| {
            Arc::new(ResendEmailSender::new(api_key.clone(), config.sender.clone()))
                as Arc<dyn EmailSender>
        });
        Self::new(sender)
    }

    pub async fn send_otp(
        &self,
        to: &str,
        username: &str,
        code: &str,
        store_name: &str,
    ) -> EmailDelivery {
        let Some(sender) = &self.sender else {
            tracing::warn!("Email service not configured. OTP for {}: {}", to, code);
            return EmailDelivery::Unconfigured {
                code: code.to_string(),
            };
        };

        let html = match (OtpEmail {
            store_name,
            username,
            code,
            valid_minutes: OTP_VALIDITY_MINUTES,
            year: Utc::now().year(),
        })
        .render()
        {
            Ok(html) => html,
            Err(e) => {
                tracing::error!("Failed to render OTP email: {}", e);
                return EmailDelivery::Failed {
                    error: e.to_string(),
                };
            }
        };

        match sender.send(to, OTP_SUBJECT, &html).await {
            Ok(id) => {
                tracing::info!("OTP email sent to {} (id {})", to, id);
                EmailDelivery::Sent { id }
            }
            Err(e) => {
                tracing::error!("Failed to send OTP email to {}: {}", to, e);
                EmailDelivery::Failed {
                    error: e.to_string(),
                }
            }
        }
    }
}
