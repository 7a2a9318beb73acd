use crate::config::MediaConfig;
use crate::models::{ServiceError, UploadedImage};
use async_trait::async_trait;
use chrono::Utc;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use sha2::{Digest, Sha256};
use std::sync::Arc;

pub const ALLOWED_IMAGE_TYPES: &[&str] = &["image/jpeg", "image/png", "image/webp", "image/gif"];
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;
pub const DEFAULT_FOLDER: &str = "gudang-pancing";

/// Resize to fit 1200x1200, automatic quality and format.
const UPLOAD_TRANSFORMATION: &str = "c_limit,h_1200,w_1200/q_auto/f_auto";

/// Hosted image store
#[async_trait]
pub trait MediaStorage: Send + Sync {
    async fn upload(
        &self,
        bytes: Vec<u8>,
        file_name: &str,
        content_type: &str,
        folder: &str,
    ) -> Result<UploadedImage, ServiceError>;
    async fn destroy(&self, public_id: &str) -> Result<(), ServiceError>;
}

pub struct CloudinaryStorage {
    client: reqwest::Client,
    config: MediaConfig,
}

impl CloudinaryStorage {
    pub fn new(config: MediaConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    fn endpoint(&self, action: &str) -> String {
        format!(
            "https://api.cloudinary.com/v1_1/{}/image/{}",
            self.config.cloud_name, action
        )
    }
}

/// Cloudinary request signature: parameters sorted by name, joined as
/// `k=v&k=v`, followed by the API secret, SHA-256 hex encoded.
pub fn sign_params(params: &[(&str, &str)], api_secret: &str) -> String {
    let mut sorted = params.to_vec();
    sorted.sort_by(|a, b| a.0.cmp(b.0));

    let joined = sorted
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&");

    let mut hasher = Sha256::new();
    hasher.update(joined.as_bytes());
    hasher.update(api_secret.as_bytes());
    hex::encode(hasher.finalize())
}

#[derive(Deserialize)]
struct UploadResponse {
    secure_url: String,
    public_id: String,
}

#[async_trait]
impl MediaStorage for CloudinaryStorage {
    async fn upload(
        &self,
        bytes: Vec<u8>,
        file_name: &str,
        content_type: &str,
        folder: &str,
    ) -> Result<UploadedImage, ServiceError> {
        let timestamp = Utc::now().timestamp().to_string();
        let signature = sign_params(
            &[
                ("folder", folder),
                ("timestamp", timestamp.as_str()),
                ("transformation", UPLOAD_TRANSFORMATION),
            ],
            &self.config.api_secret,
        );

        let file = Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str(content_type)?;
        let form = Form::new()
            .part("file", file)
            .text("api_key", self.config.api_key.clone())
            .text("timestamp", timestamp)
            .text("folder", folder.to_string())
            .text("transformation", UPLOAD_TRANSFORMATION)
            .text("signature", signature)
            .text("signature_algorithm", "sha256");

        let response = self
            .client
            .post(self.endpoint("upload"))
            .multipart(form)
            .send()
            .await?
            .error_for_status()?;

        let body: UploadResponse = response.json().await?;
        Ok(UploadedImage {
            image_url: body.secure_url,
            public_id: body.public_id,
        })
    }

    async fn destroy(&self, public_id: &str) -> Result<(), ServiceError> {
        let timestamp = Utc::now().timestamp().to_string();
        let signature = sign_params(
            &[("public_id", public_id), ("timestamp", timestamp.as_str())],
            &self.config.api_secret,
        );

        self.client
            .post(self.endpoint("destroy"))
            .form(&[
                ("public_id", public_id),
                ("api_key", self.config.api_key.as_str()),
                ("timestamp", timestamp.as_str()),
                ("signature", signature.as_str()),
                ("signature_algorithm", "sha256"),
            ])
            .send()
            .await?
            .error_for_status()?;

        Ok(())
    }
}

pub struct UploadService {
    storage: Option<Arc<dyn MediaStorage>>,
}

impl UploadService {
    pub fn new(storage: Option<Arc<dyn MediaStorage>>) -> Self {
        if storage.is_none() {
            tracing::warn!("Cloudinary not configured, image uploads are disabled");
        }
        Self { storage }
    }

    pub fn from_config(config: Option<&MediaConfig>) -> Self {
        let storage = config.map(|config| {
            Arc::new(CloudinaryStorage::new(config.clone())) as Arc<dyn MediaStorage>
        });
        Self::new(storage)
    }

    fn storage(&self) -> Result<&Arc<dyn MediaStorage>, ServiceError> {
        self.storage
            .as_ref()
            .ok_or_else(|| ServiceError::UpstreamError("Cloudinary is not configured".to_string()))
    }

    pub async fn upload_image(
        &self,
        bytes: Vec<u8>,
        file_name: &str,
        content_type: &str,
        folder: Option<&str>,
    ) -> Result<UploadedImage, ServiceError> {
        if !ALLOWED_IMAGE_TYPES.contains(&content_type) {
            return Err(ServiceError::ValidationError(
                "Invalid file type. Allowed: JPEG, PNG, WebP, GIF".to_string(),
            ));
        }
        if bytes.len() > MAX_IMAGE_BYTES {
            return Err(ServiceError::ValidationError(
                "File too large. Maximum 5MB".to_string(),
            ));
        }

        let folder = folder
            .filter(|f| !f.trim().is_empty())
            .unwrap_or(DEFAULT_FOLDER);
        let image = self
            .storage()?
            .upload(bytes, file_name, content_type, folder)
            .await?;

        tracing::info!("Uploaded image {} to folder {}", image.public_id, folder);
        Ok(image)
    }

    pub async fn delete_image(&self, public_id: &str) -> Result<(), ServiceError> {
        self.storage()?.destroy(public_id).await?;

        tracing::info!("Deleted image {}", public_id);
        Ok(())
    }
}
