use crate::models::{ServiceError, SettingsEntry, DEFAULT_SETTINGS, FALLBACK_SETTINGS};
use crate::repositories::SettingsRepository;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;

pub type SettingsMap = BTreeMap<String, String>;

pub struct SettingsService {
    repository: Arc<dyn SettingsRepository>,
}

fn to_map(entries: Vec<SettingsEntry>) -> SettingsMap {
    entries.into_iter().map(|e| (e.key, e.value)).collect()
}

impl SettingsService {
    pub fn new(repository: Arc<dyn SettingsRepository>) -> Self {
        Self { repository }
    }

    pub async fn get_all(&self) -> Result<SettingsMap, ServiceError> {
        Ok(to_map(self.repository.find_all().await?))
    }

    /// All settings, or the storefront contact defaults when the store cannot
    /// be read.
    pub async fn get_public(&self) -> SettingsMap {
        match self.get_all().await {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!("Serving fallback settings: {}", e);
                FALLBACK_SETTINGS
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect()
            }
        }
    }

    pub async fn find_by_key(&self, key: &str) -> Result<Option<SettingsEntry>, ServiceError> {
        self.repository.find_by_key(key).await
    }

    /// Upserts every pair. Strings are stored as is, other JSON values in
    /// their JSON text form.
    pub async fn update_many(
        &self,
        updates: &serde_json::Map<String, Value>,
    ) -> Result<SettingsMap, ServiceError> {
        if updates.is_empty() {
            return Err(ServiceError::ValidationError(
                "No settings provided".to_string(),
            ));
        }

        for (key, value) in updates {
            if key.trim().is_empty() {
                return Err(ServiceError::ValidationError(
                    "Setting keys must not be empty".to_string(),
                ));
            }
            let value = match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            self.repository.upsert(key, &value).await?;
        }

        tracing::info!("Updated {} setting(s)", updates.len());
        self.get_all().await
    }

    /// Inserts the storefront defaults for keys that are not set yet.
    pub async fn initialize_defaults(&self) -> Result<SettingsMap, ServiceError> {
        let mut inserted = 0;
        for (key, value) in DEFAULT_SETTINGS {
            if self.repository.insert_if_missing(key, value).await? {
                inserted += 1;
            }
        }

        tracing::info!("Initialized {} default setting(s)", inserted);
        self.get_all().await
    }
}
