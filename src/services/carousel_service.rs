use crate::models::{CarouselItem, CarouselItemForm, ServiceError};
use crate::repositories::CarouselRepository;
use std::sync::Arc;

pub const PUBLIC_LIST_LIMIT: i64 = 50;
pub const ADMIN_LIST_LIMIT: i64 = 100;

pub struct CarouselService {
    repository: Arc<dyn CarouselRepository>,
}

impl CarouselService {
    pub fn new(repository: Arc<dyn CarouselRepository>) -> Self {
        Self { repository }
    }

    /// Active items for the landing page; empty when the store is unavailable.
    pub async fn get_active_items(&self) -> Vec<CarouselItem> {
        match self.repository.find_active(PUBLIC_LIST_LIMIT).await {
            Ok(items) => items,
            Err(e) => {
                tracing::warn!("Serving empty carousel: {}", e);
                Vec::new()
            }
        }
    }

    pub async fn get_all_items(&self) -> Result<Vec<CarouselItem>, ServiceError> {
        self.repository.find_all(ADMIN_LIST_LIMIT).await
    }

    pub async fn create_item(&self, form: CarouselItemForm) -> Result<CarouselItem, ServiceError> {
        let mut item = form.into_new_item().map_err(ServiceError::ValidationError)?;

        item.id = self.repository.insert(&item).await?;

        tracing::info!("Created carousel item {} ({})", item.id, item.product_name);
        Ok(item)
    }

    pub async fn update_item(
        &self,
        id: i64,
        form: CarouselItemForm,
    ) -> Result<CarouselItem, ServiceError> {
        let mut item = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Item not found".to_string()))?;

        form.apply_to(&mut item).map_err(ServiceError::ValidationError)?;
        self.repository.update(&item).await?;

        tracing::info!("Updated carousel item {}", id);
        Ok(item)
    }

    pub async fn delete_item(&self, id: i64) -> Result<(), ServiceError> {
        if !self.repository.delete(id).await? {
            return Err(ServiceError::NotFound("Item not found".to_string()));
        }

        tracing::info!("Deleted carousel item {}", id);
        Ok(())
    }
}
