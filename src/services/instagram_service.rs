use crate::models::{InstagramPost, InstagramPostForm, ServiceError};
use crate::repositories::InstagramRepository;
use crate::services::carousel_service::{ADMIN_LIST_LIMIT, PUBLIC_LIST_LIMIT};
use std::sync::Arc;

pub struct InstagramService {
    repository: Arc<dyn InstagramRepository>,
}

impl InstagramService {
    pub fn new(repository: Arc<dyn InstagramRepository>) -> Self {
        Self { repository }
    }

    pub async fn get_active_posts(&self) -> Vec<InstagramPost> {
        match self.repository.find_active(PUBLIC_LIST_LIMIT).await {
            Ok(posts) => posts,
            Err(e) => {
                tracing::warn!("Serving empty Instagram feed: {}", e);
                Vec::new()
            }
        }
    }

    pub async fn get_all_posts(&self) -> Result<Vec<InstagramPost>, ServiceError> {
        self.repository.find_all(ADMIN_LIST_LIMIT).await
    }

    pub async fn create_post(&self, form: InstagramPostForm) -> Result<InstagramPost, ServiceError> {
        let mut post = form.into_new_post().map_err(ServiceError::ValidationError)?;

        post.id = self.repository.insert(&post).await?;

        tracing::info!("Created Instagram post {}", post.id);
        Ok(post)
    }

    pub async fn update_post(
        &self,
        id: i64,
        form: InstagramPostForm,
    ) -> Result<InstagramPost, ServiceError> {
        let mut post = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Post not found".to_string()))?;

        form.apply_to(&mut post);
        self.repository.update(&post).await?;

        tracing::info!("Updated Instagram post {}", id);
        Ok(post)
    }

    pub async fn delete_post(&self, id: i64) -> Result<(), ServiceError> {
        if !self.repository.delete(id).await? {
            return Err(ServiceError::NotFound("Post not found".to_string()));
        }

        tracing::info!("Deleted Instagram post {}", id);
        Ok(())
    }
}
