use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Mirrored Instagram post linked from the landing page
#[derive(Debug, Clone, sqlx::FromRow, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InstagramPost {
    pub id: i64,
    pub image_url: String,
    pub post_url: String,
    pub caption: Option<String>,
    pub is_active: bool,
    pub sort_order: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InstagramPostForm {
    pub image_url: Option<String>,
    pub post_url: Option<String>,
    pub caption: Option<String>,
    pub is_active: Option<bool>,
    pub sort_order: Option<i64>,
}

impl InstagramPostForm {
    pub fn into_new_post(self) -> Result<InstagramPost, String> {
        let image_url = self.image_url.filter(|s| !s.trim().is_empty());
        let post_url = self.post_url.filter(|s| !s.trim().is_empty());
        let (Some(image_url), Some(post_url)) = (image_url, post_url) else {
            return Err("imageUrl and postUrl are required".to_string());
        };

        let now = Utc::now();
        Ok(InstagramPost {
            id: 0, // Will be set by database on insert
            image_url,
            post_url,
            caption: self.caption,
            is_active: self.is_active.unwrap_or(true),
            sort_order: self.sort_order.unwrap_or(0),
            created_at: now,
            updated_at: now,
        })
    }

    pub fn apply_to(self, post: &mut InstagramPost) {
        if let Some(image_url) = self.image_url {
            post.image_url = image_url;
        }
        if let Some(post_url) = self.post_url {
            post.post_url = post_url;
        }
        if self.caption.is_some() {
            post.caption = self.caption;
        }
        if let Some(is_active) = self.is_active {
            post.is_active = is_active;
        }
        if let Some(sort_order) = self.sort_order {
            post.sort_order = sort_order;
        }
        post.updated_at = Utc::now();
    }
}
