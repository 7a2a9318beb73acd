use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Product card shown in the landing page carousel
#[derive(Debug, Clone, sqlx::FromRow, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CarouselItem {
    pub id: i64,
    pub image_url: String,
    pub product_name: String,
    pub price: f64,
    pub currency: String,
    pub link: String,
    pub badge: Option<String>,
    pub is_active: bool,
    pub sort_order: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub const DEFAULT_CURRENCY: &str = "IDR";

/// Prices arrive either as JSON numbers or as numeric strings from form inputs.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum PriceInput {
    Number(f64),
    Text(String),
}

impl PriceInput {
    pub fn parse(&self) -> Result<f64, String> {
        let value = match self {
            PriceInput::Number(n) => *n,
            PriceInput::Text(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| "price must be a number".to_string())?,
        };

        if !value.is_finite() || value < 0.0 {
            return Err("price must be a non-negative number".to_string());
        }
        Ok(value)
    }

    fn is_blank(&self) -> bool {
        match self {
            PriceInput::Number(n) => *n == 0.0,
            PriceInput::Text(s) => s.trim().is_empty(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CarouselItemForm {
    pub image_url: Option<String>,
    pub product_name: Option<String>,
    pub price: Option<PriceInput>,
    pub currency: Option<String>,
    pub link: Option<String>,
    pub badge: Option<String>,
    pub is_active: Option<bool>,
    pub sort_order: Option<i64>,
}

fn filled(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.trim().is_empty())
}

impl CarouselItemForm {
    /// Build a new item; image, name, price and link are mandatory.
    pub fn into_new_item(self) -> Result<CarouselItem, String> {
        const REQUIRED: &str = "imageUrl, productName, price, and link are required";

        let (Some(image_url), Some(product_name), Some(link)) = (
            filled(&self.image_url),
            filled(&self.product_name),
            filled(&self.link),
        ) else {
            return Err(REQUIRED.to_string());
        };
        let price = match &self.price {
            Some(price) if !price.is_blank() => price.parse()?,
            _ => return Err(REQUIRED.to_string()),
        };

        let now = Utc::now();
        Ok(CarouselItem {
            id: 0, // Will be set by database on insert
            image_url: image_url.to_string(),
            product_name: product_name.to_string(),
            price,
            currency: filled(&self.currency).unwrap_or(DEFAULT_CURRENCY).to_string(),
            link: link.to_string(),
            badge: self.badge,
            is_active: self.is_active.unwrap_or(true),
            sort_order: self.sort_order.unwrap_or(0),
            created_at: now,
            updated_at: now,
        })
    }

    /// Overwrite only the fields present in the form.
    pub fn apply_to(self, item: &mut CarouselItem) -> Result<(), String> {
        if let Some(image_url) = self.image_url {
            item.image_url = image_url;
        }
        if let Some(product_name) = self.product_name {
            item.product_name = product_name;
        }
        if let Some(price) = self.price {
            item.price = price.parse()?;
        }
        if let Some(currency) = self.currency {
            item.currency = currency;
        }
        if let Some(link) = self.link {
            item.link = link;
        }
        if self.badge.is_some() {
            item.badge = self.badge;
        }
        if let Some(is_active) = self.is_active {
            item.is_active = is_active;
        }
        if let Some(sort_order) = self.sort_order {
            item.sort_order = sort_order;
        }
        item.updated_at = Utc::now();
        Ok(())
    }
}
