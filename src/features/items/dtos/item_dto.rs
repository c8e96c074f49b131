use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::items::models::Item;
use crate::shared::constants::MAX_TITLE_LENGTH;
use crate::shared::validation::validate_image_path;

/// Body for creating or updating an item
///
/// Omitted optional fields are written as their defaults: `""` for text, `0` for price.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct ItemRequestDto {
    #[validate(length(max = MAX_TITLE_LENGTH, message = "Title is too long"))]
    #[schema(example = "Cheesecake")]
    pub title: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    #[schema(value_type = Option<f64>, example = 85)]
    pub price: Option<Decimal>,

    #[serde(default)]
    #[validate(custom(function = "validate_image_path"))]
    #[schema(example = "/images/cakes/cheesecake.jpg")]
    pub image_path: Option<String>,

    /// Id of the owning category, must be non-zero
    #[serde(default)]
    pub category: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ItemResponseDto {
    pub id: i64,
    pub created_at: DateTime<Utc>,
    pub title: String,
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub price: Decimal,
    pub image_path: String,
    pub category: i64,
}

impl From<Item> for ItemResponseDto {
    fn from(item: Item) -> Self {
        Self {
            id: item.id,
            created_at: item.created_at,
            title: item.title,
            description: item.description,
            price: item.price,
            image_path: item.image_path,
            category: item.category,
        }
    }
}
