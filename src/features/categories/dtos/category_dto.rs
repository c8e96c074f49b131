use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::categories::models::Category;
use crate::shared::constants::MAX_TITLE_LENGTH;

/// Body for creating or renaming a category
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CategoryRequestDto {
    #[validate(length(max = MAX_TITLE_LENGTH, message = "Title is too long"))]
    #[schema(example = "Cakes")]
    pub title: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategoryResponseDto {
    pub id: i64,
    pub created_at: DateTime<Utc>,
    pub title: String,
}

impl From<Category> for CategoryResponseDto {
    fn from(c: Category) -> Self {
        Self {
            id: c.id,
            created_at: c.created_at,
            title: c.title,
        }
    }
}
