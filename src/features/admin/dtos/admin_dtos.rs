use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::core::error::{AppError, Result};
use crate::features::images::dtos::ImageUpload;
use crate::features::items::dtos::ItemRequestDto;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdminTab {
    #[default]
    Categories,
    Items,
}

/// Query string of `GET /admin`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AdminQuery {
    #[serde(default)]
    pub tab: AdminTab,
    /// Id of the row whose edit form is open
    pub edit: Option<i64>,
    /// Any value opens the empty add form
    pub new: Option<String>,
}

/// Urlencoded category form
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryForm {
    #[serde(default)]
    pub title: String,
}

/// Multipart item form, as read from the request
#[derive(Debug, Clone, Default)]
pub struct ItemForm {
    pub title: String,
    pub description: String,
    pub price: String,
    pub category: String,
    /// Manually entered path, `None` when the field was not sent
    pub image_path: Option<String>,
    /// Path the item had when the form was opened
    pub current_image_path: Option<String>,
    pub image: Option<ImageUpload>,
}

impl ItemForm {
    /// Convert to the service request plus the picked file
    ///
    /// Blank price or category become `None` / `0` so the service reports
    /// the usual required-field message.
    pub fn into_request(self) -> Result<(ItemRequestDto, Option<ImageUpload>)> {
        let price = match self.price.trim() {
            "" => None,
            raw => Some(
                Decimal::from_str(raw)
                    .map_err(|_| AppError::Validation("Price must be a number".to_string()))?,
            ),
        };

        let category = match self.category.trim() {
            "" => 0,
            raw => raw.parse::<i64>().unwrap_or(0),
        };

        let image_path = self
            .image_path
            .or(self.current_image_path)
            .unwrap_or_default();

        let dto = ItemRequestDto {
            title: self.title,
            description: Some(self.description),
            price,
            image_path: Some(image_path),
            category,
        };

        Ok((dto, self.image))
    }
}

/// Values shown in the open category form
#[derive(Debug, Clone, Default, Serialize)]
pub struct CategoryFormView {
    pub id: Option<i64>,
    pub title: String,
}

/// Values shown in the open item form
#[derive(Debug, Clone, Default, Serialize)]
pub struct ItemFormView {
    pub id: Option<i64>,
    pub title: String,
    pub description: String,
    pub price: String,
    pub image_path: String,
    pub category: i64,
}

/// One row of the items table
#[derive(Debug, Clone, Serialize)]
pub struct ItemRowView {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub price_label: String,
    pub image_path: String,
    pub category_title: String,
}
