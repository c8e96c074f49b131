use rust_decimal::Decimal;
use std::sync::Arc;
use tokio::task::JoinHandle;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::features::images::dtos::ImageUpload;
use crate::features::images::ImageService;
use crate::features::items::dtos::ItemRequestDto;
use crate::features::items::models::{Item, ItemFields};
use crate::features::items::repositories::ItemRepository;
use crate::shared::constants::{MSG_ITEM_REQUIRED_FIELDS, MSG_UPLOAD_FAILED};
use crate::shared::validation::is_blank;

/// Outcome of a create or update
///
/// `warning` is set when the row was saved but the attached image could not be uploaded.
#[derive(Debug, Clone)]
pub struct SavedItem {
    pub item: Item,
    pub warning: Option<String>,
}

/// Service for item operations
pub struct ItemService {
    repository: Arc<dyn ItemRepository>,
    images: Arc<ImageService>,
}

impl ItemService {
    pub fn new(repository: Arc<dyn ItemRepository>, images: Arc<ImageService>) -> Self {
        Self { repository, images }
    }

    /// List all items ordered by id
    pub async fn list(&self) -> Result<Vec<Item>> {
        self.repository.list().await.map_err(|e| {
            tracing::error!("Error fetching items: {}", e);
            e
        })
    }

    pub async fn create(&self, dto: ItemRequestDto, image: Option<ImageUpload>) -> Result<SavedItem> {
        Self::validate(&dto)?;
        let (fields, warning) = self.resolve_fields(dto, image).await;

        let item = self.repository.insert(&fields).await.map_err(|e| {
            tracing::error!("Error adding item: {}", e);
            e
        })?;

        tracing::info!("Created item {} ({})", item.id, item.title);
        Ok(SavedItem { item, warning })
    }

    /// Update every column of an item
    ///
    /// `dto.image_path` is written as given, so callers that want to keep the
    /// current image must send it back.
    pub async fn update(
        &self,
        id: i64,
        dto: ItemRequestDto,
        image: Option<ImageUpload>,
    ) -> Result<SavedItem> {
        Self::validate(&dto)?;
        let (fields, warning) = self.resolve_fields(dto, image).await;

        let item = self.repository.update(id, &fields).await.map_err(|e| {
            tracing::error!("Error updating item {}: {}", id, e);
            e
        })?;

        tracing::info!("Updated item {} ({})", item.id, item.title);
        Ok(SavedItem { item, warning })
    }

    /// Delete an item and return the removed row
    ///
    /// A stored image is removed in the background; its outcome is never reported.
    pub async fn delete(&self, id: i64) -> Result<Item> {
        let (item, _cleanup) = self.delete_with_cleanup(id).await?;
        Ok(item)
    }

    pub(crate) async fn delete_with_cleanup(
        &self,
        id: i64,
    ) -> Result<(Item, Option<JoinHandle<()>>)> {
        let item = self.repository.delete(id).await.map_err(|e| {
            tracing::error!("Error deleting item {}: {}", id, e);
            e
        })?;

        tracing::info!("Deleted item {} ({})", item.id, item.title);

        let cleanup = self
            .images
            .storage_key_from_path(&item.image_path)
            .map(|key| self.images.schedule_removal(key));

        Ok((item, cleanup))
    }

    fn validate(dto: &ItemRequestDto) -> Result<()> {
        if is_blank(&dto.title) || dto.category == 0 {
            return Err(AppError::Validation(MSG_ITEM_REQUIRED_FIELDS.to_string()));
        }

        if dto.price.is_some_and(|p| p < Decimal::ZERO) {
            return Err(AppError::Validation("Price must not be negative".to_string()));
        }

        dto.validate()
            .map_err(|e| AppError::Validation(e.to_string()))
    }

    /// Upload the picked image if any and build the column values
    ///
    /// A failed upload keeps the submitted `image_path` and yields a warning.
    async fn resolve_fields(
        &self,
        dto: ItemRequestDto,
        image: Option<ImageUpload>,
    ) -> (ItemFields, Option<String>) {
        let mut image_path = dto.image_path.unwrap_or_default();
        let mut warning = None;

        if let Some(image) = image {
            match self.images.upload(image).await {
                Ok(uploaded) => image_path = uploaded.url,
                Err(e) => {
                    tracing::warn!("Keeping previous image path after failed upload: {}", e);
                    warning = Some(MSG_UPLOAD_FAILED.to_string());
                }
            }
        }

        let fields = ItemFields {
            title: dto.title.trim().to_string(),
            description: dto.description.unwrap_or_default(),
            price: dto.price.unwrap_or_default(),
            image_path,
            category: dto.category,
        };

        (fields, warning)
    }
}
