use async_trait::async_trait;

use crate::core::error::Result;
use crate::features::items::models::{Item, ItemFields};

/// Persistence seam for items
///
/// Same contract as the category repository: authoritative rows back,
/// `NotFound` for unknown ids on update and delete.
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// All items, ascending by id
    async fn list(&self) -> Result<Vec<Item>>;

    async fn insert(&self, fields: &ItemFields) -> Result<Item>;

    async fn update(&self, id: i64, fields: &ItemFields) -> Result<Item>;

    /// Returns the deleted row
    async fn delete(&self, id: i64) -> Result<Item>;
}
