use serde::Serialize;

use crate::core::error::Result;
use crate::features::categories::models::Category;
use crate::features::categories::CategoryService;
use crate::features::items::models::Item;
use crate::features::items::ItemService;
use crate::shared::constants::UNKNOWN_CATEGORY_LABEL;

/// Local copy of the catalog shown in the admin panel
///
/// Never authoritative. The `apply_*` methods fold in rows the backend has
/// already accepted; nothing else mutates it.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CatalogView {
    pub categories: Vec<Category>,
    pub items: Vec<Item>,
}

impl CatalogView {
    pub async fn load(categories: &CategoryService, items: &ItemService) -> Result<Self> {
        let categories = categories.list().await?;
        let items = items.list().await?;
        Ok(Self { categories, items })
    }

    pub fn apply_category_created(&mut self, category: Category) {
        self.categories.push(category);
    }

    pub fn apply_category_updated(&mut self, category: Category) {
        if let Some(row) = self.categories.iter_mut().find(|c| c.id == category.id) {
            *row = category;
        }
    }

    /// Items of the category stay in the view
    pub fn apply_category_removed(&mut self, id: i64) {
        self.categories.retain(|c| c.id != id);
    }

    pub fn apply_item_created(&mut self, item: Item) {
        self.items.push(item);
    }

    pub fn apply_item_updated(&mut self, item: Item) {
        if let Some(row) = self.items.iter_mut().find(|i| i.id == item.id) {
            *row = item;
        }
    }

    pub fn apply_item_removed(&mut self, id: i64) {
        self.items.retain(|i| i.id != id);
    }

    pub fn category(&self, id: i64) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    pub fn item(&self, id: i64) -> Option<&Item> {
        self.items.iter().find(|i| i.id == id)
    }

    /// Title of the category, or "Unknown" for orphaned references
    pub fn category_title(&self, id: i64) -> &str {
        self.category(id)
            .map(|c| c.title.as_str())
            .unwrap_or(UNKNOWN_CATEGORY_LABEL)
    }
}
