use rust_decimal::Decimal;
use std::sync::Arc;

use crate::core::config::SiteConfig;
use crate::core::error::Result;
use crate::features::categories::models::Category;
use crate::features::categories::CategoryService;
use crate::features::items::models::Item;
use crate::features::items::ItemService;
use crate::features::menu::dtos::{MenuCardDto, MenuDto, MenuSectionDto};

/// Builds the public menu from fresh category and item lists
pub struct MenuService {
    categories: Arc<CategoryService>,
    items: Arc<ItemService>,
    site: SiteConfig,
}

impl MenuService {
    pub fn new(categories: Arc<CategoryService>, items: Arc<ItemService>, site: SiteConfig) -> Self {
        Self {
            categories,
            items,
            site,
        }
    }

    pub fn site(&self) -> &SiteConfig {
        &self.site
    }

    /// Fetch both tables and group items under their categories
    pub async fn load(&self) -> Result<MenuDto> {
        let categories = self.categories.list().await?;
        let items = self.items.list().await?;
        Ok(self.build(&categories, &items))
    }

    pub fn build(&self, categories: &[Category], items: &[Item]) -> MenuDto {
        MenuDto {
            title: self.site.title.clone(),
            tagline: self.site.tagline.clone(),
            logo: self.site.placeholder_image.clone(),
            sections: build_sections(categories, items, &self.site),
        }
    }
}

/// One section per category in id order
///
/// A section holds exactly the items whose `category` equals its id, in item
/// id order. Items pointing at a missing category land in no section.
pub fn build_sections(
    categories: &[Category],
    items: &[Item],
    site: &SiteConfig,
) -> Vec<MenuSectionDto> {
    let mut categories: Vec<&Category> = categories.iter().collect();
    categories.sort_by_key(|c| c.id);

    let mut items: Vec<&Item> = items.iter().collect();
    items.sort_by_key(|i| i.id);

    categories
        .into_iter()
        .map(|category| MenuSectionDto {
            id: category.id,
            anchor: format!("category-{}", category.id),
            title: category.title.clone(),
            items: items
                .iter()
                .filter(|item| item.category == category.id)
                .map(|item| menu_card(item, site))
                .collect(),
        })
        .collect()
}

fn menu_card(item: &Item, site: &SiteConfig) -> MenuCardDto {
    let image = if item.image_path.is_empty() {
        site.placeholder_image.clone()
    } else {
        item.image_path.clone()
    };

    MenuCardDto {
        id: item.id,
        title: item.title.clone(),
        description: item.description.clone(),
        price: item.price,
        price_label: price_label(item.price, &site.currency_suffix),
        image,
    }
}

/// `85` -> `"85 T"`, trailing zeros dropped
pub fn price_label(price: Decimal, suffix: &str) -> String {
    format!("{} {}", price.normalize(), suffix)
}
