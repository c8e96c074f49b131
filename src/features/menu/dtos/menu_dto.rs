use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// The whole public menu
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MenuDto {
    pub title: String,
    pub tagline: String,
    pub logo: String,
    pub sections: Vec<MenuSectionDto>,
}

/// One category and the items that belong to it
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MenuSectionDto {
    pub id: i64,
    /// In-page anchor, `category-{id}`
    #[schema(example = "category-2")]
    pub anchor: String,
    pub title: String,
    pub items: Vec<MenuCardDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MenuCardDto {
    pub id: i64,
    pub title: String,
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub price: Decimal,
    /// Price followed by the currency suffix
    #[schema(example = "85 T")]
    pub price_label: String,
    /// Image path, or the placeholder when the item has none
    pub image: String,
}
