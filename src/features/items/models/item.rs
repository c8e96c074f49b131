use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::shared::types::null_as_default;

/// A menu item row
///
/// `category` is a soft reference: it may name a category that no longer exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Item {
    pub id: i64,
    pub created_at: DateTime<Utc>,
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        serialize_with = "rust_decimal::serde::float::serialize"
    )]
    pub price: Decimal,
    /// Site-relative static path or full URL, empty when the item has no image
    #[serde(default, deserialize_with = "null_as_default")]
    pub image_path: String,
    pub category: i64,
}

/// Column values written on insert and update
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemFields {
    pub title: String,
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub image_path: String,
    pub category: i64,
}
