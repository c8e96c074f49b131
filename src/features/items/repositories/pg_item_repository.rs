use async_trait::async_trait;
use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::items::models::{Item, ItemFields};
use crate::features::items::repositories::ItemRepository;

/// Items stored in a directly connected Postgres database
pub struct PgItemRepository {
    pool: PgPool,
}

impl PgItemRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const ITEM_COLUMNS: &str = "id, created_at, title, \
    COALESCE(description, '') AS description, \
    COALESCE(price, 0) AS price, \
    COALESCE(image_path, '') AS image_path, \
    category";

#[async_trait]
impl ItemRepository for PgItemRepository {
    async fn list(&self) -> Result<Vec<Item>> {
        let sql = format!("SELECT {} FROM items ORDER BY id", ITEM_COLUMNS);

        sqlx::query_as::<_, Item>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list items: {:?}", e);
                AppError::Database(e)
            })
    }

    async fn insert(&self, fields: &ItemFields) -> Result<Item> {
        let sql = format!(
            "INSERT INTO items (title, description, price, image_path, category) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {}",
            ITEM_COLUMNS
        );

        sqlx::query_as::<_, Item>(&sql)
            .bind(&fields.title)
            .bind(&fields.description)
            .bind(fields.price)
            .bind(&fields.image_path)
            .bind(fields.category)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to insert item: {:?}", e);
                AppError::Database(e)
            })
    }

    async fn update(&self, id: i64, fields: &ItemFields) -> Result<Item> {
        let sql = format!(
            "UPDATE items \
             SET title = $2, description = $3, price = $4, image_path = $5, category = $6 \
             WHERE id = $1 \
             RETURNING {}",
            ITEM_COLUMNS
        );

        sqlx::query_as::<_, Item>(&sql)
            .bind(id)
            .bind(&fields.title)
            .bind(&fields.description)
            .bind(fields.price)
            .bind(&fields.image_path)
            .bind(fields.category)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to update item {}: {:?}", id, e);
                AppError::Database(e)
            })?
            .ok_or_else(|| AppError::NotFound(format!("Item {} not found", id)))
    }

    async fn delete(&self, id: i64) -> Result<Item> {
        let sql = format!("DELETE FROM items WHERE id = $1 RETURNING {}", ITEM_COLUMNS);

        sqlx::query_as::<_, Item>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete item {}: {:?}", id, e);
                AppError::Database(e)
            })?
            .ok_or_else(|| AppError::NotFound(format!("Item {} not found", id)))
    }
}
