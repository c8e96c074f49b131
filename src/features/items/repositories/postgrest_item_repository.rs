use async_trait::async_trait;
use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::items::models::{Item, ItemFields};
use crate::features::items::repositories::ItemRepository;
use crate::modules::supabase::{PostgrestQuery, SupabaseClient};

const TABLE: &str = "items";

/// Items stored behind the hosted PostgREST endpoint
pub struct PostgrestItemRepository {
    client: Arc<SupabaseClient>,
}

impl PostgrestItemRepository {
    pub fn new(client: Arc<SupabaseClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ItemRepository for PostgrestItemRepository {
    async fn list(&self) -> Result<Vec<Item>> {
        let query = PostgrestQuery::new().select("*").order_asc("id");
        self.client.from_table(TABLE).select(&query).await
    }

    async fn insert(&self, fields: &ItemFields) -> Result<Item> {
        let rows: Vec<Item> = self
            .client
            .from_table(TABLE)
            .insert(std::slice::from_ref(fields))
            .await?;

        rows.into_iter()
            .next()
            .ok_or_else(|| AppError::Backend("Insert returned no item row".to_string()))
    }

    async fn update(&self, id: i64, fields: &ItemFields) -> Result<Item> {
        let query = PostgrestQuery::new().eq("id", id).select("*");
        let rows: Vec<Item> = self
            .client
            .from_table(TABLE)
            .update(&query, fields)
            .await?;

        rows.into_iter()
            .next()
            .ok_or_else(|| AppError::NotFound(format!("Item {} not found", id)))
    }

    async fn delete(&self, id: i64) -> Result<Item> {
        let query = PostgrestQuery::new().eq("id", id).select("*");
        let rows: Vec<Item> = self.client.from_table(TABLE).delete(&query).await?;

        rows.into_iter()
            .next()
            .ok_or_else(|| AppError::NotFound(format!("Item {} not found", id)))
    }
}
