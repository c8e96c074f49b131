use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::categories::models::Category;
use crate::features::categories::repositories::CategoryRepository;
use crate::modules::supabase::{PostgrestQuery, SupabaseClient};

const TABLE: &str = "categories";

/// Categories stored behind the hosted PostgREST endpoint
pub struct PostgrestCategoryRepository {
    client: Arc<SupabaseClient>,
}

impl PostgrestCategoryRepository {
    pub fn new(client: Arc<SupabaseClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CategoryRepository for PostgrestCategoryRepository {
    async fn list(&self) -> Result<Vec<Category>> {
        let query = PostgrestQuery::new().select("*").order_asc("id");
        self.client.from_table(TABLE).select(&query).await
    }

    async fn insert(&self, title: &str) -> Result<Category> {
        let rows: Vec<Category> = self
            .client
            .from_table(TABLE)
            .insert(&json!([{ "title": title }]))
            .await?;

        rows.into_iter()
            .next()
            .ok_or_else(|| AppError::Backend("Insert returned no category row".to_string()))
    }

    async fn update(&self, id: i64, title: &str) -> Result<Category> {
        let query = PostgrestQuery::new().eq("id", id).select("*");
        let rows: Vec<Category> = self
            .client
            .from_table(TABLE)
            .update(&query, &json!({ "title": title }))
            .await?;

        rows.into_iter()
            .next()
            .ok_or_else(|| AppError::NotFound(format!("Category {} not found", id)))
    }

    async fn delete(&self, id: i64) -> Result<Category> {
        let query = PostgrestQuery::new().eq("id", id).select("*");
        let rows: Vec<Category> = self.client.from_table(TABLE).delete(&query).await?;

        rows.into_iter()
            .next()
            .ok_or_else(|| AppError::NotFound(format!("Category {} not found", id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::StubBackend;
    use axum::http::{Method, StatusCode};

    fn row(id: i64, title: &str) -> serde_json::Value {
        json!({ "id": id, "created_at": "2025-03-01T10:00:00+00:00", "title": title })
    }

    #[tokio::test]
    async fn test_insert_wraps_row_in_array() {
        let backend = StubBackend::start().await;
        backend.reply_with(StatusCode::CREATED, json!([row(4, "Cakes")]));
        let repo = PostgrestCategoryRepository::new(Arc::new(backend.client()));

        let category = repo.insert("Cakes").await.unwrap();
        assert_eq!(category.id, 4);
        assert_eq!(category.title, "Cakes");

        let request = backend.only_request();
        assert_eq!(request.method, Method::POST);
        assert_eq!(request.path, "/rest/v1/categories");
        assert_eq!(request.json(), json!([{ "title": "Cakes" }]));
        assert_eq!(request.header("prefer"), Some("return=representation"));
    }

    #[tokio::test]
    async fn test_update_filters_by_id() {
        let backend = StubBackend::start().await;
        backend.reply_with(StatusCode::OK, json!([row(7, "Pastries")]));
        let repo = PostgrestCategoryRepository::new(Arc::new(backend.client()));

        let category = repo.update(7, "Pastries").await.unwrap();
        assert_eq!(category.title, "Pastries");

        let request = backend.only_request();
        assert_eq!(request.method, Method::PATCH);
        assert_eq!(request.query_value("id"), Some("eq.7"));
        assert_eq!(request.json(), json!({ "title": "Pastries" }));
    }

    #[tokio::test]
    async fn test_update_of_missing_row_is_not_found() {
        let backend = StubBackend::start().await;
        let repo = PostgrestCategoryRepository::new(Arc::new(backend.client()));

        let err = repo.update(99, "Ghost").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_returns_row_and_maps_empty_to_not_found() {
        let backend = StubBackend::start().await;
        backend.reply_with(StatusCode::OK, json!([row(2, "Cold Drinks")]));
        let repo = PostgrestCategoryRepository::new(Arc::new(backend.client()));

        let deleted = repo.delete(2).await.unwrap();
        assert_eq!(deleted.title, "Cold Drinks");
        let request = backend.only_request();
        assert_eq!(request.method, Method::DELETE);
        assert_eq!(request.query_value("id"), Some("eq.2"));

        backend.reply_with(StatusCode::OK, json!([]));
        let err = repo.delete(2).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_list_of_empty_table_is_empty() {
        let backend = StubBackend::start().await;
        let repo = PostgrestCategoryRepository::new(Arc::new(backend.client()));

        assert!(repo.list().await.unwrap().is_empty());
        assert_eq!(backend.only_request().query_value("order"), Some("id.asc"));
    }
}
