use reqwest::{Method, RequestBuilder};
use serde::{de::DeserializeOwned, Serialize};
use std::fmt::Display;

use crate::core::error::{AppError, Result};
use crate::modules::supabase::SupabaseClient;

/// Query-string filters understood by PostgREST
///
/// Parameters keep insertion order so the generated URL is stable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostgrestQuery {
    params: Vec<(String, String)>,
}

impl PostgrestQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// `select=<columns>`
    pub fn select(mut self, columns: &str) -> Self {
        self.params.push(("select".to_string(), columns.to_string()));
        self
    }

    /// `order=<column>.asc`
    pub fn order_asc(mut self, column: &str) -> Self {
        self.params
            .push(("order".to_string(), format!("{}.asc", column)));
        self
    }

    /// `<column>=eq.<value>`
    pub fn eq(mut self, column: &str, value: impl Display) -> Self {
        self.params
            .push((column.to_string(), format!("eq.{}", value)));
        self
    }

    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }

    /// Encoded form, used for logging
    pub fn to_query_string(&self) -> String {
        self.params
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

/// Row operations against one table
///
/// Writes always ask for `return=representation` so callers get the
/// authoritative row back, including generated `id` and `created_at`.
pub struct PostgrestTable<'a> {
    client: &'a SupabaseClient,
    table: &'static str,
}

impl<'a> PostgrestTable<'a> {
    pub(crate) fn new(client: &'a SupabaseClient, table: &'static str) -> Self {
        Self { client, table }
    }

    pub async fn select<T: DeserializeOwned>(&self, query: &PostgrestQuery) -> Result<Vec<T>> {
        let builder = self
            .client
            .request(Method::GET, &self.client.rest_url(self.table))
            .query(query.params());

        self.execute(builder, "select", query).await
    }

    pub async fn insert<B, T>(&self, body: &B) -> Result<Vec<T>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let query = PostgrestQuery::new().select("*");
        let builder = self
            .client
            .request(Method::POST, &self.client.rest_url(self.table))
            .query(query.params())
            .header("Prefer", "return=representation")
            .json(body);

        self.execute(builder, "insert", &query).await
    }

    pub async fn update<B, T>(&self, query: &PostgrestQuery, body: &B) -> Result<Vec<T>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let builder = self
            .client
            .request(Method::PATCH, &self.client.rest_url(self.table))
            .query(query.params())
            .header("Prefer", "return=representation")
            .json(body);

        self.execute(builder, "update", query).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, query: &PostgrestQuery) -> Result<Vec<T>> {
        let builder = self
            .client
            .request(Method::DELETE, &self.client.rest_url(self.table))
            .query(query.params())
            .header("Prefer", "return=representation");

        self.execute(builder, "delete", query).await
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        operation: &str,
        query: &PostgrestQuery,
    ) -> Result<Vec<T>> {
        tracing::debug!(
            "PostgREST {} on {}?{}",
            operation,
            self.table,
            query.to_query_string()
        );

        let response = builder.send().await.map_err(|e| {
            tracing::error!("Failed to reach backend for {} on {}: {}", operation, self.table, e);
            AppError::Backend(format!("Failed to reach backend: {}", e))
        })?;

        if !response.status().is_success() {
            let message = SupabaseClient::error_message(response).await;
            tracing::error!("PostgREST {} on {} failed: {}", operation, self.table, message);
            return Err(AppError::Backend(message));
        }

        response.json::<Vec<T>>().await.map_err(|e| {
            tracing::error!("Failed to parse {} rows: {}", self.table, e);
            AppError::Backend(format!("Failed to parse response: {}", e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::StubBackend;
    use axum::http::StatusCode;
    use serde_json::{json, Value};

    #[test]
    fn test_list_query_orders_by_id() {
        let query = PostgrestQuery::new().select("*").order_asc("id");
        assert_eq!(query.to_query_string(), "select=%2A&order=id.asc");
    }

    #[test]
    fn test_eq_filter() {
        let query = PostgrestQuery::new().eq("id", 42);
        assert_eq!(
            query.params(),
            &[("id".to_string(), "eq.42".to_string())][..]
        );
    }

    #[tokio::test]
    async fn test_select_sends_key_headers_and_filters() {
        let backend = StubBackend::start().await;
        backend.reply_with(StatusCode::OK, json!([{ "id": 1 }, { "id": 2 }]));
        let client = backend.client();

        let query = PostgrestQuery::new().select("*").order_asc("id");
        let rows: Vec<Value> = client.from_table("categories").select(&query).await.unwrap();
        assert_eq!(rows.len(), 2);

        let request = backend.only_request();
        assert_eq!(request.method, Method::GET);
        assert_eq!(request.path, "/rest/v1/categories");
        assert_eq!(request.query_value("select"), Some("*"));
        assert_eq!(request.query_value("order"), Some("id.asc"));
        assert_eq!(request.header("apikey"), Some("anon-key"));
        assert_eq!(request.header("authorization"), Some("Bearer anon-key"));
    }

    #[tokio::test]
    async fn test_writes_ask_for_representation() {
        let backend = StubBackend::start().await;
        let client = backend.client();
        let table = client.from_table("items");
        let by_id = PostgrestQuery::new().eq("id", 9).select("*");

        let _: Vec<Value> = table.insert(&json!([{ "title": "Latte" }])).await.unwrap();
        let _: Vec<Value> = table.update(&by_id, &json!({ "title": "Mocha" })).await.unwrap();
        let _: Vec<Value> = table.delete(&by_id).await.unwrap();

        let requests = backend.requests();
        let methods: Vec<_> = requests.iter().map(|r| r.method.clone()).collect();
        assert_eq!(methods, vec![Method::POST, Method::PATCH, Method::DELETE]);
        for request in &requests {
            assert_eq!(request.header("prefer"), Some("return=representation"));
        }
        assert_eq!(requests[1].query_value("id"), Some("eq.9"));
        assert_eq!(requests[2].query_value("id"), Some("eq.9"));
        assert_eq!(requests[1].json(), json!({ "title": "Mocha" }));
    }

    #[tokio::test]
    async fn test_error_status_becomes_backend_error() {
        let backend = StubBackend::start().await;
        backend.reply_with(
            StatusCode::UNAUTHORIZED,
            json!({ "code": "42501", "message": "permission denied for table items" }),
        );
        let client = backend.client();

        let err = client
            .from_table("items")
            .select::<Value>(&PostgrestQuery::new().select("*"))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            AppError::Backend(ref m) if m == "HTTP 401 - permission denied for table items (code 42501)"
        ));
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_backend_error() {
        let client = SupabaseClient::new(&crate::core::config::SupabaseConfig {
            url: String::new(),
            anon_key: String::new(),
        });

        let err = client
            .from_table("items")
            .select::<Value>(&PostgrestQuery::new())
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Backend(_)));
    }
}
