use reqwest::{Client, Method, RequestBuilder, Response};
use serde::Deserialize;

use crate::core::config::SupabaseConfig;
use crate::modules::supabase::PostgrestTable;

/// Error body returned by PostgREST and the Storage API
#[derive(Debug, Deserialize)]
struct BackendErrorBody {
    message: Option<String>,
    /// Storage API short error name, sent alongside `message`
    error: Option<String>,
    code: Option<String>,
    details: Option<String>,
    hint: Option<String>,
}

/// Configured handle to the hosted backend
///
/// No validation happens here: an empty URL or key still produces a client
/// whose requests fail at send time.
#[derive(Debug, Clone)]
pub struct SupabaseClient {
    base_url: String,
    api_key: String,
    http_client: Client,
}

impl SupabaseClient {
    pub fn new(config: &SupabaseConfig) -> Self {
        Self {
            base_url: config.url.trim_end_matches('/').to_string(),
            api_key: config.anon_key.clone(),
            http_client: Client::new(),
        }
    }

    /// Query builder entry point for one table
    pub fn from_table(&self, table: &'static str) -> PostgrestTable<'_> {
        PostgrestTable::new(self, table)
    }

    /// `{url}/rest/v1/{table}`
    pub fn rest_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    /// `{url}/storage/v1/{path}`
    pub fn storage_url(&self, path: &str) -> String {
        format!("{}/storage/v1/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Request builder carrying the `apikey` and bearer headers
    pub fn request(&self, method: Method, url: &str) -> RequestBuilder {
        self.http_client
            .request(method, url)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    /// Turn a non-success response into a readable message
    pub async fn error_message(response: Response) -> String {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Self::describe_error(status.as_u16(), &body)
    }

    fn describe_error(status: u16, body: &str) -> String {
        let Ok(parsed) = serde_json::from_str::<BackendErrorBody>(body) else {
            return format!("HTTP {} - {}", status, body);
        };

        let Some(mut message) = parsed.message.or(parsed.error) else {
            return format!("HTTP {} - {}", status, body);
        };

        if let Some(code) = parsed.code {
            message = format!("{} (code {})", message, code);
        }
        if let Some(details) = parsed.details.filter(|d| !d.is_empty()) {
            message = format!("{}: {}", message, details);
        }
        if let Some(hint) = parsed.hint.filter(|h| !h.is_empty()) {
            message = format!("{} [hint: {}]", message, hint);
        }
        format!("HTTP {} - {}", status, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(url: &str) -> SupabaseClient {
        SupabaseClient::new(&SupabaseConfig {
            url: url.to_string(),
            anon_key: "anon".to_string(),
        })
    }

    #[test]
    fn test_urls_strip_trailing_slash() {
        let c = client("https://abc.supabase.co/");
        assert_eq!(c.rest_url("categories"), "https://abc.supabase.co/rest/v1/categories");
        assert_eq!(
            c.storage_url("/object/items/menu-images/a.jpg"),
            "https://abc.supabase.co/storage/v1/object/items/menu-images/a.jpg"
        );
    }

    #[test]
    fn test_empty_url_still_constructs() {
        let c = client("");
        assert_eq!(c.rest_url("items"), "/rest/v1/items");
    }

    #[test]
    fn test_describe_error_postgrest_body() {
        let body = r#"{"code":"42501","details":null,"hint":null,"message":"permission denied for table items"}"#;
        assert_eq!(
            SupabaseClient::describe_error(401, body),
            "HTTP 401 - permission denied for table items (code 42501)"
        );
    }

    #[test]
    fn test_describe_error_storage_body() {
        let body = r#"{"statusCode":"404","error":"Bucket not found","message":"Bucket not found"}"#;
        assert_eq!(
            SupabaseClient::describe_error(400, body),
            "HTTP 400 - Bucket not found"
        );
    }

    #[test]
    fn test_describe_error_uses_error_key_without_message() {
        let body = r#"{"statusCode":"413","error":"Payload too large"}"#;
        assert_eq!(
            SupabaseClient::describe_error(413, body),
            "HTTP 413 - Payload too large"
        );
    }

    #[test]
    fn test_describe_error_plain_body() {
        assert_eq!(
            SupabaseClient::describe_error(502, "bad gateway"),
            "HTTP 502 - bad gateway"
        );
    }
}
