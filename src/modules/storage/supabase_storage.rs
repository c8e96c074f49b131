use async_trait::async_trait;
use reqwest::Method;
use serde_json::json;
use tracing::debug;

use crate::core::error::AppError;
use crate::modules::storage::ImageStore;
use crate::modules::supabase::SupabaseClient;

/// Supabase Storage adapter for one bucket
pub struct SupabaseStorage {
    client: SupabaseClient,
    bucket: String,
    public_base: String,
}

impl SupabaseStorage {
    pub fn new(client: SupabaseClient, bucket: impl Into<String>) -> Self {
        let bucket = bucket.into();
        let public_base = client.storage_url(&format!("object/public/{}", bucket));
        Self {
            client,
            bucket,
            public_base,
        }
    }
}

#[async_trait]
impl ImageStore for SupabaseStorage {
    fn bucket(&self) -> &str {
        &self.bucket
    }

    async fn upload(&self, key: &str, data: Vec<u8>, content_type: &str) -> Result<(), AppError> {
        let url = self
            .client
            .storage_url(&format!("object/{}/{}", self.bucket, key));

        let response = self
            .client
            .request(Method::POST, &url)
            .header("x-upsert", "true")
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(data)
            .send()
            .await
            .map_err(|e| AppError::Storage(format!("Failed to reach storage: {}", e)))?;

        if !response.status().is_success() {
            let message = SupabaseClient::error_message(response).await;
            return Err(AppError::Storage(format!(
                "Failed to upload '{}': {}",
                key, message
            )));
        }

        debug!("Uploaded '{}' to bucket '{}'", key, self.bucket);
        Ok(())
    }

    fn public_url(&self, key: &str) -> String {
        format!("{}/{}", self.public_base, key)
    }

    async fn remove(&self, keys: &[String]) -> Result<(), AppError> {
        if keys.is_empty() {
            return Ok(());
        }

        let url = self.client.storage_url(&format!("object/{}", self.bucket));
        let response = self
            .client
            .request(Method::DELETE, &url)
            .json(&json!({ "prefixes": keys }))
            .send()
            .await
            .map_err(|e| AppError::Storage(format!("Failed to reach storage: {}", e)))?;

        if !response.status().is_success() {
            let message = SupabaseClient::error_message(response).await;
            return Err(AppError::Storage(format!(
                "Failed to remove {:?}: {}",
                keys, message
            )));
        }

        debug!("Removed {:?} from bucket '{}'", keys, self.bucket);
        Ok(())
    }
}
