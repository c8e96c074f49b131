//! Object storage for menu images
//!
//! Two adapters sit behind [`ImageStore`]: the hosted Supabase Storage API
//! (default) and a MinIO/S3-compatible bucket.

mod minio_client;
mod supabase_storage;

use async_trait::async_trait;

use crate::core::error::AppError;

pub use minio_client::MinIOClient;
pub use supabase_storage::SupabaseStorage;

#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Bucket every key lives in
    fn bucket(&self) -> &str;

    /// Store `data` under `key`, replacing any existing object
    async fn upload(&self, key: &str, data: Vec<u8>, content_type: &str) -> Result<(), AppError>;

    /// Publicly reachable URL for `key`
    ///
    /// Pure string construction. The URL is returned whether or not the object exists.
    fn public_url(&self, key: &str) -> String;

    /// Remove objects by key. Missing keys are not an error.
    async fn remove(&self, keys: &[String]) -> Result<(), AppError>;
}
