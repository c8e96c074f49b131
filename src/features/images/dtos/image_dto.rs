use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Multipart form for image uploads, for Swagger UI only
///
/// The handler reads the body with axum's `Multipart` extractor.
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct UploadImageDto {
    /// Image file (`image/*`)
    #[schema(format = Binary, content_media_type = "application/octet-stream")]
    pub file: String,
}

/// Result of a successful upload
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UploadedImageDto {
    /// Object key inside the bucket, e.g. `menu-images/k3j2x9_1700000000000.jpg`
    pub key: String,
    /// Public URL to store as the item's `image_path`
    pub url: String,
}

/// A file picked in a form, not yet stored
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: String,
    pub data: Vec<u8>,
}
