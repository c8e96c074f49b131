use axum::{extract::DefaultBodyLimit, routing::post, Router};
use std::sync::Arc;

use crate::features::images::handlers::upload_image;
use crate::features::images::services::ImageService;

/// Multipart overhead allowed on top of the file itself
pub const MULTIPART_OVERHEAD: usize = 1024 * 1024;

/// Upload route, mounted behind the admin gate
pub fn admin_routes(service: Arc<ImageService>, max_upload_size: usize) -> Router {
    Router::new()
        .route(
            "/api/admin/images",
            post(upload_image).layer(DefaultBodyLimit::max(max_upload_size + MULTIPART_OVERHEAD)),
        )
        .with_state(service)
}
