use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::features::admin::handlers;
use crate::features::admin::services::AdminService;
use crate::features::images::routes::MULTIPART_OVERHEAD;

/// Admin panel pages and form targets
pub fn routes(admin_service: Arc<AdminService>, max_upload_size: usize) -> Router {
    let body_limit = DefaultBodyLimit::max(max_upload_size + MULTIPART_OVERHEAD);

    Router::new()
        .route("/admin", get(handlers::admin_panel))
        .route("/admin/categories", post(handlers::create_category))
        .route("/admin/categories/{id}", post(handlers::update_category))
        .route(
            "/admin/categories/{id}/delete",
            post(handlers::delete_category),
        )
        .route(
            "/admin/items",
            post(handlers::create_item).layer(body_limit),
        )
        .route(
            "/admin/items/{id}",
            post(handlers::update_item).layer(body_limit),
        )
        .route("/admin/items/{id}/delete", post(handlers::delete_item))
        .with_state(admin_service)
}
