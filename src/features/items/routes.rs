use std::sync::Arc;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::features::items::handlers;
use crate::features::items::services::ItemService;

/// Public read routes
pub fn routes(service: Arc<ItemService>) -> Router {
    Router::new()
        .route("/api/items", get(handlers::list_items))
        .with_state(service)
}

/// Write routes, mounted behind the admin gate
pub fn admin_routes(service: Arc<ItemService>) -> Router {
    Router::new()
        .route("/api/admin/items", post(handlers::create_item))
        .route(
            "/api/admin/items/{id}",
            put(handlers::update_item).delete(handlers::delete_item),
        )
        .with_state(service)
}
