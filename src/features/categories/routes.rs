use std::sync::Arc;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::features::categories::handlers;
use crate::features::categories::services::CategoryService;

/// Public read routes
pub fn routes(service: Arc<CategoryService>) -> Router {
    Router::new()
        .route("/api/categories", get(handlers::list_categories))
        .with_state(service)
}

/// Write routes, mounted behind the admin gate
pub fn admin_routes(service: Arc<CategoryService>) -> Router {
    Router::new()
        .route("/api/admin/categories", post(handlers::create_category))
        .route(
            "/api/admin/categories/{id}",
            put(handlers::update_category).delete(handlers::delete_category),
        )
        .with_state(service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::categories::dtos::CategoryResponseDto;
    use crate::shared::test_helpers::FakeCategoryRepository;
    use crate::shared::types::ApiResponse;
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::json;

    fn server() -> (TestServer, Arc<FakeCategoryRepository>) {
        let repo = Arc::new(FakeCategoryRepository::new());
        let service = Arc::new(CategoryService::new(repo.clone()));
        let app = routes(service.clone()).merge(admin_routes(service));
        (TestServer::new(app).unwrap(), repo)
    }

    #[tokio::test]
    async fn test_create_then_list() {
        let (server, _) = server();

        let response = server
            .post("/api/admin/categories")
            .json(&json!({ "title": "Cakes" }))
            .await;
        response.assert_status(StatusCode::CREATED);
        let created: ApiResponse<CategoryResponseDto> = response.json();
        assert_eq!(created.data.unwrap().title, "Cakes");

        let listed: ApiResponse<Vec<CategoryResponseDto>> =
            server.get("/api/categories").await.json();
        assert_eq!(listed.meta.unwrap().total, 1);
        assert_eq!(listed.data.unwrap()[0].title, "Cakes");
    }

    #[tokio::test]
    async fn test_blank_title_is_bad_request() {
        let (server, repo) = server();

        server
            .post("/api/admin/categories")
            .json(&json!({ "title": "  " }))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(repo.call_count(), 0);
    }

    #[tokio::test]
    async fn test_update_and_delete_unknown_id() {
        let (server, _) = server();

        server
            .put("/api/admin/categories/7")
            .json(&json!({ "title": "Tea" }))
            .await
            .assert_status(StatusCode::NOT_FOUND);
        server
            .delete("/api/admin/categories/7")
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_backend_failure_is_bad_gateway() {
        let (server, repo) = server();
        repo.set_failing(true);

        server
            .get("/api/categories")
            .await
            .assert_status(StatusCode::BAD_GATEWAY);
    }
}
