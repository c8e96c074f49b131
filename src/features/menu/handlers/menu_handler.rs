use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::menu::dtos::MenuDto;
use crate::features::menu::services::MenuService;
use crate::shared::constants::MSG_FETCH_FAILED;
use crate::shared::templates::render_page;
use crate::shared::types::ApiResponse;

/// Render the public menu page
///
/// A failed fetch still renders the page shell with an alert.
pub async fn menu_page(State(service): State<Arc<MenuService>>) -> Response {
    let dir = &service.site().text_direction;
    let (status, ctx) = match service.load().await {
        Ok(menu) => (
            StatusCode::OK,
            json!({ "menu": menu, "alert": null, "dir": dir }),
        ),
        Err(e) => {
            tracing::error!("Error loading menu: {}", e);
            let menu = service.build(&[], &[]);
            (
                StatusCode::BAD_GATEWAY,
                json!({ "menu": menu, "alert": MSG_FETCH_FAILED, "dir": dir }),
            )
        }
    };

    match render_page("menu.html", ctx) {
        Ok(html) => (status, Html(html)).into_response(),
        Err(e) => AppError::from(e).into_response(),
    }
}

/// Menu sections as JSON
#[utoipa::path(
    get,
    path = "/api/menu",
    responses(
        (status = 200, description = "Menu grouped by category", body = ApiResponse<MenuDto>),
        (status = 502, description = "Backend unavailable")
    ),
    tag = "menu"
)]
pub async fn get_menu(State(service): State<Arc<MenuService>>) -> Result<Json<ApiResponse<MenuDto>>> {
    let menu = service.load().await?;
    Ok(Json(ApiResponse::success(Some(menu), None, None)))
}
