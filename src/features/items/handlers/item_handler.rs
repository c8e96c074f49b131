use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::core::error::Result;
use crate::core::extractor::AppJson;
use crate::features::items::dtos::{ItemRequestDto, ItemResponseDto};
use crate::features::items::services::ItemService;
use crate::shared::types::{ApiResponse, Meta};

/// List all items in id order
#[utoipa::path(
    get,
    path = "/api/items",
    responses(
        (status = 200, description = "List of items", body = ApiResponse<Vec<ItemResponseDto>>),
        (status = 502, description = "Backend unavailable")
    ),
    tag = "items"
)]
pub async fn list_items(
    State(service): State<Arc<ItemService>>,
) -> Result<Json<ApiResponse<Vec<ItemResponseDto>>>> {
    let items: Vec<ItemResponseDto> = service
        .list()
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    let total = items.len() as i64;

    Ok(Json(ApiResponse::success(Some(items), None, Some(Meta { total }))))
}

/// Create an item
///
/// Images are uploaded separately through `/api/admin/images`; send the
/// returned URL as `image_path`.
#[utoipa::path(
    post,
    path = "/api/admin/items",
    request_body = ItemRequestDto,
    responses(
        (status = 201, description = "Item created", body = ApiResponse<ItemResponseDto>),
        (status = 400, description = "Title and category are required"),
        (status = 502, description = "Backend rejected the insert")
    ),
    tag = "items",
    security(
        ("basic_auth" = [])
    )
)]
pub async fn create_item(
    State(service): State<Arc<ItemService>>,
    AppJson(dto): AppJson<ItemRequestDto>,
) -> Result<(StatusCode, Json<ApiResponse<ItemResponseDto>>)> {
    let saved = service.create(dto, None).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(saved.item.into()), saved.warning, None)),
    ))
}

/// Replace all fields of an item
#[utoipa::path(
    put,
    path = "/api/admin/items/{id}",
    params(
        ("id" = i64, Path, description = "Item ID")
    ),
    request_body = ItemRequestDto,
    responses(
        (status = 200, description = "Item updated", body = ApiResponse<ItemResponseDto>),
        (status = 400, description = "Title and category are required"),
        (status = 404, description = "Item not found")
    ),
    tag = "items",
    security(
        ("basic_auth" = [])
    )
)]
pub async fn update_item(
    State(service): State<Arc<ItemService>>,
    Path(id): Path<i64>,
    AppJson(dto): AppJson<ItemRequestDto>,
) -> Result<Json<ApiResponse<ItemResponseDto>>> {
    let saved = service.update(id, dto, None).await?;
    Ok(Json(ApiResponse::success(
        Some(saved.item.into()),
        saved.warning,
        None,
    )))
}

/// Delete an item
///
/// An uploaded image is removed in the background.
#[utoipa::path(
    delete,
    path = "/api/admin/items/{id}",
    params(
        ("id" = i64, Path, description = "Item ID")
    ),
    responses(
        (status = 200, description = "Item deleted", body = ApiResponse<ItemResponseDto>),
        (status = 404, description = "Item not found")
    ),
    tag = "items",
    security(
        ("basic_auth" = [])
    )
)]
pub async fn delete_item(
    State(service): State<Arc<ItemService>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<ItemResponseDto>>> {
    let item = service.delete(id).await?;
    Ok(Json(ApiResponse::success(
        Some(item.into()),
        Some("Item deleted".to_string()),
        None,
    )))
}
