use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use tracing::debug;

use crate::core::error::{AppError, Result};
use crate::features::images::dtos::{ImageUpload, UploadImageDto, UploadedImageDto};
use crate::features::images::services::ImageService;
use crate::shared::types::ApiResponse;

/// Upload a menu image
///
/// Accepts multipart/form-data with a single `file` field. The returned URL
/// can be stored as an item's `image_path`.
#[utoipa::path(
    post,
    path = "/api/admin/images",
    tag = "images",
    request_body(
        content = UploadImageDto,
        content_type = "multipart/form-data",
        description = "Image file to store under the menu image prefix",
    ),
    responses(
        (status = 201, description = "Image uploaded", body = ApiResponse<UploadedImageDto>),
        (status = 400, description = "Missing file or not an image"),
        (status = 413, description = "File too large"),
        (status = 502, description = "Storage rejected the upload")
    ),
    security(
        ("basic_auth" = [])
    )
)]
pub async fn upload_image(
    State(service): State<Arc<ImageService>>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<UploadedImageDto>>)> {
    let mut upload: Option<ImageUpload> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        debug!("Failed to read multipart field: {}", e);
        AppError::BadRequest(format!("Failed to read multipart data: {}", e))
    })? {
        let field_name = field.name().unwrap_or("").to_string();

        if field_name != "file" {
            debug!("Ignoring unknown field: {}", field_name);
            continue;
        }

        let content_type = field
            .content_type()
            .map(|s| s.to_string())
            .unwrap_or_else(|| "application/octet-stream".to_string());
        let file_name = field
            .file_name()
            .map(|s| s.to_string())
            .unwrap_or_else(|| "unnamed".to_string());
        let data = field.bytes().await.map_err(|e| {
            debug!("Failed to read file bytes: {}", e);
            AppError::BadRequest(format!("Failed to read file data: {}", e))
        })?;

        upload = Some(ImageUpload {
            file_name,
            content_type,
            data: data.to_vec(),
        });
    }

    let upload = upload.ok_or_else(|| AppError::BadRequest("File is required".to_string()))?;
    let uploaded = service.upload(upload).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(uploaded), None, None)),
    ))
}
