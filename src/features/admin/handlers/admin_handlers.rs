use axum::{
    extract::{Multipart, Path, Query, State},
    response::{Html, IntoResponse, Response},
};
use std::sync::Arc;
use tracing::debug;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppForm;
use crate::features::admin::dtos::{AdminQuery, CategoryForm, ItemForm};
use crate::features::admin::services::{AdminPage, AdminService};
use crate::features::images::dtos::ImageUpload;

fn render(service: &AdminService, page: AdminPage) -> Response {
    match service.render(&page) {
        Ok(html) => (page.status, Html(html)).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn admin_panel(
    State(service): State<Arc<AdminService>>,
    Query(query): Query<AdminQuery>,
) -> Response {
    let page = service.open(&query).await;
    render(&service, page)
}

pub async fn create_category(
    State(service): State<Arc<AdminService>>,
    AppForm(form): AppForm<CategoryForm>,
) -> Response {
    let page = service.create_category(form).await;
    render(&service, page)
}

pub async fn update_category(
    State(service): State<Arc<AdminService>>,
    Path(id): Path<i64>,
    AppForm(form): AppForm<CategoryForm>,
) -> Response {
    let page = service.update_category(id, form).await;
    render(&service, page)
}

pub async fn delete_category(
    State(service): State<Arc<AdminService>>,
    Path(id): Path<i64>,
) -> Response {
    let page = service.delete_category(id).await;
    render(&service, page)
}

pub async fn create_item(
    State(service): State<Arc<AdminService>>,
    multipart: Multipart,
) -> Result<Response> {
    let form = read_item_form(multipart).await?;
    let page = service.save_item(None, form).await;
    Ok(render(&service, page))
}

pub async fn update_item(
    State(service): State<Arc<AdminService>>,
    Path(id): Path<i64>,
    multipart: Multipart,
) -> Result<Response> {
    let form = read_item_form(multipart).await?;
    let page = service.save_item(Some(id), form).await;
    Ok(render(&service, page))
}

pub async fn delete_item(
    State(service): State<Arc<AdminService>>,
    Path(id): Path<i64>,
) -> Response {
    let page = service.delete_item(id).await;
    render(&service, page)
}

/// Read the item form; an empty file input counts as no image
async fn read_item_form(mut multipart: Multipart) -> Result<ItemForm> {
    let mut form = ItemForm::default();

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        debug!("Failed to read multipart field: {}", e);
        AppError::BadRequest(format!("Failed to read multipart data: {}", e))
    })? {
        let field_name = field.name().unwrap_or("").to_string();

        if field_name == "image" {
            let file_name = field.file_name().unwrap_or("").to_string();
            let content_type = field
                .content_type()
                .map(|s| s.to_string())
                .unwrap_or_else(|| "application/octet-stream".to_string());
            let data = field.bytes().await.map_err(|e| {
                debug!("Failed to read file bytes: {}", e);
                AppError::BadRequest(format!("Failed to read file data: {}", e))
            })?;

            if !file_name.is_empty() && !data.is_empty() {
                form.image = Some(ImageUpload {
                    file_name,
                    content_type,
                    data: data.to_vec(),
                });
            }
            continue;
        }

        let text = field.text().await.map_err(|e| {
            AppError::BadRequest(format!("Failed to read field '{}': {}", field_name, e))
        })?;

        match field_name.as_str() {
            "title" => form.title = text,
            "description" => form.description = text,
            "price" => form.price = text,
            "category" => form.category = text,
            "image_path" => form.image_path = Some(text),
            "current_image_path" => form.current_image_path = Some(text),
            _ => debug!("Ignoring unknown field: {}", field_name),
        }
    }

    Ok(form)
}
