use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::categories::{dtos as categories_dtos, handlers as categories_handlers};
use crate::features::images::{dtos as images_dtos, handlers as images_handlers};
use crate::features::items::{dtos as items_dtos, handlers as items_handlers};
use crate::features::menu::{dtos as menu_dtos, handlers as menu_handlers};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Menu
        menu_handlers::get_menu,
        // Categories
        categories_handlers::list_categories,
        categories_handlers::create_category,
        categories_handlers::update_category,
        categories_handlers::delete_category,
        // Items
        items_handlers::list_items,
        items_handlers::create_item,
        items_handlers::update_item,
        items_handlers::delete_item,
        // Images
        images_handlers::upload_image,
    ),
    components(
        schemas(
            Meta,
            // Menu
            menu_dtos::MenuDto,
            menu_dtos::MenuSectionDto,
            menu_dtos::MenuCardDto,
            ApiResponse<menu_dtos::MenuDto>,
            // Categories
            categories_dtos::CategoryRequestDto,
            categories_dtos::CategoryResponseDto,
            ApiResponse<categories_dtos::CategoryResponseDto>,
            ApiResponse<Vec<categories_dtos::CategoryResponseDto>>,
            // Items
            items_dtos::ItemRequestDto,
            items_dtos::ItemResponseDto,
            ApiResponse<items_dtos::ItemResponseDto>,
            ApiResponse<Vec<items_dtos::ItemResponseDto>>,
            // Images
            images_dtos::UploadImageDto,
            images_dtos::UploadedImageDto,
            ApiResponse<images_dtos::UploadedImageDto>,
        )
    ),
    tags(
        (name = "menu", description = "Public menu grouped by category"),
        (name = "categories", description = "Menu categories"),
        (name = "items", description = "Menu items"),
        (name = "images", description = "Item image uploads"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "Cafe Menu API",
        version = "0.1.0",
        description = "API documentation for the cafe menu",
    )
)]
pub struct ApiDoc;

/// Adds the HTTP basic scheme guarding the admin endpoints
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "basic_auth",
                SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Basic).build()),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_admin_paths() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/api/menu"));
        assert!(doc.paths.paths.contains_key("/api/admin/items/{id}"));
        assert!(doc.paths.paths.contains_key("/api/admin/images"));

        let schemes = doc.components.expect("components").security_schemes;
        assert!(schemes.contains_key("basic_auth"));
    }
}
