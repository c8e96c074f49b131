use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::menu::handlers;
use crate::features::menu::services::MenuService;

pub fn routes(service: Arc<MenuService>) -> Router {
    Router::new()
        .route("/", get(handlers::menu_page))
        .route("/api/menu", get(handlers::get_menu))
        .with_state(service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::SiteConfig;
    use crate::features::categories::dtos::CategoryRequestDto;
    use crate::features::categories::CategoryService;
    use crate::features::images::ImageService;
    use crate::features::items::dtos::ItemRequestDto;
    use crate::features::items::ItemService;
    use crate::features::menu::dtos::MenuDto;
    use crate::shared::test_helpers::{FakeCategoryRepository, FakeImageStore, FakeItemRepository};
    use crate::shared::types::ApiResponse;
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use rust_decimal::Decimal;

    struct Fixture {
        server: TestServer,
        categories: Arc<CategoryService>,
        items: Arc<ItemService>,
        category_repo: Arc<FakeCategoryRepository>,
    }

    fn fixture() -> Fixture {
        fixture_with(SiteConfig::default())
    }

    fn fixture_with(site: SiteConfig) -> Fixture {
        let category_repo = Arc::new(FakeCategoryRepository::new());
        let categories = Arc::new(CategoryService::new(category_repo.clone()));
        let images = Arc::new(ImageService::new(
            Arc::new(FakeImageStore::new("items")),
            "menu-images",
            1024,
        ));
        let items = Arc::new(ItemService::new(Arc::new(FakeItemRepository::new()), images));
        let menu = Arc::new(MenuService::new(
            categories.clone(),
            items.clone(),
            site,
        ));

        Fixture {
            server: TestServer::new(routes(menu)).unwrap(),
            categories,
            items,
            category_repo,
        }
    }

    #[tokio::test]
    async fn test_cakes_section_shows_cheesecake_price() {
        let f = fixture();

        f.categories
            .create(CategoryRequestDto {
                title: "Hot Drinks".to_string(),
            })
            .await
            .unwrap();
        let cakes = f
            .categories
            .create(CategoryRequestDto {
                title: "Cakes".to_string(),
            })
            .await
            .unwrap();
        f.items
            .create(
                ItemRequestDto {
                    title: "Cheesecake".to_string(),
                    price: Some(Decimal::from(85)),
                    category: cakes.id,
                    ..Default::default()
                },
                None,
            )
            .await
            .unwrap();

        let menu = f
            .server
            .get("/api/menu")
            .await
            .json::<ApiResponse<MenuDto>>()
            .data
            .unwrap();
        let section = menu.sections.iter().find(|s| s.title == "Cakes").unwrap();
        assert_eq!(section.items.len(), 1);
        assert_eq!(section.items[0].title, "Cheesecake");
        assert_eq!(section.items[0].price_label, "85 T");

        let page = f.server.get("/").await;
        page.assert_status_ok();
        let html = page.text();
        let cakes_section = html
            .split(&format!("id=\"category-{}\"", cakes.id))
            .nth(1)
            .unwrap();
        assert!(cakes_section.contains("Cheesecake"));
        assert!(cakes_section.contains("85 T"));
        assert!(html.contains("href=\"#category-1\""));
    }

    #[tokio::test]
    async fn test_backend_failure_renders_alert() {
        let f = fixture();
        f.category_repo.set_failing(true);

        let page = f.server.get("/").await;
        page.assert_status(StatusCode::BAD_GATEWAY);
        assert!(page.text().contains("Failed to fetch data"));

        f.server
            .get("/api/menu")
            .await
            .assert_status(StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn test_page_direction_follows_site_config() {
        let f = fixture();
        assert!(f.server.get("/").await.text().contains("<html lang=\"en\" dir=\"rtl\">"));

        let f = fixture_with(SiteConfig {
            text_direction: "ltr".to_string(),
            ..SiteConfig::default()
        });
        assert!(f.server.get("/").await.text().contains("<html lang=\"en\" dir=\"ltr\">"));
    }
}
