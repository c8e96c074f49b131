use axum::http::StatusCode;
use serde_json::json;
use std::sync::Arc;

use crate::core::config::SiteConfig;
use crate::core::error::{AppError, Result};
use crate::features::admin::dtos::{
    AdminQuery, AdminTab, CategoryForm, CategoryFormView, ItemForm, ItemFormView, ItemRowView,
};
use crate::features::admin::services::CatalogView;
use crate::features::categories::dtos::CategoryRequestDto;
use crate::features::categories::CategoryService;
use crate::features::items::ItemService;
use crate::features::menu::services::price_label;
use crate::shared::constants::{
    MSG_ADD_CATEGORY_FAILED, MSG_DELETE_CATEGORY_FAILED, MSG_DELETE_ITEM_FAILED, MSG_FETCH_FAILED,
    MSG_SAVE_ITEM_FAILED, MSG_UPDATE_CATEGORY_FAILED,
};
use crate::shared::templates::render_page;

/// Everything the panel template needs for one response
#[derive(Debug, Clone)]
pub struct AdminPage {
    pub tab: AdminTab,
    pub view: CatalogView,
    pub status: StatusCode,
    pub alerts: Vec<String>,
    pub warnings: Vec<String>,
    pub notice: Option<String>,
    pub category_form: Option<CategoryFormView>,
    pub item_form: Option<ItemFormView>,
}

impl AdminPage {
    fn new(tab: AdminTab, view: CatalogView) -> Self {
        Self {
            tab,
            view,
            status: StatusCode::OK,
            alerts: Vec::new(),
            warnings: Vec::new(),
            notice: None,
            category_form: None,
            item_form: None,
        }
    }

    /// Record a failed operation
    ///
    /// Validation messages are shown as is; anything else gets the
    /// operation's generic message and the details go to the log.
    fn fail(&mut self, error: &AppError, message: &str) {
        self.status = error.status_code();
        self.alerts.push(match error {
            AppError::Validation(msg) => msg.clone(),
            _ => message.to_string(),
        });
    }
}

/// Drives the admin panel on top of the category and item services
pub struct AdminService {
    categories: Arc<CategoryService>,
    items: Arc<ItemService>,
    site: SiteConfig,
}

impl AdminService {
    pub fn new(categories: Arc<CategoryService>, items: Arc<ItemService>, site: SiteConfig) -> Self {
        Self {
            categories,
            items,
            site,
        }
    }

    /// Panel for `GET /admin`, with the requested form open
    pub async fn open(&self, query: &AdminQuery) -> AdminPage {
        let mut page = self.load(query.tab).await;
        let creating = query.new.is_some();

        match query.tab {
            AdminTab::Categories => {
                page.category_form = if creating {
                    Some(CategoryFormView::default())
                } else {
                    query
                        .edit
                        .and_then(|id| page.view.category(id))
                        .map(|c| CategoryFormView {
                            id: Some(c.id),
                            title: c.title.clone(),
                        })
                };
            }
            AdminTab::Items => {
                page.item_form = if creating {
                    Some(ItemFormView {
                        category: page.view.categories.first().map_or(0, |c| c.id),
                        ..ItemFormView::default()
                    })
                } else {
                    query
                        .edit
                        .and_then(|id| page.view.item(id))
                        .map(|i| ItemFormView {
                            id: Some(i.id),
                            title: i.title.clone(),
                            description: i.description.clone(),
                            price: i.price.normalize().to_string(),
                            image_path: i.image_path.clone(),
                            category: i.category,
                        })
                };
            }
        }

        page
    }

    pub async fn create_category(&self, form: CategoryForm) -> AdminPage {
        let mut page = self.load(AdminTab::Categories).await;

        let dto = CategoryRequestDto {
            title: form.title.clone(),
        };
        match self.categories.create(dto).await {
            Ok(category) => {
                page.notice = Some(format!("Category \"{}\" added", category.title));
                page.view.apply_category_created(category);
            }
            Err(e) => {
                page.fail(&e, MSG_ADD_CATEGORY_FAILED);
                page.category_form = Some(CategoryFormView {
                    id: None,
                    title: form.title,
                });
            }
        }

        page
    }

    pub async fn update_category(&self, id: i64, form: CategoryForm) -> AdminPage {
        let mut page = self.load(AdminTab::Categories).await;

        let dto = CategoryRequestDto {
            title: form.title.clone(),
        };
        match self.categories.update(id, dto).await {
            Ok(category) => {
                page.notice = Some(format!("Category \"{}\" updated", category.title));
                page.view.apply_category_updated(category);
            }
            Err(e) => {
                page.fail(&e, MSG_UPDATE_CATEGORY_FAILED);
                page.category_form = Some(CategoryFormView {
                    id: Some(id),
                    title: form.title,
                });
            }
        }

        page
    }

    pub async fn delete_category(&self, id: i64) -> AdminPage {
        let mut page = self.load(AdminTab::Categories).await;

        match self.categories.delete(id).await {
            Ok(category) => {
                page.notice = Some(format!("Category \"{}\" deleted", category.title));
                page.view.apply_category_removed(category.id);
            }
            Err(e) => page.fail(&e, MSG_DELETE_CATEGORY_FAILED),
        }

        page
    }

    /// Create (`id` = `None`) or update an item from the panel form
    pub async fn save_item(&self, id: Option<i64>, form: ItemForm) -> AdminPage {
        let mut page = self.load(AdminTab::Items).await;
        let form_view = Self::item_form_view(id, &form);

        let result = match form.into_request() {
            Ok((dto, image)) => match id {
                None => self.items.create(dto, image).await,
                Some(id) => self.items.update(id, dto, image).await,
            },
            Err(e) => Err(e),
        };

        match result {
            Ok(saved) => {
                if let Some(warning) = saved.warning {
                    page.warnings.push(warning);
                }
                page.notice = Some(format!("Item \"{}\" saved", saved.item.title));
                match id {
                    None => page.view.apply_item_created(saved.item),
                    Some(_) => page.view.apply_item_updated(saved.item),
                }
            }
            Err(e) => {
                page.fail(&e, MSG_SAVE_ITEM_FAILED);
                page.item_form = Some(form_view);
            }
        }

        page
    }

    pub async fn delete_item(&self, id: i64) -> AdminPage {
        let mut page = self.load(AdminTab::Items).await;

        match self.items.delete(id).await {
            Ok(item) => {
                page.notice = Some(format!("Item \"{}\" deleted", item.title));
                page.view.apply_item_removed(item.id);
            }
            Err(e) => page.fail(&e, MSG_DELETE_ITEM_FAILED),
        }

        page
    }

    pub fn render(&self, page: &AdminPage) -> Result<String> {
        let categories: Vec<_> = page
            .view
            .categories
            .iter()
            .map(|c| {
                json!({
                    "id": c.id,
                    "title": c.title,
                    "created_at": c.created_at.format("%Y-%m-%d %H:%M").to_string(),
                })
            })
            .collect();

        let items: Vec<ItemRowView> = page
            .view
            .items
            .iter()
            .map(|i| ItemRowView {
                id: i.id,
                title: i.title.clone(),
                description: i.description.clone(),
                price_label: price_label(i.price, &self.site.currency_suffix),
                image_path: i.image_path.clone(),
                category_title: page.view.category_title(i.category).to_string(),
            })
            .collect();

        let ctx = json!({
            "site_title": self.site.title,
            "dir": self.site.text_direction,
            "tab": page.tab,
            "categories": categories,
            "items": items,
            "alerts": page.alerts,
            "warnings": page.warnings,
            "notice": page.notice,
            "category_form": page.category_form,
            "item_form": page.item_form,
        });

        Ok(render_page("admin.html", ctx)?)
    }

    async fn load(&self, tab: AdminTab) -> AdminPage {
        match CatalogView::load(&self.categories, &self.items).await {
            Ok(view) => AdminPage::new(tab, view),
            Err(e) => {
                tracing::error!("Error fetching data: {}", e);
                let mut page = AdminPage::new(tab, CatalogView::default());
                page.fail(&e, MSG_FETCH_FAILED);
                page
            }
        }
    }

    fn item_form_view(id: Option<i64>, form: &ItemForm) -> ItemFormView {
        ItemFormView {
            id,
            title: form.title.clone(),
            description: form.description.clone(),
            price: form.price.clone(),
            image_path: form
                .image_path
                .clone()
                .or_else(|| form.current_image_path.clone())
                .unwrap_or_default(),
            category: form.category.trim().parse().unwrap_or(0),
        }
    }
}
