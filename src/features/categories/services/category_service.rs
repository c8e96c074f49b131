use std::sync::Arc;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::features::categories::dtos::CategoryRequestDto;
use crate::features::categories::models::Category;
use crate::features::categories::repositories::CategoryRepository;
use crate::shared::constants::MSG_CATEGORY_TITLE_REQUIRED;
use crate::shared::validation::is_blank;

/// Service for category operations
pub struct CategoryService {
    repository: Arc<dyn CategoryRepository>,
}

impl CategoryService {
    pub fn new(repository: Arc<dyn CategoryRepository>) -> Self {
        Self { repository }
    }

    /// List all categories ordered by id
    pub async fn list(&self) -> Result<Vec<Category>> {
        self.repository.list().await.map_err(|e| {
            tracing::error!("Error fetching categories: {}", e);
            e
        })
    }

    pub async fn create(&self, dto: CategoryRequestDto) -> Result<Category> {
        let title = Self::validated_title(&dto)?;

        let category = self.repository.insert(&title).await.map_err(|e| {
            tracing::error!("Error adding category: {}", e);
            e
        })?;

        tracing::info!("Created category {} ({})", category.id, category.title);
        Ok(category)
    }

    pub async fn update(&self, id: i64, dto: CategoryRequestDto) -> Result<Category> {
        let title = Self::validated_title(&dto)?;

        let category = self.repository.update(id, &title).await.map_err(|e| {
            tracing::error!("Error updating category {}: {}", id, e);
            e
        })?;

        tracing::info!("Updated category {} ({})", category.id, category.title);
        Ok(category)
    }

    /// Delete a category and return the removed row
    ///
    /// Items pointing at the category are left as they are.
    pub async fn delete(&self, id: i64) -> Result<Category> {
        let category = self.repository.delete(id).await.map_err(|e| {
            tracing::error!("Error deleting category {}: {}", id, e);
            e
        })?;

        tracing::info!("Deleted category {} ({})", category.id, category.title);
        Ok(category)
    }

    fn validated_title(dto: &CategoryRequestDto) -> Result<String> {
        if is_blank(&dto.title) {
            return Err(AppError::Validation(MSG_CATEGORY_TITLE_REQUIRED.to_string()));
        }

        dto.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        Ok(dto.title.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::FakeCategoryRepository;
    use fake::faker::lorem::en::Word;
    use fake::Fake;

    fn service() -> (CategoryService, Arc<FakeCategoryRepository>) {
        let repo = Arc::new(FakeCategoryRepository::new());
        (CategoryService::new(repo.clone()), repo)
    }

    fn dto(title: &str) -> CategoryRequestDto {
        CategoryRequestDto {
            title: title.to_string(),
        }
    }

    #[tokio::test]
    async fn test_created_ids_increase() {
        let (service, _) = service();

        let mut last_id = 0;
        for _ in 0..5 {
            let title: String = Word().fake();
            let category = service.create(dto(&title)).await.unwrap();
            assert!(category.id > last_id);
            assert_eq!(category.title, title);
            last_id = category.id;
        }

        let ids: Vec<i64> = service.list().await.unwrap().iter().map(|c| c.id).collect();
        let mut sorted = ids.clone();
        sorted.sort();
        assert_eq!(ids, sorted);
    }

    #[tokio::test]
    async fn test_create_trims_title() {
        let (service, _) = service();
        let category = service.create(dto("  Cakes  ")).await.unwrap();
        assert_eq!(category.title, "Cakes");
    }

    #[tokio::test]
    async fn test_blank_title_makes_no_backend_call() {
        let (service, repo) = service();

        let err = service.create(dto("   ")).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        let err = service.update(1, dto("")).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        assert_eq!(repo.call_count(), 0);
    }

    #[tokio::test]
    async fn test_update_missing_id_is_not_found() {
        let (service, _) = service();
        let err = service.update(99, dto("Tea")).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_backend_failure_is_propagated() {
        let (service, repo) = service();
        repo.set_failing(true);

        let err = service.create(dto("Cakes")).await.unwrap_err();
        assert!(matches!(err, AppError::Backend(_)));
        repo.set_failing(false);
        assert!(service.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_returns_removed_row() {
        let (service, _) = service();
        let created = service.create(dto("Drinks")).await.unwrap();

        let deleted = service.delete(created.id).await.unwrap();
        assert_eq!(deleted, created);
        assert!(service.list().await.unwrap().is_empty());
    }
}
