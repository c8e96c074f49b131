use async_trait::async_trait;

use crate::core::error::Result;
use crate::features::categories::models::Category;

/// Persistence seam for categories
///
/// Every write returns the row as stored by the backend. `update` and
/// `delete` fail with `NotFound` when no row has the given id.
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// All categories, ascending by id
    async fn list(&self) -> Result<Vec<Category>>;

    async fn insert(&self, title: &str) -> Result<Category>;

    async fn update(&self, id: i64, title: &str) -> Result<Category>;

    /// Returns the deleted row
    async fn delete(&self, id: i64) -> Result<Category>;
}
