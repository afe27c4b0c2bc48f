//! Category service trait definition.

use crate::dto::{CategoryResponse, CreateCategoryRequest, UpdateCategoryRequest};
use async_trait::async_trait;
use velora_core::{CategoryId, Interface, VeloraResult};

/// Category taxonomy service.
#[async_trait]
pub trait CategoryService: Interface + Send + Sync {
    /// Lists all categories.
    async fn list_categories(&self) -> VeloraResult<Vec<CategoryResponse>>;

    /// Counts active products in a category.
    async fn product_count(&self, id: CategoryId) -> VeloraResult<u64>;

    /// Creates a new category.
    async fn create_category(
        &self,
        request: CreateCategoryRequest,
    ) -> VeloraResult<CategoryResponse>;

    /// Renames an existing category.
    async fn update_category(
        &self,
        id: CategoryId,
        request: UpdateCategoryRequest,
    ) -> VeloraResult<CategoryResponse>;

    /// Deletes a category.
    async fn delete_category(&self, id: CategoryId) -> VeloraResult<()>;
}
