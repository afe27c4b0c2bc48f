//! Product service trait definition.

use crate::dto::{
    CreateProductRequest, ProductListResponse, ProductResponse, UpdateProductRequest,
};
use async_trait::async_trait;
use velora_core::{Interface, ProductFilter, ProductId, VeloraResult};

/// Product catalog service.
#[async_trait]
pub trait ProductService: Interface + Send + Sync {
    /// Gets a product by ID.
    async fn get_product(&self, id: ProductId) -> VeloraResult<ProductResponse>;

    /// Lists products matching a filter.
    async fn list_products(&self, filter: ProductFilter) -> VeloraResult<ProductListResponse>;

    /// Creates a new product.
    async fn create_product(&self, request: CreateProductRequest) -> VeloraResult<ProductResponse>;

    /// Updates an existing product.
    async fn update_product(
        &self,
        id: ProductId,
        request: UpdateProductRequest,
    ) -> VeloraResult<ProductResponse>;

    /// Deletes a product.
    async fn delete_product(&self, id: ProductId) -> VeloraResult<()>;
}
