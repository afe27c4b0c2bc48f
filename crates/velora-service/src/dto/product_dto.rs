//! Product DTOs.

use serde::{Deserialize, Serialize};
use velora_core::{CategoryId, Page, Product, ProductId, ProductStatus};

/// Request to create a product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProductRequest {
    pub name: String,
    pub slug: String,
    pub sku: String,
    pub price_cents: i64,
    pub category_id: Option<CategoryId>,
    pub description: Option<String>,
}

/// Request to update a product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateProductRequest {
    pub name: String,
    pub slug: String,
    pub sku: String,
    pub price_cents: i64,
    pub category_id: Option<CategoryId>,
    pub description: Option<String>,
}

/// Product snapshot returned to callers and stored in the cache.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductResponse {
    pub id: ProductId,
    pub name: String,
    pub slug: String,
    pub sku: String,
    pub price_cents: i64,
    pub category_id: Option<CategoryId>,
    pub description: Option<String>,
    pub status: ProductStatus,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            slug: product.slug,
            sku: product.sku,
            price_cents: product.price_cents,
            category_id: product.category_id,
            description: product.description,
            status: product.status,
        }
    }
}

/// A page of products.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductListResponse {
    pub products: Vec<ProductResponse>,
    pub page: usize,
    pub size: usize,
    pub total_elements: u64,
    pub total_pages: u64,
}

impl From<Page<Product>> for ProductListResponse {
    fn from(page: Page<Product>) -> Self {
        let mapped = page.map(ProductResponse::from);
        Self {
            products: mapped.content,
            page: mapped.page,
            size: mapped.size,
            total_elements: mapped.total_elements,
            total_pages: mapped.total_pages,
        }
    }
}
