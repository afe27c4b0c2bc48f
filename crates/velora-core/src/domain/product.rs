//! Product entity and query filter.

use crate::{CategoryId, ProductId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle status of a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductStatus {
    /// Visible in the catalog.
    Active,
    /// Hidden from the catalog but kept for existing orders.
    Inactive,
    /// Soft-deleted.
    Deleted,
}

/// A catalog product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Product ID.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// URL slug, unique within the catalog.
    pub slug: String,
    /// Stock-keeping unit, unique within the catalog.
    pub sku: String,
    /// Price in the smallest currency unit.
    pub price_cents: i64,
    /// Owning category.
    pub category_id: Option<CategoryId>,
    /// Optional long description.
    pub description: Option<String>,
    /// Lifecycle status.
    pub status: ProductStatus,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Creates a new active product.
    #[must_use]
    pub fn new(
        name: String,
        slug: String,
        sku: String,
        price_cents: i64,
        category_id: Option<CategoryId>,
        description: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: ProductId::new(),
            name,
            slug,
            sku,
            price_cents,
            category_id,
            description,
            status: ProductStatus::Active,
            created_at: now,
            updated_at: now,
        }
    }

    /// Applies a catalog update, bumping the update timestamp.
    pub fn apply_update(
        &mut self,
        name: String,
        slug: String,
        sku: String,
        price_cents: i64,
        category_id: Option<CategoryId>,
        description: Option<String>,
    ) {
        self.name = name;
        self.slug = slug;
        self.sku = sku;
        self.price_cents = price_cents;
        self.category_id = category_id;
        self.description = description;
        self.updated_at = Utc::now();
    }

    /// Marks the product as soft-deleted.
    pub fn mark_deleted(&mut self) {
        self.status = ProductStatus::Deleted;
        self.updated_at = Utc::now();
    }
}

/// Query filter for product list endpoints.
///
/// The filter is also the input to the cache key fingerprint, so field
/// names here are part of the cache key contract.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductFilter {
    /// Restrict to a category.
    pub category: Option<CategoryId>,
    /// Minimum price in cents, inclusive.
    pub min_price_cents: Option<i64>,
    /// Maximum price in cents, inclusive.
    pub max_price_cents: Option<i64>,
    /// Free-text search over name and description.
    pub search: Option<String>,
    /// Sort order (e.g. `price_asc`, `newest`).
    pub sort: Option<String>,
    /// Page number (0-indexed).
    pub page: usize,
    /// Page size.
    pub limit: usize,
}

impl ProductFilter {
    /// Creates a filter with default paging.
    #[must_use]
    pub fn with_paging(page: usize, limit: usize) -> Self {
        Self {
            page,
            limit,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_product_is_active() {
        let product = Product::new(
            "Silk Saree".to_string(),
            "silk-saree".to_string(),
            "SAR-001".to_string(),
            499_00,
            None,
            None,
        );
        assert_eq!(product.status, ProductStatus::Active);
        assert_eq!(product.price_cents, 499_00);
    }

    #[test]
    fn test_apply_update_bumps_timestamp() {
        let mut product = Product::new(
            "Silk Saree".to_string(),
            "silk-saree".to_string(),
            "SAR-001".to_string(),
            499_00,
            None,
            None,
        );
        let before = product.updated_at;
        product.apply_update(
            "Cotton Saree".to_string(),
            "cotton-saree".to_string(),
            "SAR-002".to_string(),
            299_00,
            None,
            Some("Lightweight".to_string()),
        );
        assert_eq!(product.name, "Cotton Saree");
        assert!(product.updated_at >= before);
    }

    #[test]
    fn test_mark_deleted() {
        let mut product = Product::new(
            "Silk Saree".to_string(),
            "silk-saree".to_string(),
            "SAR-001".to_string(),
            499_00,
            None,
            None,
        );
        product.mark_deleted();
        assert_eq!(product.status, ProductStatus::Deleted);
    }
}
