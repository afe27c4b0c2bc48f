//! Product service implementation.

use crate::cache::{cache_keys, ttl, CacheExt, CacheInterface};
use crate::dto::{
    CreateProductRequest, ProductListResponse, ProductResponse, UpdateProductRequest,
};
use crate::product_service::ProductService;
use async_trait::async_trait;
use shaku::Component;
use std::sync::Arc;
use tracing::{debug, info};
use velora_core::{Product, ProductFilter, ProductId, VeloraError, VeloraResult};
use velora_repository::ProductRepository;

/// Product service backed by a repository with a read-through cache.
#[derive(Component)]
#[shaku(interface = ProductService)]
pub struct ProductServiceComponent {
    #[shaku(inject)]
    products: Arc<dyn ProductRepository>,
    #[shaku(inject)]
    cache: Arc<dyn CacheInterface>,
}

impl ProductServiceComponent {
    /// Creates a product service.
    #[must_use]
    pub fn new(products: Arc<dyn ProductRepository>, cache: Arc<dyn CacheInterface>) -> Self {
        Self { products, cache }
    }

    fn validate(name: &str, slug: &str, sku: &str, price_cents: i64) -> VeloraResult<()> {
        if name.trim().is_empty() || slug.trim().is_empty() || sku.trim().is_empty() {
            return Err(VeloraError::validation(
                "Product name, slug, and SKU are required",
            ));
        }
        if price_cents <= 0 {
            return Err(VeloraError::validation("Product price must be positive"));
        }
        Ok(())
    }

    /// Drops every cache entry that could now be stale after a write to one
    /// product: its snapshot, its derived aggregates, and all list caches.
    async fn invalidate_product(&self, id: ProductId) {
        let _ = self.cache.delete(&cache_keys::product(id)).await;
        let _ = self
            .cache
            .delete_by_pattern(&cache_keys::product_detail_pattern(id))
            .await;
        let _ = self
            .cache
            .delete_by_pattern(&cache_keys::products_pattern())
            .await;
    }
}

#[async_trait]
impl ProductService for ProductServiceComponent {
    async fn get_product(&self, id: ProductId) -> VeloraResult<ProductResponse> {
        debug!("Getting product: {}", id);

        let key = cache_keys::product(id);
        let repository = self.products.clone();

        self.cache
            .read_through(&key, ttl::PRODUCTS, move || async move {
                let product = repository
                    .find_by_id(id)
                    .await?
                    .ok_or_else(|| VeloraError::not_found("Product", id))?;
                Ok(ProductResponse::from(product))
            })
            .await
    }

    async fn list_products(&self, filter: ProductFilter) -> VeloraResult<ProductListResponse> {
        debug!("Listing products, page: {}", filter.page);

        let key = cache_keys::products(&filter);
        let repository = self.products.clone();

        self.cache
            .read_through(&key, ttl::PRODUCTS, move || async move {
                let page = repository.find_all(&filter).await?;
                Ok(ProductListResponse::from(page))
            })
            .await
    }

    async fn create_product(&self, request: CreateProductRequest) -> VeloraResult<ProductResponse> {
        debug!("Creating product: {}", request.name);

        Self::validate(&request.name, &request.slug, &request.sku, request.price_cents)?;

        let product = Product::new(
            request.name,
            request.slug,
            request.sku,
            request.price_cents,
            request.category_id,
            request.description,
        );

        let saved = self.products.save(&product).await?;

        // A new product can appear in any list cache; sweep them after the
        // write is durable.
        let _ = self
            .cache
            .delete_by_pattern(&cache_keys::products_pattern())
            .await;

        info!("Product created: {}", saved.id);
        Ok(ProductResponse::from(saved))
    }

    async fn update_product(
        &self,
        id: ProductId,
        request: UpdateProductRequest,
    ) -> VeloraResult<ProductResponse> {
        debug!("Updating product: {}", id);

        Self::validate(&request.name, &request.slug, &request.sku, request.price_cents)?;

        let mut product = self
            .products
            .find_by_id(id)
            .await?
            .ok_or_else(|| VeloraError::not_found("Product", id))?;

        product.apply_update(
            request.name,
            request.slug,
            request.sku,
            request.price_cents,
            request.category_id,
            request.description,
        );

        let updated = self.products.update(&product).await?;

        self.invalidate_product(id).await;

        info!("Product updated: {}", id);
        Ok(ProductResponse::from(updated))
    }

    async fn delete_product(&self, id: ProductId) -> VeloraResult<()> {
        debug!("Deleting product: {}", id);

        let deleted = self.products.delete(id).await?;
        if !deleted {
            return Err(VeloraError::not_found("Product", id));
        }

        self.invalidate_product(id).await;

        info!("Product deleted: {}", id);
        Ok(())
    }
}

impl std::fmt::Debug for ProductServiceComponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProductServiceComponent").finish_non_exhaustive()
    }
}
