//! # Velora Repository
//!
//! Data access layer for the Velora commerce backend.
//!
//! ```text
//! Service
//!   ↓  Arc<dyn ProductRepository> / CategoryRepository / ...  (domain interface)
//! MySqlProductRepository / ...   (MySQL / SQLx implementations)
//!   ↓
//! MySQL
//! ```

pub mod mysql;
pub mod pool;
pub mod traits;

pub use mysql::*;
pub use pool::*;
pub use traits::*;

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use velora_core::{
        Cart, CartItem, Page, Product, ProductFilter, ProductId, UserId, VeloraResult,
    };

    /// In-memory mock repository exercising the trait contract.
    struct InMemoryProductRepository {
        products: Mutex<HashMap<ProductId, Product>>,
    }

    impl InMemoryProductRepository {
        fn new() -> Self {
            Self {
                products: Mutex::new(HashMap::new()),
            }
        }
    }

    #[async_trait]
    impl ProductRepository for InMemoryProductRepository {
        async fn find_by_id(&self, id: ProductId) -> VeloraResult<Option<Product>> {
            Ok(self.products.lock().unwrap().get(&id).cloned())
        }

        async fn find_all(&self, filter: &ProductFilter) -> VeloraResult<Page<Product>> {
            let products: Vec<Product> = self
                .products
                .lock()
                .unwrap()
                .values()
                .filter(|p| {
                    filter
                        .category
                        .map_or(true, |c| p.category_id == Some(c))
                })
                .cloned()
                .collect();
            let total = products.len() as u64;
            let limit = if filter.limit == 0 { 20 } else { filter.limit };
            Ok(Page::new(products, filter.page, limit, total))
        }

        async fn save(&self, product: &Product) -> VeloraResult<Product> {
            self.products
                .lock()
                .unwrap()
                .insert(product.id, product.clone());
            Ok(product.clone())
        }

        async fn update(&self, product: &Product) -> VeloraResult<Product> {
            self.products
                .lock()
                .unwrap()
                .insert(product.id, product.clone());
            Ok(product.clone())
        }

        async fn delete(&self, id: ProductId) -> VeloraResult<bool> {
            Ok(self.products.lock().unwrap().remove(&id).is_some())
        }
    }

    fn test_product(name: &str) -> Product {
        Product::new(
            name.to_string(),
            name.to_lowercase().replace(' ', "-"),
            format!("SKU-{}", name.len()),
            199_00,
            None,
            None,
        )
    }

    #[tokio::test]
    async fn test_save_and_find_by_id() {
        let repo = InMemoryProductRepository::new();
        let product = test_product("Silk Saree");
        let id = product.id;

        repo.save(&product).await.unwrap();

        let found = repo.find_by_id(id).await.unwrap();
        assert!(found.is_some());
        assert_eq!(found.unwrap().name, "Silk Saree");
    }

    #[tokio::test]
    async fn test_find_by_id_not_found() {
        let repo = InMemoryProductRepository::new();
        let result = repo.find_by_id(ProductId::new()).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_delete_product() {
        let repo = InMemoryProductRepository::new();
        let product = test_product("Silk Saree");
        let id = product.id;
        repo.save(&product).await.unwrap();

        assert!(repo.delete(id).await.unwrap());
        assert!(!repo.delete(id).await.unwrap());
        assert!(repo.find_by_id(id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_find_all_counts_total() {
        let repo = InMemoryProductRepository::new();
        repo.save(&test_product("One")).await.unwrap();
        repo.save(&test_product("Two")).await.unwrap();

        let page = repo.find_all(&ProductFilter::default()).await.unwrap();
        assert_eq!(page.total_elements, 2);
    }

    #[test]
    fn test_cart_assembly_from_rows() {
        // Mirrors how MySqlCartRepository folds line rows into a Cart.
        let user_id = UserId::new();
        let mut cart = Cart::empty(user_id);
        cart.upsert_item(CartItem {
            product_id: ProductId::new(),
            quantity: 2,
            unit_price_cents: 100,
        });
        assert_eq!(cart.total_cents(), 200);
        assert_eq!(cart.user_id, user_id);
    }
}
