//! Cart service implementation.

use crate::cache::{cache_keys, ttl, CacheExt, CacheInterface};
use crate::cart_service::CartService;
use crate::dto::{AddCartItemRequest, CartResponse};
use async_trait::async_trait;
use shaku::Component;
use std::sync::Arc;
use tracing::{debug, info};
use velora_core::{Cart, CartItem, ProductId, UserId, VeloraError, VeloraResult};
use velora_repository::CartRepository;

/// Cart service backed by a repository with a read-through cache.
///
/// Carts mutate constantly, so every mutation drops the user's cart key and
/// the short TTL covers whatever invalidation misses.
#[derive(Component)]
#[shaku(interface = CartService)]
pub struct CartServiceComponent {
    #[shaku(inject)]
    carts: Arc<dyn CartRepository>,
    #[shaku(inject)]
    cache: Arc<dyn CacheInterface>,
}

impl CartServiceComponent {
    /// Creates a cart service.
    #[must_use]
    pub fn new(carts: Arc<dyn CartRepository>, cache: Arc<dyn CacheInterface>) -> Self {
        Self { carts, cache }
    }
}

#[async_trait]
impl CartService for CartServiceComponent {
    async fn get_cart(&self, user_id: UserId) -> VeloraResult<CartResponse> {
        debug!("Getting cart for user: {}", user_id);

        let key = cache_keys::cart(user_id);
        let repository = self.carts.clone();

        self.cache
            .read_through(&key, ttl::CART, move || async move {
                let cart = repository
                    .find_by_user(user_id)
                    .await?
                    .unwrap_or_else(|| Cart::empty(user_id));
                Ok(CartResponse::from(cart))
            })
            .await
    }

    async fn add_item(&self, user_id: UserId, request: AddCartItemRequest) -> VeloraResult<()> {
        debug!("Adding item to cart for user: {}", user_id);

        if request.quantity == 0 {
            return Err(VeloraError::validation("Quantity must be at least 1"));
        }

        let item = CartItem {
            product_id: request.product_id,
            quantity: request.quantity,
            unit_price_cents: request.unit_price_cents,
        };
        self.carts.upsert_item(user_id, &item).await?;

        let _ = self.cache.delete(&cache_keys::cart(user_id)).await;

        info!("Cart item added for user: {}", user_id);
        Ok(())
    }

    async fn remove_item(&self, user_id: UserId, product_id: ProductId) -> VeloraResult<()> {
        debug!("Removing item from cart for user: {}", user_id);

        let removed = self.carts.remove_item(user_id, product_id).await?;
        if !removed {
            return Err(VeloraError::not_found("CartItem", product_id));
        }

        let _ = self.cache.delete(&cache_keys::cart(user_id)).await;

        info!("Cart item removed for user: {}", user_id);
        Ok(())
    }

    async fn clear_cart(&self, user_id: UserId) -> VeloraResult<()> {
        debug!("Clearing cart for user: {}", user_id);

        self.carts.clear(user_id).await?;

        let _ = self.cache.delete(&cache_keys::cart(user_id)).await;

        info!("Cart cleared for user: {}", user_id);
        Ok(())
    }
}

impl std::fmt::Debug for CartServiceComponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartServiceComponent").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{CacheService, InMemoryBackend};
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;

    struct MockCartRepository {
        carts: Mutex<HashMap<UserId, Cart>>,
        find_calls: AtomicU32,
    }

    impl MockCartRepository {
        fn new() -> Self {
            Self {
                carts: Mutex::new(HashMap::new()),
                find_calls: AtomicU32::new(0),
            }
        }
    }

    #[async_trait]
    impl CartRepository for MockCartRepository {
        async fn find_by_user(&self, user_id: UserId) -> VeloraResult<Option<Cart>> {
            self.find_calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.carts.lock().unwrap().get(&user_id).cloned())
        }

        async fn upsert_item(&self, user_id: UserId, item: &CartItem) -> VeloraResult<()> {
            let mut carts = self.carts.lock().unwrap();
            carts
                .entry(user_id)
                .or_insert_with(|| Cart::empty(user_id))
                .upsert_item(item.clone());
            Ok(())
        }

        async fn remove_item(&self, user_id: UserId, product_id: ProductId) -> VeloraResult<bool> {
            let mut carts = self.carts.lock().unwrap();
            Ok(carts
                .get_mut(&user_id)
                .is_some_and(|cart| cart.remove_item(product_id)))
        }

        async fn clear(&self, user_id: UserId) -> VeloraResult<()> {
            self.carts.lock().unwrap().remove(&user_id);
            Ok(())
        }
    }

    fn create_service(repo: Arc<MockCartRepository>) -> CartServiceComponent {
        let backend = Arc::new(InMemoryBackend::new());
        let cache: Arc<dyn CacheInterface> = Arc::new(CacheService::new(backend));
        CartServiceComponent::new(repo, cache)
    }

    async fn settle() {
        tokio::time::sleep(Duration::from_millis(20)).await;
    }

    #[tokio::test]
    async fn test_empty_cart_for_new_user() {
        let repo = Arc::new(MockCartRepository::new());
        let service = create_service(repo);

        let cart = service.get_cart(UserId::new()).await.unwrap();
        assert!(cart.items.is_empty());
        assert_eq!(cart.total_cents, 0);
    }

    #[tokio::test]
    async fn test_cart_reads_are_cached() {
        let repo = Arc::new(MockCartRepository::new());
        let service = create_service(repo.clone());
        let user_id = UserId::new();

        service.get_cart(user_id).await.unwrap();
        settle().await;
        service.get_cart(user_id).await.unwrap();

        assert_eq!(repo.find_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_add_item_invalidates_cart_cache() {
        let repo = Arc::new(MockCartRepository::new());
        let service = create_service(repo.clone());
        let user_id = UserId::new();

        // Warm the (empty) cart cache.
        service.get_cart(user_id).await.unwrap();
        settle().await;

        service
            .add_item(
                user_id,
                AddCartItemRequest {
                    product_id: ProductId::new(),
                    quantity: 2,
                    unit_price_cents: 150,
                },
            )
            .await
            .unwrap();

        let cart = service.get_cart(user_id).await.unwrap();
        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.total_cents, 300);
        assert_eq!(repo.find_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_remove_missing_item_fails() {
        let repo = Arc::new(MockCartRepository::new());
        let service = create_service(repo);

        let result = service.remove_item(UserId::new(), ProductId::new()).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_zero_quantity_rejected() {
        let repo = Arc::new(MockCartRepository::new());
        let service = create_service(repo);

        let result = service
            .add_item(
                UserId::new(),
                AddCartItemRequest {
                    product_id: ProductId::new(),
                    quantity: 0,
                    unit_price_cents: 100,
                },
            )
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_clear_cart() {
        let repo = Arc::new(MockCartRepository::new());
        let service = create_service(repo);
        let user_id = UserId::new();

        service
            .add_item(
                user_id,
                AddCartItemRequest {
                    product_id: ProductId::new(),
                    quantity: 1,
                    unit_price_cents: 100,
                },
            )
            .await
            .unwrap();

        service.clear_cart(user_id).await.unwrap();

        let cart = service.get_cart(user_id).await.unwrap();
        assert!(cart.items.is_empty());
    }
}
