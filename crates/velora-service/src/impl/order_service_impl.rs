//! Order service implementation.

use crate::cache::{cache_keys, ttl, CacheExt, CacheInterface};
use crate::dto::OrderResponse;
use crate::order_service::OrderService;
use async_trait::async_trait;
use shaku::Component;
use std::sync::Arc;
use tracing::{debug, info};
use velora_core::{Order, OrderId, OrderStatus, UserId, VeloraError, VeloraResult};
use velora_repository::{CartRepository, OrderRepository};

/// Order service backed by repositories with a read-through cache.
#[derive(Component)]
#[shaku(interface = OrderService)]
pub struct OrderServiceComponent {
    #[shaku(inject)]
    orders: Arc<dyn OrderRepository>,
    #[shaku(inject)]
    carts: Arc<dyn CartRepository>,
    #[shaku(inject)]
    cache: Arc<dyn CacheInterface>,
}

impl OrderServiceComponent {
    /// Creates an order service.
    #[must_use]
    pub fn new(
        orders: Arc<dyn OrderRepository>,
        carts: Arc<dyn CartRepository>,
        cache: Arc<dyn CacheInterface>,
    ) -> Self {
        Self {
            orders,
            carts,
            cache,
        }
    }
}

#[async_trait]
impl OrderService for OrderServiceComponent {
    async fn get_order(&self, id: OrderId) -> VeloraResult<OrderResponse> {
        debug!("Getting order: {}", id);

        let key = cache_keys::order(id);
        let repository = self.orders.clone();

        self.cache
            .read_through(&key, ttl::ORDERS, move || async move {
                let order = repository
                    .find_by_id(id)
                    .await?
                    .ok_or_else(|| VeloraError::not_found("Order", id))?;
                Ok(OrderResponse::from(order))
            })
            .await
    }

    async fn list_orders(&self, user_id: UserId) -> VeloraResult<Vec<OrderResponse>> {
        debug!("Listing orders for user: {}", user_id);

        let key = cache_keys::orders(user_id);
        let repository = self.orders.clone();

        self.cache
            .read_through(&key, ttl::ORDERS, move || async move {
                let orders = repository.find_by_user(user_id).await?;
                Ok(orders.into_iter().map(OrderResponse::from).collect::<Vec<_>>())
            })
            .await
    }

    async fn place_order(&self, user_id: UserId) -> VeloraResult<OrderResponse> {
        debug!("Placing order for user: {}", user_id);

        let cart = self
            .carts
            .find_by_user(user_id)
            .await?
            .filter(|cart| !cart.is_empty())
            .ok_or_else(|| VeloraError::validation("Cannot place an order from an empty cart"))?;

        let order = Order::from_cart(&cart);
        let saved = self.orders.save(&order).await?;

        // Checkout consumes the cart.
        self.carts.clear(user_id).await?;

        // Both the order list and the cart snapshot are stale now.
        let _ = self.cache.delete(&cache_keys::orders(user_id)).await;
        let _ = self.cache.delete(&cache_keys::cart(user_id)).await;

        info!("Order placed: {} for user {}", saved.id, user_id);
        Ok(OrderResponse::from(saved))
    }

    async fn update_status(&self, id: OrderId, status: OrderStatus) -> VeloraResult<OrderResponse> {
        debug!("Updating order status: {} -> {:?}", id, status);

        let mut order = self
            .orders
            .find_by_id(id)
            .await?
            .ok_or_else(|| VeloraError::not_found("Order", id))?;

        order.transition_to(status)?;

        let updated = self.orders.update_status(id, status).await?;
        if !updated {
            return Err(VeloraError::not_found("Order", id));
        }

        let _ = self.cache.delete(&cache_keys::order(id)).await;
        let _ = self.cache.delete(&cache_keys::orders(order.user_id)).await;

        info!("Order status updated: {} -> {:?}", id, status);
        Ok(OrderResponse::from(order))
    }
}

impl std::fmt::Debug for OrderServiceComponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrderServiceComponent").finish_non_exhaustive()
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
    use velora_core::{Cart, CartItem, ProductId};

    struct MockOrderRepository {
        orders: Mutex<HashMap<OrderId, Order>>,
        find_by_user_calls: AtomicU32,
    }

    impl MockOrderRepository {
        fn new() -> Self {
            Self {
                orders: Mutex::new(HashMap::new()),
                find_by_user_calls: AtomicU32::new(0),
            }
        }
    }

    #[async_trait]
    impl OrderRepository for MockOrderRepository {
        async fn find_by_id(&self, id: OrderId) -> VeloraResult<Option<Order>> {
            Ok(self.orders.lock().unwrap().get(&id).cloned())
        }

        async fn find_by_user(&self, user_id: UserId) -> VeloraResult<Vec<Order>> {
            self.find_by_user_calls.fetch_add(1, Ordering::SeqCst);
            Ok(self
                .orders
                .lock()
                .unwrap()
                .values()
                .filter(|o| o.user_id == user_id)
                .cloned()
                .collect())
        }

        async fn save(&self, order: &Order) -> VeloraResult<Order> {
            self.orders.lock().unwrap().insert(order.id, order.clone());
            Ok(order.clone())
        }

        async fn update_status(&self, id: OrderId, status: OrderStatus) -> VeloraResult<bool> {
            let mut orders = self.orders.lock().unwrap();
            match orders.get_mut(&id) {
                Some(order) => {
                    order.status = status;
                    Ok(true)
                }
                None => Ok(false),
            }
        }
    }

    struct MockCartRepository {
        carts: Mutex<HashMap<UserId, Cart>>,
    }

    impl MockCartRepository {
        fn new() -> Self {
            Self {
                carts: Mutex::new(HashMap::new()),
            }
        }

        fn with_cart(cart: Cart) -> Self {
            let repo = Self::new();
            repo.carts.lock().unwrap().insert(cart.user_id, cart);
            repo
        }
    }

    #[async_trait]
    impl CartRepository for MockCartRepository {
        async fn find_by_user(&self, user_id: UserId) -> VeloraResult<Option<Cart>> {
            Ok(self.carts.lock().unwrap().get(&user_id).cloned())
        }

        async fn upsert_item(&self, user_id: UserId, item: &CartItem) -> VeloraResult<()> {
            self.carts
                .lock()
                .unwrap()
                .entry(user_id)
                .or_insert_with(|| Cart::empty(user_id))
                .upsert_item(item.clone());
            Ok(())
        }

        async fn remove_item(&self, user_id: UserId, product_id: ProductId) -> VeloraResult<bool> {
            Ok(self
                .carts
                .lock()
                .unwrap()
                .get_mut(&user_id)
                .is_some_and(|cart| cart.remove_item(product_id)))
        }

        async fn clear(&self, user_id: UserId) -> VeloraResult<()> {
            self.carts.lock().unwrap().remove(&user_id);
            Ok(())
        }
    }

    fn filled_cart(user_id: UserId) -> Cart {
        let mut cart = Cart::empty(user_id);
        cart.upsert_item(CartItem {
            product_id: ProductId::new(),
            quantity: 2,
            unit_price_cents: 250,
        });
        cart
    }

    fn create_service(
        orders: Arc<MockOrderRepository>,
        carts: Arc<MockCartRepository>,
    ) -> OrderServiceComponent {
        let backend = Arc::new(InMemoryBackend::new());
        let cache: Arc<dyn CacheInterface> = Arc::new(CacheService::new(backend));
        OrderServiceComponent::new(orders, carts, cache)
    }

    async fn settle() {
        tokio::time::sleep(Duration::from_millis(20)).await;
    }

    #[tokio::test]
    async fn test_place_order_from_cart() {
        let user_id = UserId::new();
        let orders = Arc::new(MockOrderRepository::new());
        let carts = Arc::new(MockCartRepository::with_cart(filled_cart(user_id)));
        let service = create_service(orders, carts.clone());

        let order = service.place_order(user_id).await.unwrap();

        assert_eq!(order.total_cents, 500);
        assert_eq!(order.status, OrderStatus::Pending);
        // Checkout consumed the cart.
        assert!(carts.find_by_user(user_id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_place_order_with_empty_cart_fails() {
        let orders = Arc::new(MockOrderRepository::new());
        let carts = Arc::new(MockCartRepository::new());
        let service = create_service(orders, carts);

        let result = service.place_order(UserId::new()).await;
        match result {
            Err(VeloraError::Validation(_)) => {}
            other => panic!("expected Validation error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_place_order_invalidates_order_list() {
        let user_id = UserId::new();
        let orders = Arc::new(MockOrderRepository::new());
        let carts = Arc::new(MockCartRepository::with_cart(filled_cart(user_id)));
        let service = create_service(orders.clone(), carts);

        // Warm the (empty) order list cache.
        assert!(service.list_orders(user_id).await.unwrap().is_empty());
        settle().await;

        service.place_order(user_id).await.unwrap();

        let listing = service.list_orders(user_id).await.unwrap();
        assert_eq!(listing.len(), 1);
        assert_eq!(orders.find_by_user_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_get_order_not_found() {
        let orders = Arc::new(MockOrderRepository::new());
        let carts = Arc::new(MockCartRepository::new());
        let service = create_service(orders, carts);

        assert!(service.get_order(OrderId::new()).await.is_err());
    }

    #[tokio::test]
    async fn test_update_status_follows_transitions() {
        let user_id = UserId::new();
        let orders = Arc::new(MockOrderRepository::new());
        let carts = Arc::new(MockCartRepository::with_cart(filled_cart(user_id)));
        let service = create_service(orders, carts);

        let order = service.place_order(user_id).await.unwrap();

        let updated = service
            .update_status(order.id, OrderStatus::Paid)
            .await
            .unwrap();
        assert_eq!(updated.status, OrderStatus::Paid);

        // Paid -> Paid is not a legal transition.
        let result = service.update_status(order.id, OrderStatus::Paid).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_update_status_invalidates_order_snapshot() {
        let user_id = UserId::new();
        let orders = Arc::new(MockOrderRepository::new());
        let carts = Arc::new(MockCartRepository::with_cart(filled_cart(user_id)));
        let service = create_service(orders, carts);

        let order = service.place_order(user_id).await.unwrap();

        // Warm the order snapshot cache.
        service.get_order(order.id).await.unwrap();
        settle().await;

        service
            .update_status(order.id, OrderStatus::Paid)
            .await
            .unwrap();

        let fresh = service.get_order(order.id).await.unwrap();
        assert_eq!(fresh.status, OrderStatus::Paid);
    }
}
