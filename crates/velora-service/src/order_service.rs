//! Order service trait definition.

use crate::dto::OrderResponse;
use async_trait::async_trait;
use velora_core::{Interface, OrderId, OrderStatus, UserId, VeloraResult};

/// Order service.
#[async_trait]
pub trait OrderService: Interface + Send + Sync {
    /// Gets an order by ID.
    async fn get_order(&self, id: OrderId) -> VeloraResult<OrderResponse>;

    /// Lists a user's orders, most recent first.
    async fn list_orders(&self, user_id: UserId) -> VeloraResult<Vec<OrderResponse>>;

    /// Places an order from the user's current cart, emptying the cart.
    async fn place_order(&self, user_id: UserId) -> VeloraResult<OrderResponse>;

    /// Moves an order to a new status.
    async fn update_status(&self, id: OrderId, status: OrderStatus) -> VeloraResult<OrderResponse>;
}
