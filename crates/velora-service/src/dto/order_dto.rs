//! Order DTOs.

use serde::{Deserialize, Serialize};
use velora_core::{Order, OrderId, OrderLine, OrderStatus, ProductId, UserId};

/// Request to move an order to a new status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateOrderStatusRequest {
    pub status: OrderStatus,
}

/// An order line as returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLineResponse {
    pub product_id: ProductId,
    pub quantity: u32,
    pub unit_price_cents: i64,
}

impl From<OrderLine> for OrderLineResponse {
    fn from(line: OrderLine) -> Self {
        Self {
            product_id: line.product_id,
            quantity: line.quantity,
            unit_price_cents: line.unit_price_cents,
        }
    }
}

/// Order snapshot returned to callers and stored in the cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderResponse {
    pub id: OrderId,
    pub user_id: UserId,
    pub lines: Vec<OrderLineResponse>,
    pub total_cents: i64,
    pub status: OrderStatus,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self {
            id: order.id,
            user_id: order.user_id,
            lines: order.lines.into_iter().map(OrderLineResponse::from).collect(),
            total_cents: order.total_cents,
            status: order.status,
        }
    }
}
