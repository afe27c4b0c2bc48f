//! Order entity and status transitions.

use crate::{Cart, OrderId, ProductId, UserId, VeloraError, VeloraResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle status of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Placed, awaiting payment confirmation.
    Pending,
    /// Payment confirmed.
    Paid,
    /// Handed to the carrier.
    Shipped,
    /// Received by the customer.
    Delivered,
    /// Cancelled before shipment.
    Cancelled,
}

impl OrderStatus {
    /// Whether this status may transition to `next`.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Paid | Self::Cancelled)
                | (Self::Paid, Self::Shipped | Self::Cancelled)
                | (Self::Shipped, Self::Delivered)
        )
    }
}

/// A single line in an order, frozen at checkout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderLine {
    /// Ordered product.
    pub product_id: ProductId,
    /// Quantity.
    pub quantity: u32,
    /// Unit price in cents at checkout.
    pub unit_price_cents: i64,
}

/// A customer order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    /// Order ID.
    pub id: OrderId,
    /// Purchasing user.
    pub user_id: UserId,
    /// Order lines.
    pub lines: Vec<OrderLine>,
    /// Total in cents.
    pub total_cents: i64,
    /// Lifecycle status.
    pub status: OrderStatus,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Creates a pending order from a cart snapshot.
    #[must_use]
    pub fn from_cart(cart: &Cart) -> Self {
        let now = Utc::now();
        let lines = cart
            .items
            .iter()
            .map(|item| OrderLine {
                product_id: item.product_id,
                quantity: item.quantity,
                unit_price_cents: item.unit_price_cents,
            })
            .collect();
        Self {
            id: OrderId::new(),
            user_id: cart.user_id,
            lines,
            total_cents: cart.total_cents(),
            status: OrderStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }

    /// Transitions to a new status, rejecting illegal transitions.
    pub fn transition_to(&mut self, next: OrderStatus) -> VeloraResult<()> {
        if !self.status.can_transition_to(next) {
            return Err(VeloraError::validation(format!(
                "Illegal order status transition: {:?} -> {:?}",
                self.status, next
            )));
        }
        self.status = next;
        self.updated_at = Utc::now();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CartItem;

    fn test_cart() -> Cart {
        let mut cart = Cart::empty(UserId::new());
        cart.upsert_item(CartItem {
            product_id: ProductId::new(),
            quantity: 2,
            unit_price_cents: 250,
        });
        cart
    }

    #[test]
    fn test_order_from_cart() {
        let cart = test_cart();
        let order = Order::from_cart(&cart);
        assert_eq!(order.user_id, cart.user_id);
        assert_eq!(order.total_cents, 500);
        assert_eq!(order.status, OrderStatus::Pending);
    }

    #[test]
    fn test_legal_transitions() {
        let mut order = Order::from_cart(&test_cart());
        order.transition_to(OrderStatus::Paid).unwrap();
        order.transition_to(OrderStatus::Shipped).unwrap();
        order.transition_to(OrderStatus::Delivered).unwrap();
        assert_eq!(order.status, OrderStatus::Delivered);
    }

    #[test]
    fn test_illegal_transition_rejected() {
        let mut order = Order::from_cart(&test_cart());
        let result = order.transition_to(OrderStatus::Delivered);
        assert!(result.is_err());
        assert_eq!(order.status, OrderStatus::Pending);
    }

    #[test]
    fn test_cancel_after_shipment_rejected() {
        let mut order = Order::from_cart(&test_cart());
        order.transition_to(OrderStatus::Paid).unwrap();
        order.transition_to(OrderStatus::Shipped).unwrap();
        assert!(order.transition_to(OrderStatus::Cancelled).is_err());
    }
}
