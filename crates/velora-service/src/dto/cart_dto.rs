//! Cart DTOs.

use serde::{Deserialize, Serialize};
use velora_core::{Cart, CartItem, ProductId, UserId};

/// Request to add an item to a cart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddCartItemRequest {
    pub product_id: ProductId,
    pub quantity: u32,
    pub unit_price_cents: i64,
}

/// A cart line as returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItemResponse {
    pub product_id: ProductId,
    pub quantity: u32,
    pub unit_price_cents: i64,
    pub total_cents: i64,
}

impl From<CartItem> for CartItemResponse {
    fn from(item: CartItem) -> Self {
        let total_cents = item.total_cents();
        Self {
            product_id: item.product_id,
            quantity: item.quantity,
            unit_price_cents: item.unit_price_cents,
            total_cents,
        }
    }
}

/// Cart snapshot returned to callers and stored in the cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartResponse {
    pub user_id: UserId,
    pub items: Vec<CartItemResponse>,
    pub total_cents: i64,
}

impl From<Cart> for CartResponse {
    fn from(cart: Cart) -> Self {
        let total_cents = cart.total_cents();
        Self {
            user_id: cart.user_id,
            items: cart.items.into_iter().map(CartItemResponse::from).collect(),
            total_cents,
        }
    }
}
