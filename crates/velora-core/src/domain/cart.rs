//! Shopping cart entity.

use crate::{ProductId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single line in a user's cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    /// Product being purchased.
    pub product_id: ProductId,
    /// Quantity, always at least 1.
    pub quantity: u32,
    /// Unit price in cents captured when the item was added.
    pub unit_price_cents: i64,
}

impl CartItem {
    /// Line total in cents.
    #[must_use]
    pub const fn total_cents(&self) -> i64 {
        self.unit_price_cents * self.quantity as i64
    }
}

/// A user's shopping cart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cart {
    /// Owning user.
    pub user_id: UserId,
    /// Cart lines, one per product.
    pub items: Vec<CartItem>,
    /// Last mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Cart {
    /// Creates an empty cart for a user.
    #[must_use]
    pub fn empty(user_id: UserId) -> Self {
        Self {
            user_id,
            items: Vec::new(),
            updated_at: Utc::now(),
        }
    }

    /// Adds an item, merging quantities when the product is already present.
    pub fn upsert_item(&mut self, item: CartItem) {
        if let Some(existing) = self
            .items
            .iter_mut()
            .find(|i| i.product_id == item.product_id)
        {
            existing.quantity += item.quantity;
            existing.unit_price_cents = item.unit_price_cents;
        } else {
            self.items.push(item);
        }
        self.updated_at = Utc::now();
    }

    /// Removes an item by product. Returns `true` if the product was present.
    pub fn remove_item(&mut self, product_id: ProductId) -> bool {
        let before = self.items.len();
        self.items.retain(|i| i.product_id != product_id);
        let removed = self.items.len() != before;
        if removed {
            self.updated_at = Utc::now();
        }
        removed
    }

    /// Cart total in cents.
    #[must_use]
    pub fn total_cents(&self) -> i64 {
        self.items.iter().map(CartItem::total_cents).sum()
    }

    /// Whether the cart has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(product_id: ProductId, quantity: u32, price: i64) -> CartItem {
        CartItem {
            product_id,
            quantity,
            unit_price_cents: price,
        }
    }

    #[test]
    fn test_upsert_merges_quantities() {
        let product_id = ProductId::new();
        let mut cart = Cart::empty(UserId::new());
        cart.upsert_item(item(product_id, 1, 100));
        cart.upsert_item(item(product_id, 2, 100));
        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.items[0].quantity, 3);
    }

    #[test]
    fn test_remove_item() {
        let product_id = ProductId::new();
        let mut cart = Cart::empty(UserId::new());
        cart.upsert_item(item(product_id, 1, 100));
        assert!(cart.remove_item(product_id));
        assert!(!cart.remove_item(product_id));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_total() {
        let mut cart = Cart::empty(UserId::new());
        cart.upsert_item(item(ProductId::new(), 2, 150));
        cart.upsert_item(item(ProductId::new(), 1, 300));
        assert_eq!(cart.total_cents(), 600);
    }
}
