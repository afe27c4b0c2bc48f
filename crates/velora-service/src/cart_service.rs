//! Cart service trait definition.

use crate::dto::{AddCartItemRequest, CartResponse};
use async_trait::async_trait;
use velora_core::{Interface, ProductId, UserId, VeloraResult};

/// Shopping cart service.
#[async_trait]
pub trait CartService: Interface + Send + Sync {
    /// Gets a user's cart; an empty cart when the user has none.
    async fn get_cart(&self, user_id: UserId) -> VeloraResult<CartResponse>;

    /// Adds an item to a user's cart.
    async fn add_item(&self, user_id: UserId, request: AddCartItemRequest) -> VeloraResult<()>;

    /// Removes an item from a user's cart.
    async fn remove_item(&self, user_id: UserId, product_id: ProductId) -> VeloraResult<()>;

    /// Empties a user's cart.
    async fn clear_cart(&self, user_id: UserId) -> VeloraResult<()>;
}
