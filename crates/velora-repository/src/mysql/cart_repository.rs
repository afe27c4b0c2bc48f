//! MySQL cart repository implementation.
//!
//! Carts are stored as one row per (user, product) line in `cart_items`.

use crate::{traits::CartRepository, DatabasePoolInterface};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use shaku::Component;
use sqlx::FromRow;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;
use velora_core::{Cart, CartItem, ProductId, UserId, VeloraError, VeloraResult};

/// MySQL cart repository implementation.
#[derive(Component, Clone)]
#[shaku(interface = CartRepository)]
pub struct MySqlCartRepository {
    #[shaku(inject)]
    pool: Arc<dyn DatabasePoolInterface>,
}

impl MySqlCartRepository {
    /// Creates a new MySQL cart repository.
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct CartItemRow {
    product_id: String,
    quantity: i64,
    unit_price_cents: i64,
    updated_at: DateTime<Utc>,
}

impl TryFrom<CartItemRow> for CartItem {
    type Error = VeloraError;

    fn try_from(row: CartItemRow) -> Result<Self, Self::Error> {
        let product_id = Uuid::parse_str(&row.product_id)
            .map_err(|e| VeloraError::Internal(format!("Invalid UUID in database: {}", e)))?;

        Ok(CartItem {
            product_id: ProductId::from_uuid(product_id),
            quantity: row.quantity.max(0) as u32,
            unit_price_cents: row.unit_price_cents,
        })
    }
}

#[async_trait]
impl CartRepository for MySqlCartRepository {
    async fn find_by_user(&self, user_id: UserId) -> VeloraResult<Option<Cart>> {
        debug!("Finding cart for user: {}", user_id);

        let rows = sqlx::query_as::<_, CartItemRow>(
            "SELECT product_id, quantity, unit_price_cents, updated_at \
             FROM cart_items WHERE user_id = ? ORDER BY created_at ASC",
        )
        .bind(user_id.into_inner().to_string())
        .fetch_all(self.pool.inner()?)
        .await?;

        if rows.is_empty() {
            return Ok(None);
        }

        let updated_at = rows
            .iter()
            .map(|r| r.updated_at)
            .max()
            .unwrap_or_else(Utc::now);
        let items = rows
            .into_iter()
            .map(CartItem::try_from)
            .collect::<VeloraResult<Vec<_>>>()?;

        Ok(Some(Cart {
            user_id,
            items,
            updated_at,
        }))
    }

    async fn upsert_item(&self, user_id: UserId, item: &CartItem) -> VeloraResult<()> {
        debug!("Upserting cart item for user: {}", user_id);

        sqlx::query(
            r#"
            INSERT INTO cart_items (user_id, product_id, quantity, unit_price_cents,
                                    created_at, updated_at)
            VALUES (?, ?, ?, ?, NOW(), NOW())
            ON DUPLICATE KEY UPDATE
                quantity = quantity + VALUES(quantity),
                unit_price_cents = VALUES(unit_price_cents),
                updated_at = NOW()
            "#,
        )
        .bind(user_id.into_inner().to_string())
        .bind(item.product_id.into_inner().to_string())
        .bind(item.quantity as i64)
        .bind(item.unit_price_cents)
        .execute(self.pool.inner()?)
        .await?;

        Ok(())
    }

    async fn remove_item(&self, user_id: UserId, product_id: ProductId) -> VeloraResult<bool> {
        debug!("Removing cart item for user: {}", user_id);

        let result = sqlx::query("DELETE FROM cart_items WHERE user_id = ? AND product_id = ?")
            .bind(user_id.into_inner().to_string())
            .bind(product_id.into_inner().to_string())
            .execute(self.pool.inner()?)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn clear(&self, user_id: UserId) -> VeloraResult<()> {
        debug!("Clearing cart for user: {}", user_id);

        sqlx::query("DELETE FROM cart_items WHERE user_id = ?")
            .bind(user_id.into_inner().to_string())
            .execute(self.pool.inner()?)
            .await?;

        Ok(())
    }
}
