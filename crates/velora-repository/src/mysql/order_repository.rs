//! MySQL order repository implementation.

use crate::{traits::OrderRepository, DatabasePoolInterface};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use shaku::Component;
use sqlx::FromRow;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;
use velora_core::{
    Order, OrderId, OrderLine, OrderStatus, ProductId, UserId, VeloraError, VeloraResult,
};

/// MySQL order repository implementation.
#[derive(Component, Clone)]
#[shaku(interface = OrderRepository)]
pub struct MySqlOrderRepository {
    #[shaku(inject)]
    pool: Arc<dyn DatabasePoolInterface>,
}

impl MySqlOrderRepository {
    /// Creates a new MySQL order repository.
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>) -> Self {
        Self { pool }
    }

    async fn load_lines(&self, order_id: &str) -> VeloraResult<Vec<OrderLine>> {
        let rows = sqlx::query_as::<_, OrderLineRow>(
            "SELECT product_id, quantity, unit_price_cents \
             FROM order_lines WHERE order_id = ?",
        )
        .bind(order_id)
        .fetch_all(self.pool.inner()?)
        .await?;

        rows.into_iter().map(OrderLine::try_from).collect()
    }
}

#[derive(Debug, FromRow)]
struct OrderRow {
    id: String,
    user_id: String,
    total_cents: i64,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, FromRow)]
struct OrderLineRow {
    product_id: String,
    quantity: i64,
    unit_price_cents: i64,
}

impl TryFrom<OrderLineRow> for OrderLine {
    type Error = VeloraError;

    fn try_from(row: OrderLineRow) -> Result<Self, Self::Error> {
        let product_id = Uuid::parse_str(&row.product_id)
            .map_err(|e| VeloraError::Internal(format!("Invalid UUID in database: {}", e)))?;

        Ok(OrderLine {
            product_id: ProductId::from_uuid(product_id),
            quantity: row.quantity.max(0) as u32,
            unit_price_cents: row.unit_price_cents,
        })
    }
}

fn parse_status(s: &str) -> OrderStatus {
    match s.to_lowercase().as_str() {
        "paid" => OrderStatus::Paid,
        "shipped" => OrderStatus::Shipped,
        "delivered" => OrderStatus::Delivered,
        "cancelled" => OrderStatus::Cancelled,
        _ => OrderStatus::Pending,
    }
}

fn status_str(status: OrderStatus) -> &'static str {
    match status {
        OrderStatus::Pending => "pending",
        OrderStatus::Paid => "paid",
        OrderStatus::Shipped => "shipped",
        OrderStatus::Delivered => "delivered",
        OrderStatus::Cancelled => "cancelled",
    }
}

fn order_from_row(row: OrderRow, lines: Vec<OrderLine>) -> VeloraResult<Order> {
    let id = Uuid::parse_str(&row.id)
        .map_err(|e| VeloraError::Internal(format!("Invalid UUID in database: {}", e)))?;
    let user_id = Uuid::parse_str(&row.user_id)
        .map_err(|e| VeloraError::Internal(format!("Invalid UUID in database: {}", e)))?;

    Ok(Order {
        id: OrderId::from_uuid(id),
        user_id: UserId::from_uuid(user_id),
        lines,
        total_cents: row.total_cents,
        status: parse_status(&row.status),
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

#[async_trait]
impl OrderRepository for MySqlOrderRepository {
    async fn find_by_id(&self, id: OrderId) -> VeloraResult<Option<Order>> {
        debug!("Finding order by id: {}", id);

        let id_str = id.into_inner().to_string();
        let row = sqlx::query_as::<_, OrderRow>(
            "SELECT id, user_id, total_cents, status, created_at, updated_at \
             FROM orders WHERE id = ?",
        )
        .bind(&id_str)
        .fetch_optional(self.pool.inner()?)
        .await?;

        match row {
            Some(row) => {
                let lines = self.load_lines(&id_str).await?;
                Ok(Some(order_from_row(row, lines)?))
            }
            None => Ok(None),
        }
    }

    async fn find_by_user(&self, user_id: UserId) -> VeloraResult<Vec<Order>> {
        debug!("Finding orders for user: {}", user_id);

        let rows = sqlx::query_as::<_, OrderRow>(
            "SELECT id, user_id, total_cents, status, created_at, updated_at \
             FROM orders WHERE user_id = ? ORDER BY created_at DESC",
        )
        .bind(user_id.into_inner().to_string())
        .fetch_all(self.pool.inner()?)
        .await?;

        let mut orders = Vec::with_capacity(rows.len());
        for row in rows {
            let lines = self.load_lines(&row.id).await?;
            orders.push(order_from_row(row, lines)?);
        }
        Ok(orders)
    }

    async fn save(&self, order: &Order) -> VeloraResult<Order> {
        debug!("Saving order: {}", order.id);

        let mut tx = self.pool.inner()?.begin().await?;

        sqlx::query(
            "INSERT INTO orders (id, user_id, total_cents, status, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(order.id.into_inner().to_string())
        .bind(order.user_id.into_inner().to_string())
        .bind(order.total_cents)
        .bind(status_str(order.status))
        .bind(order.created_at)
        .bind(order.updated_at)
        .execute(&mut *tx)
        .await?;

        for line in &order.lines {
            sqlx::query(
                "INSERT INTO order_lines (order_id, product_id, quantity, unit_price_cents) \
                 VALUES (?, ?, ?, ?)",
            )
            .bind(order.id.into_inner().to_string())
            .bind(line.product_id.into_inner().to_string())
            .bind(line.quantity as i64)
            .bind(line.unit_price_cents)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(order.clone())
    }

    async fn update_status(&self, id: OrderId, status: OrderStatus) -> VeloraResult<bool> {
        debug!("Updating order status: {} -> {:?}", id, status);

        let result = sqlx::query("UPDATE orders SET status = ?, updated_at = NOW() WHERE id = ?")
            .bind(status_str(status))
            .bind(id.into_inner().to_string())
            .execute(self.pool.inner()?)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
