//! MySQL product repository implementation.

use crate::{traits::ProductRepository, DatabasePoolInterface};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use shaku::Component;
use sqlx::{FromRow, MySql, QueryBuilder};
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;
use velora_core::{
    CategoryId, Page, Product, ProductFilter, ProductId, ProductStatus, VeloraError, VeloraResult,
};

/// MySQL product repository implementation.
#[derive(Component, Clone)]
#[shaku(interface = ProductRepository)]
pub struct MySqlProductRepository {
    #[shaku(inject)]
    pool: Arc<dyn DatabasePoolInterface>,
}

impl MySqlProductRepository {
    /// Creates a new MySQL product repository.
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>) -> Self {
        Self { pool }
    }
}

/// Database row representation of a product.
#[derive(Debug, FromRow)]
struct ProductRow {
    id: String, // MySQL stores UUID as CHAR(36)
    name: String,
    slug: String,
    sku: String,
    price_cents: i64,
    category_id: Option<String>,
    description: Option<String>,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ProductRow> for Product {
    type Error = VeloraError;

    fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
        let id = Uuid::parse_str(&row.id)
            .map_err(|e| VeloraError::Internal(format!("Invalid UUID in database: {}", e)))?;
        let category_id = row
            .category_id
            .as_deref()
            .map(Uuid::parse_str)
            .transpose()
            .map_err(|e| VeloraError::Internal(format!("Invalid UUID in database: {}", e)))?
            .map(CategoryId::from_uuid);

        Ok(Product {
            id: ProductId::from_uuid(id),
            name: row.name,
            slug: row.slug,
            sku: row.sku,
            price_cents: row.price_cents,
            category_id,
            description: row.description,
            status: parse_status(&row.status),
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn parse_status(s: &str) -> ProductStatus {
    match s.to_lowercase().as_str() {
        "inactive" => ProductStatus::Inactive,
        "deleted" => ProductStatus::Deleted,
        _ => ProductStatus::Active,
    }
}

fn status_str(status: ProductStatus) -> &'static str {
    match status {
        ProductStatus::Active => "active",
        ProductStatus::Inactive => "inactive",
        ProductStatus::Deleted => "deleted",
    }
}

/// Appends the filter's WHERE conditions to a query builder.
fn push_filter_conditions<'a>(qb: &mut QueryBuilder<'a, MySql>, filter: &'a ProductFilter) {
    qb.push(" WHERE status != 'deleted'");
    if let Some(category) = filter.category {
        qb.push(" AND category_id = ")
            .push_bind(category.into_inner().to_string());
    }
    if let Some(min) = filter.min_price_cents {
        qb.push(" AND price_cents >= ").push_bind(min);
    }
    if let Some(max) = filter.max_price_cents {
        qb.push(" AND price_cents <= ").push_bind(max);
    }
    if let Some(search) = &filter.search {
        let like = format!("%{}%", search);
        qb.push(" AND (name LIKE ")
            .push_bind(like.clone())
            .push(" OR description LIKE ")
            .push_bind(like)
            .push(")");
    }
}

/// Maps the filter's sort field to a whitelisted ORDER BY clause.
fn order_by_clause(sort: Option<&str>) -> &'static str {
    match sort {
        Some("price_asc") => " ORDER BY price_cents ASC",
        Some("price_desc") => " ORDER BY price_cents DESC",
        Some("name") => " ORDER BY name ASC",
        _ => " ORDER BY created_at DESC",
    }
}

#[async_trait]
impl ProductRepository for MySqlProductRepository {
    async fn find_by_id(&self, id: ProductId) -> VeloraResult<Option<Product>> {
        debug!("Finding product by id: {}", id);

        let row = sqlx::query_as::<_, ProductRow>(
            r#"
            SELECT id, name, slug, sku, price_cents, category_id, description,
                   status, created_at, updated_at
            FROM products
            WHERE id = ? AND status != 'deleted'
            "#,
        )
        .bind(id.into_inner().to_string())
        .fetch_optional(self.pool.inner()?)
        .await?;

        row.map(Product::try_from).transpose()
    }

    async fn find_all(&self, filter: &ProductFilter) -> VeloraResult<Page<Product>> {
        debug!("Finding products, page: {}, limit: {}", filter.page, filter.limit);

        let mut count_qb = QueryBuilder::<MySql>::new("SELECT COUNT(*) FROM products");
        push_filter_conditions(&mut count_qb, filter);
        let total: i64 = count_qb
            .build_query_scalar()
            .fetch_one(self.pool.inner()?)
            .await?;

        let limit = if filter.limit == 0 { 20 } else { filter.limit };
        let offset = filter.page * limit;

        let mut qb = QueryBuilder::<MySql>::new(
            "SELECT id, name, slug, sku, price_cents, category_id, description, \
             status, created_at, updated_at FROM products",
        );
        push_filter_conditions(&mut qb, filter);
        qb.push(order_by_clause(filter.sort.as_deref()));
        qb.push(" LIMIT ")
            .push_bind(limit as i64)
            .push(" OFFSET ")
            .push_bind(offset as i64);

        let rows: Vec<ProductRow> = qb.build_query_as().fetch_all(self.pool.inner()?).await?;

        let products = rows
            .into_iter()
            .map(Product::try_from)
            .collect::<VeloraResult<Vec<_>>>()?;

        Ok(Page::new(products, filter.page, limit, total as u64))
    }

    async fn save(&self, product: &Product) -> VeloraResult<Product> {
        debug!("Saving product: {}", product.id);

        sqlx::query(
            r#"
            INSERT INTO products (id, name, slug, sku, price_cents, category_id,
                                  description, status, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(product.id.into_inner().to_string())
        .bind(&product.name)
        .bind(&product.slug)
        .bind(&product.sku)
        .bind(product.price_cents)
        .bind(product.category_id.map(|c| c.into_inner().to_string()))
        .bind(&product.description)
        .bind(status_str(product.status))
        .bind(product.created_at)
        .bind(product.updated_at)
        .execute(self.pool.inner()?)
        .await?;

        Ok(product.clone())
    }

    async fn update(&self, product: &Product) -> VeloraResult<Product> {
        debug!("Updating product: {}", product.id);

        sqlx::query(
            r#"
            UPDATE products
            SET name = ?, slug = ?, sku = ?, price_cents = ?, category_id = ?,
                description = ?, status = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&product.name)
        .bind(&product.slug)
        .bind(&product.sku)
        .bind(product.price_cents)
        .bind(product.category_id.map(|c| c.into_inner().to_string()))
        .bind(&product.description)
        .bind(status_str(product.status))
        .bind(product.updated_at)
        .bind(product.id.into_inner().to_string())
        .execute(self.pool.inner()?)
        .await?;

        Ok(product.clone())
    }

    async fn delete(&self, id: ProductId) -> VeloraResult<bool> {
        debug!("Soft-deleting product: {}", id);

        let result = sqlx::query(
            "UPDATE products SET status = 'deleted', updated_at = NOW() \
             WHERE id = ? AND status != 'deleted'",
        )
        .bind(id.into_inner().to_string())
        .execute(self.pool.inner()?)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
