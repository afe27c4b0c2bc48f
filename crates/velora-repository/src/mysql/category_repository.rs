//! MySQL category repository implementation.

use crate::{traits::CategoryRepository, DatabasePoolInterface};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use shaku::Component;
use sqlx::FromRow;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;
use velora_core::{Category, CategoryId, VeloraError, VeloraResult};

/// MySQL category repository implementation.
#[derive(Component, Clone)]
#[shaku(interface = CategoryRepository)]
pub struct MySqlCategoryRepository {
    #[shaku(inject)]
    pool: Arc<dyn DatabasePoolInterface>,
}

impl MySqlCategoryRepository {
    /// Creates a new MySQL category repository.
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct CategoryRow {
    id: String,
    name: String,
    slug: String,
    parent_id: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<CategoryRow> for Category {
    type Error = VeloraError;

    fn try_from(row: CategoryRow) -> Result<Self, Self::Error> {
        let id = Uuid::parse_str(&row.id)
            .map_err(|e| VeloraError::Internal(format!("Invalid UUID in database: {}", e)))?;
        let parent_id = row
            .parent_id
            .as_deref()
            .map(Uuid::parse_str)
            .transpose()
            .map_err(|e| VeloraError::Internal(format!("Invalid UUID in database: {}", e)))?
            .map(CategoryId::from_uuid);

        Ok(Category {
            id: CategoryId::from_uuid(id),
            name: row.name,
            slug: row.slug,
            parent_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[async_trait]
impl CategoryRepository for MySqlCategoryRepository {
    async fn find_by_id(&self, id: CategoryId) -> VeloraResult<Option<Category>> {
        debug!("Finding category by id: {}", id);

        let row = sqlx::query_as::<_, CategoryRow>(
            "SELECT id, name, slug, parent_id, created_at, updated_at \
             FROM categories WHERE id = ?",
        )
        .bind(id.into_inner().to_string())
        .fetch_optional(self.pool.inner()?)
        .await?;

        row.map(Category::try_from).transpose()
    }

    async fn find_all(&self) -> VeloraResult<Vec<Category>> {
        debug!("Listing all categories");

        let rows = sqlx::query_as::<_, CategoryRow>(
            "SELECT id, name, slug, parent_id, created_at, updated_at \
             FROM categories ORDER BY name ASC",
        )
        .fetch_all(self.pool.inner()?)
        .await?;

        rows.into_iter().map(Category::try_from).collect()
    }

    async fn save(&self, category: &Category) -> VeloraResult<Category> {
        debug!("Saving category: {}", category.id);

        sqlx::query(
            "INSERT INTO categories (id, name, slug, parent_id, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(category.id.into_inner().to_string())
        .bind(&category.name)
        .bind(&category.slug)
        .bind(category.parent_id.map(|p| p.into_inner().to_string()))
        .bind(category.created_at)
        .bind(category.updated_at)
        .execute(self.pool.inner()?)
        .await?;

        Ok(category.clone())
    }

    async fn update(&self, category: &Category) -> VeloraResult<Category> {
        debug!("Updating category: {}", category.id);

        sqlx::query(
            "UPDATE categories SET name = ?, slug = ?, parent_id = ?, updated_at = ? \
             WHERE id = ?",
        )
        .bind(&category.name)
        .bind(&category.slug)
        .bind(category.parent_id.map(|p| p.into_inner().to_string()))
        .bind(category.updated_at)
        .bind(category.id.into_inner().to_string())
        .execute(self.pool.inner()?)
        .await?;

        Ok(category.clone())
    }

    async fn delete(&self, id: CategoryId) -> VeloraResult<bool> {
        debug!("Deleting category: {}", id);

        let result = sqlx::query("DELETE FROM categories WHERE id = ?")
            .bind(id.into_inner().to_string())
            .execute(self.pool.inner()?)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn count_products(&self, id: CategoryId) -> VeloraResult<u64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM products WHERE category_id = ? AND status = 'active'",
        )
        .bind(id.into_inner().to_string())
        .fetch_one(self.pool.inner()?)
        .await?;

        Ok(count as u64)
    }
}
