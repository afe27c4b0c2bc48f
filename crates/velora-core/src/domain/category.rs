//! Category entity.

use crate::CategoryId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A catalog category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    /// Category ID.
    pub id: CategoryId,
    /// Display name.
    pub name: String,
    /// URL slug, unique within the catalog.
    pub slug: String,
    /// Parent category for nested taxonomies.
    pub parent_id: Option<CategoryId>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Category {
    /// Creates a new category.
    #[must_use]
    pub fn new(name: String, slug: String, parent_id: Option<CategoryId>) -> Self {
        let now = Utc::now();
        Self {
            id: CategoryId::new(),
            name,
            slug,
            parent_id,
            created_at: now,
            updated_at: now,
        }
    }

    /// Renames the category, bumping the update timestamp.
    pub fn rename(&mut self, name: String, slug: String) {
        self.name = name;
        self.slug = slug;
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_category() {
        let category = Category::new("Sarees".to_string(), "sarees".to_string(), None);
        assert_eq!(category.name, "Sarees");
        assert!(category.parent_id.is_none());
    }

    #[test]
    fn test_rename() {
        let mut category = Category::new("Sarees".to_string(), "sarees".to_string(), None);
        category.rename("Ethnic Wear".to_string(), "ethnic-wear".to_string());
        assert_eq!(category.slug, "ethnic-wear");
    }
}
