//! Category service implementation.

use crate::cache::{cache_keys, ttl, CacheExt, CacheInterface};
use crate::category_service::CategoryService;
use crate::dto::{CategoryResponse, CreateCategoryRequest, UpdateCategoryRequest};
use async_trait::async_trait;
use shaku::Component;
use std::sync::Arc;
use tracing::{debug, info};
use velora_core::{Category, CategoryId, VeloraError, VeloraResult};
use velora_repository::CategoryRepository;

/// Category service backed by a repository with a read-through cache.
///
/// The whole tree is cached under one key with a long TTL; categories
/// change rarely.
#[derive(Component)]
#[shaku(interface = CategoryService)]
pub struct CategoryServiceComponent {
    #[shaku(inject)]
    categories: Arc<dyn CategoryRepository>,
    #[shaku(inject)]
    cache: Arc<dyn CacheInterface>,
}

impl CategoryServiceComponent {
    /// Creates a category service.
    #[must_use]
    pub fn new(categories: Arc<dyn CategoryRepository>, cache: Arc<dyn CacheInterface>) -> Self {
        Self { categories, cache }
    }
}

#[async_trait]
impl CategoryService for CategoryServiceComponent {
    async fn list_categories(&self) -> VeloraResult<Vec<CategoryResponse>> {
        debug!("Listing categories");

        let key = cache_keys::categories();
        let repository = self.categories.clone();

        self.cache
            .read_through(&key, ttl::CATEGORIES, move || async move {
                let categories = repository.find_all().await?;
                Ok(categories
                    .into_iter()
                    .map(CategoryResponse::from)
                    .collect::<Vec<_>>())
            })
            .await
    }

    async fn product_count(&self, id: CategoryId) -> VeloraResult<u64> {
        let key = cache_keys::category_product_count(id);
        let repository = self.categories.clone();

        self.cache
            .read_through(&key, ttl::PRODUCTS, move || async move {
                repository.count_products(id).await
            })
            .await
    }

    async fn create_category(
        &self,
        request: CreateCategoryRequest,
    ) -> VeloraResult<CategoryResponse> {
        debug!("Creating category: {}", request.name);

        if request.name.trim().is_empty() || request.slug.trim().is_empty() {
            return Err(VeloraError::validation("Category name and slug are required"));
        }

        let category = Category::new(request.name, request.slug, request.parent_id);
        let saved = self.categories.save(&category).await?;

        let _ = self.cache.delete(&cache_keys::categories()).await;

        info!("Category created: {}", saved.id);
        Ok(CategoryResponse::from(saved))
    }

    async fn update_category(
        &self,
        id: CategoryId,
        request: UpdateCategoryRequest,
    ) -> VeloraResult<CategoryResponse> {
        debug!("Updating category: {}", id);

        let mut category = self
            .categories
            .find_by_id(id)
            .await?
            .ok_or_else(|| VeloraError::not_found("Category", id))?;

        category.rename(request.name, request.slug);
        let updated = self.categories.update(&category).await?;

        let _ = self.cache.delete(&cache_keys::categories()).await;

        info!("Category updated: {}", id);
        Ok(CategoryResponse::from(updated))
    }

    async fn delete_category(&self, id: CategoryId) -> VeloraResult<()> {
        debug!("Deleting category: {}", id);

        let deleted = self.categories.delete(id).await?;
        if !deleted {
            return Err(VeloraError::not_found("Category", id));
        }

        let _ = self.cache.delete(&cache_keys::categories()).await;
        let _ = self
            .cache
            .delete(&cache_keys::category_product_count(id))
            .await;

        info!("Category deleted: {}", id);
        Ok(())
    }
}

impl std::fmt::Debug for CategoryServiceComponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CategoryServiceComponent").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{CacheService, InMemoryBackend};
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;

    struct MockCategoryRepository {
        categories: Mutex<HashMap<CategoryId, Category>>,
        find_all_calls: AtomicU32,
    }

    impl MockCategoryRepository {
        fn new() -> Self {
            Self {
                categories: Mutex::new(HashMap::new()),
                find_all_calls: AtomicU32::new(0),
            }
        }
    }

    #[async_trait]
    impl CategoryRepository for MockCategoryRepository {
        async fn find_by_id(&self, id: CategoryId) -> VeloraResult<Option<Category>> {
            Ok(self.categories.lock().unwrap().get(&id).cloned())
        }

        async fn find_all(&self) -> VeloraResult<Vec<Category>> {
            self.find_all_calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.categories.lock().unwrap().values().cloned().collect())
        }

        async fn save(&self, category: &Category) -> VeloraResult<Category> {
            self.categories
                .lock()
                .unwrap()
                .insert(category.id, category.clone());
            Ok(category.clone())
        }

        async fn update(&self, category: &Category) -> VeloraResult<Category> {
            self.categories
                .lock()
                .unwrap()
                .insert(category.id, category.clone());
            Ok(category.clone())
        }

        async fn delete(&self, id: CategoryId) -> VeloraResult<bool> {
            Ok(self.categories.lock().unwrap().remove(&id).is_some())
        }

        async fn count_products(&self, _id: CategoryId) -> VeloraResult<u64> {
            Ok(7)
        }
    }

    fn create_service(repo: Arc<MockCategoryRepository>) -> CategoryServiceComponent {
        let backend = Arc::new(InMemoryBackend::new());
        let cache: Arc<dyn CacheInterface> = Arc::new(CacheService::new(backend));
        CategoryServiceComponent::new(repo, cache)
    }

    async fn settle() {
        tokio::time::sleep(Duration::from_millis(20)).await;
    }

    #[tokio::test]
    async fn test_list_categories_is_cached() {
        let repo = Arc::new(MockCategoryRepository::new());
        let service = create_service(repo.clone());

        service.list_categories().await.unwrap();
        settle().await;
        service.list_categories().await.unwrap();

        assert_eq!(repo.find_all_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_create_invalidates_tree_cache() {
        let repo = Arc::new(MockCategoryRepository::new());
        let service = create_service(repo.clone());

        service.list_categories().await.unwrap();
        settle().await;

        service
            .create_category(CreateCategoryRequest {
                name: "Sarees".to_string(),
                slug: "sarees".to_string(),
                parent_id: None,
            })
            .await
            .unwrap();

        let categories = service.list_categories().await.unwrap();
        assert_eq!(categories.len(), 1);
        assert_eq!(repo.find_all_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_update_missing_category_fails() {
        let repo = Arc::new(MockCategoryRepository::new());
        let service = create_service(repo);

        let result = service
            .update_category(
                CategoryId::new(),
                UpdateCategoryRequest {
                    name: "New".to_string(),
                    slug: "new".to_string(),
                },
            )
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_product_count_is_cached() {
        let repo = Arc::new(MockCategoryRepository::new());
        let service = create_service(repo);

        let count = service.product_count(CategoryId::new()).await.unwrap();
        assert_eq!(count, 7);
    }

    #[tokio::test]
    async fn test_create_rejects_blank_name() {
        let repo = Arc::new(MockCategoryRepository::new());
        let service = create_service(repo);

        let result = service
            .create_category(CreateCategoryRequest {
                name: "  ".to_string(),
                slug: "slug".to_string(),
                parent_id: None,
            })
            .await;
        assert!(result.is_err());
    }
}
