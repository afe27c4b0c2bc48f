//! Dependency injection module using Shaku.
//!
//! The cache backend is an explicitly constructed component injected into
//! the cache service, never an import-time singleton; its lifecycle
//! (connect at startup, disconnect at shutdown) is owned by `main`.

use shaku::{module, HasComponent};
use std::sync::Arc;
use velora_config::{DatabaseConfig, RedisConfig};
use velora_core::VeloraResult;
use velora_repository::{
    DatabasePool, DatabasePoolInterface, DatabasePoolParameters, MySqlCartRepository,
    MySqlCategoryRepository, MySqlOrderRepository, MySqlProductRepository,
};
use velora_service::{
    CacheBackend, CacheInterface, CacheService, CartService, CartServiceComponent,
    CategoryService, CategoryServiceComponent, OrderService, OrderServiceComponent,
    ProductService, ProductServiceComponent, RedisBackend, RedisBackendParameters,
};

// Application module: database pool and repositories, the caching core
// (backend + policy service), and the entity services that consume it.
module! {
    pub AppModule {
        components = [
            DatabasePool,
            MySqlProductRepository,
            MySqlCategoryRepository,
            MySqlCartRepository,
            MySqlOrderRepository,
            RedisBackend,
            CacheService,
            ProductServiceComponent,
            CategoryServiceComponent,
            CartServiceComponent,
            OrderServiceComponent,
        ],
        providers = [],
    }
}

/// Builds the application module with live infrastructure.
pub async fn build_app_module(
    db_config: &DatabaseConfig,
    redis_config: &RedisConfig,
) -> VeloraResult<Arc<AppModule>> {
    // Create database pool (async operation)
    let db_pool = DatabasePool::connect(db_config).await?;
    let pool = db_pool.inner()?.clone();

    let module = AppModule::builder()
        .with_component_parameters::<DatabasePool>(DatabasePoolParameters { pool: Some(pool) })
        .with_component_parameters::<RedisBackend>(RedisBackendParameters {
            url: redis_config.url.clone(),
            enabled: redis_config.enabled,
            max_reconnect_attempts: redis_config.max_reconnect_attempts,
            command_timeout: redis_config.command_timeout(),
        })
        .build();

    Ok(Arc::new(module))
}

/// Resolves the entity services from the module.
pub trait ServiceResolver {
    /// Resolves the product service.
    fn product_service(&self) -> Arc<dyn ProductService>;

    /// Resolves the category service.
    fn category_service(&self) -> Arc<dyn CategoryService>;

    /// Resolves the cart service.
    fn cart_service(&self) -> Arc<dyn CartService>;

    /// Resolves the order service.
    fn order_service(&self) -> Arc<dyn OrderService>;
}

impl ServiceResolver for AppModule {
    fn product_service(&self) -> Arc<dyn ProductService> {
        self.resolve()
    }

    fn category_service(&self) -> Arc<dyn CategoryService> {
        self.resolve()
    }

    fn cart_service(&self) -> Arc<dyn CartService> {
        self.resolve()
    }

    fn order_service(&self) -> Arc<dyn OrderService> {
        self.resolve()
    }
}

/// Resolves the caching components from the module.
pub trait CacheResolver {
    /// Resolves the cache policy service.
    fn cache(&self) -> Arc<dyn CacheInterface>;

    /// Resolves the cache backend for lifecycle management.
    fn cache_backend(&self) -> Arc<dyn CacheBackend>;
}

impl CacheResolver for AppModule {
    fn cache(&self) -> Arc<dyn CacheInterface> {
        self.resolve()
    }

    fn cache_backend(&self) -> Arc<dyn CacheBackend> {
        self.resolve()
    }
}

/// Resolves the database pool from the module.
pub trait DatabaseResolver {
    /// Resolves the database pool.
    fn database_pool(&self) -> Arc<dyn DatabasePoolInterface>;
}

impl DatabaseResolver for AppModule {
    fn database_pool(&self) -> Arc<dyn DatabasePoolInterface> {
        self.resolve()
    }
}
