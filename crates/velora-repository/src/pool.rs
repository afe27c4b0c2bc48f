//! Database connection pool management.

use async_trait::async_trait;
use shaku::Component;
use sqlx::mysql::{MySqlPool, MySqlPoolOptions};
use std::time::Duration;
use tracing::{info, warn};
use velora_config::DatabaseConfig;
use velora_core::{Interface, VeloraError, VeloraResult};

/// Interface for database pool operations.
#[async_trait]
pub trait DatabasePoolInterface: Interface + Send + Sync {
    /// Returns the underlying MySQL pool, or an error when the pool was
    /// never initialized.
    fn inner(&self) -> VeloraResult<&MySqlPool>;

    /// Checks if the database connection is healthy.
    async fn health_check(&self) -> VeloraResult<()>;

    /// Closes the database pool.
    async fn close(&self);
}

/// Database pool wrapper.
#[derive(Component)]
#[shaku(interface = DatabasePoolInterface)]
pub struct DatabasePool {
    /// The pool is optional so the component can be built from parameters;
    /// it is always present after startup wiring.
    pool: Option<MySqlPool>,
}

impl DatabasePool {
    /// Creates a new database pool from configuration.
    pub async fn connect(config: &DatabaseConfig) -> VeloraResult<Self> {
        info!("Connecting to MySQL database...");

        let pool = MySqlPoolOptions::new()
            .min_connections(config.min_connections)
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connect_timeout_secs))
            .idle_timeout(Some(Duration::from_secs(config.idle_timeout_secs)))
            .connect(&config.url)
            .await
            .map_err(|e| {
                warn!("Failed to connect to database: {}", e);
                VeloraError::Database(format!("Failed to connect: {}", e))
            })?;

        info!("MySQL connection pool established");
        Ok(Self { pool: Some(pool) })
    }

    /// Creates a pool wrapper around a pre-existing pool (for Shaku injection).
    #[must_use]
    pub fn with_pool(pool: MySqlPool) -> Self {
        Self { pool: Some(pool) }
    }

    /// Returns the underlying pool.
    pub fn inner(&self) -> VeloraResult<&MySqlPool> {
        self.pool
            .as_ref()
            .ok_or_else(|| VeloraError::Database("Database pool not initialized".to_string()))
    }
}

#[async_trait]
impl DatabasePoolInterface for DatabasePool {
    fn inner(&self) -> VeloraResult<&MySqlPool> {
        DatabasePool::inner(self)
    }

    async fn health_check(&self) -> VeloraResult<()> {
        sqlx::query("SELECT 1")
            .execute(self.inner()?)
            .await
            .map_err(|e| VeloraError::Database(format!("Health check failed: {}", e)))?;
        Ok(())
    }

    async fn close(&self) {
        if let Some(pool) = &self.pool {
            info!("Closing database connection pool...");
            pool.close().await;
            info!("Database connection pool closed");
        }
    }
}

impl std::fmt::Debug for DatabasePool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut s = f.debug_struct("DatabasePool");
        match &self.pool {
            Some(pool) => s
                .field("size", &pool.size())
                .field("num_idle", &pool.num_idle())
                .finish(),
            None => s.field("pool", &"uninitialized").finish(),
        }
    }
}
