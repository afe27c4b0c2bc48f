//! Cache interface traits for the policy layer.
//!
//! `CacheInterface` is the dyn-compatible degrading surface: it never
//! returns cache errors to callers. `CacheExt` layers typed get/set and the
//! read-through primitive on top of any `Arc<CacheInterface>`.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use shaku::Interface;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};
use velora_core::VeloraResult;

/// Fail-safe cache operations.
///
/// Every method degrades instead of erroring: an unreachable backend is
/// indistinguishable from a miss on reads and reports `false` on writes.
/// The database write a caller just performed (or is about to perform) is
/// authoritative; caching is strictly an optimization.
#[async_trait]
pub trait CacheInterface: Interface + Send + Sync {
    /// Whether the backend is currently reachable.
    fn is_available(&self) -> bool;

    /// Gets a raw JSON value. Unreachable backend, missing key, and command
    /// failure all read as `None`.
    async fn get_raw(&self, key: &str) -> Option<String>;

    /// Sets a raw JSON value with a TTL. Returns `false` when the write did
    /// not happen; callers must not treat that as fatal.
    async fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> bool;

    /// Deletes a key. Returns `false` when the delete could not be issued.
    async fn delete(&self, key: &str) -> bool;

    /// Deletes all keys matching a glob pattern, as an explicit
    /// enumerate-then-batch-delete. Zero matches is success.
    async fn delete_by_pattern(&self, pattern: &str) -> bool;
}

/// Typed extension methods over any shared cache handle.
#[async_trait]
pub trait CacheExt {
    /// Gets a typed value. Deserialization failure is logged and treated as
    /// a miss, since a corrupt entry will be overwritten on the next populate.
    async fn get<T: DeserializeOwned + Send>(&self, key: &str) -> Option<T>;

    /// Sets a typed value.
    async fn set<T: Serialize + Send + Sync>(&self, key: &str, value: &T, ttl: Duration) -> bool;

    /// Read-through: returns the cached value on a hit; on a miss runs
    /// `loader` against the data source, returns its result, and populates
    /// the cache in a detached task so the caller never waits on the write.
    ///
    /// Loader errors propagate unchanged - a data-source outage must never
    /// be masked by the cache layer.
    async fn read_through<T, F, Fut>(&self, key: &str, ttl: Duration, loader: F) -> VeloraResult<T>
    where
        T: Serialize + DeserializeOwned + Send + Sync,
        F: FnOnce() -> Fut + Send,
        Fut: std::future::Future<Output = VeloraResult<T>> + Send;
}

#[async_trait]
impl<C> CacheExt for Arc<C>
where
    C: CacheInterface + ?Sized,
{
    async fn get<T: DeserializeOwned + Send>(&self, key: &str) -> Option<T> {
        let json = self.get_raw(key).await?;
        match serde_json::from_str(&json) {
            Ok(value) => Some(value),
            Err(e) => {
                // Deserialize failure is a miss, but it usually means a key
                // format or versioning bug rather than a transient fault.
                warn!(key = %key, error = %e, "cached value failed to deserialize, treating as miss");
                None
            }
        }
    }

    async fn set<T: Serialize + Send + Sync>(&self, key: &str, value: &T, ttl: Duration) -> bool {
        match serde_json::to_string(value) {
            Ok(json) => self.set_raw(key, &json, ttl).await,
            Err(e) => {
                warn!(key = %key, error = %e, "failed to serialize value for cache");
                false
            }
        }
    }

    async fn read_through<T, F, Fut>(&self, key: &str, ttl: Duration, loader: F) -> VeloraResult<T>
    where
        T: Serialize + DeserializeOwned + Send + Sync,
        F: FnOnce() -> Fut + Send,
        Fut: std::future::Future<Output = VeloraResult<T>> + Send,
    {
        if let Some(cached) = self.get::<T>(key).await {
            debug!(key = %key, "cache hit");
            return Ok(cached);
        }

        debug!(key = %key, "cache miss");
        let value = loader().await?;

        // Detached populate: the caller gets its answer now; a slow or
        // failing cache write never adds latency to the request path.
        match serde_json::to_string(&value) {
            Ok(json) => {
                let cache = Arc::clone(self);
                let key = key.to_owned();
                tokio::spawn(async move {
                    if !cache.set_raw(&key, &json, ttl).await {
                        debug!(key = %key, "background cache populate skipped");
                    }
                });
            }
            Err(e) => {
                warn!(key = %key, error = %e, "failed to serialize loader result for cache");
            }
        }

        Ok(value)
    }
}
