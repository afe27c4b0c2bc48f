//! Cache policy service over a managed backend.

use super::{CacheBackend, CacheInterface};
use async_trait::async_trait;
use shaku::Component;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, trace, warn};

/// Fail-safe cache service.
///
/// Checks backend liveness before every operation and converts backend
/// errors into degraded results, so callers never see a cache outage as a
/// failure. Invalidation failures are logged here; a stale entry that fails
/// to invalidate self-corrects at TTL expiry, which bounds staleness to one
/// TTL window.
#[derive(Component)]
#[shaku(interface = CacheInterface)]
pub struct CacheService {
    #[shaku(inject)]
    backend: Arc<dyn CacheBackend>,
}

impl CacheService {
    /// Creates a cache service over a backend.
    #[must_use]
    pub fn new(backend: Arc<dyn CacheBackend>) -> Self {
        Self { backend }
    }
}

#[async_trait]
impl CacheInterface for CacheService {
    fn is_available(&self) -> bool {
        self.backend.is_connected()
    }

    async fn get_raw(&self, key: &str) -> Option<String> {
        if !self.is_available() {
            trace!(key = %key, "cache unavailable, skipping get");
            return None;
        }

        match self.backend.get_raw(key).await {
            Ok(value) => value,
            Err(e) => {
                warn!(key = %key, error = %e, "cache get failed");
                None
            }
        }
    }

    async fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> bool {
        if !self.is_available() {
            trace!(key = %key, "cache unavailable, skipping set");
            return false;
        }

        match self.backend.set_raw(key, value, ttl).await {
            Ok(()) => {
                debug!(key = %key, ttl_secs = ttl.as_secs(), "cached");
                true
            }
            Err(e) => {
                warn!(key = %key, error = %e, "cache set failed");
                false
            }
        }
    }

    async fn delete(&self, key: &str) -> bool {
        if !self.is_available() {
            trace!(key = %key, "cache unavailable, skipping delete");
            return false;
        }

        match self.backend.delete(key).await {
            Ok(existed) => {
                debug!(key = %key, existed, "cache key deleted");
                true
            }
            Err(e) => {
                warn!(key = %key, error = %e, "cache delete failed");
                false
            }
        }
    }

    async fn delete_by_pattern(&self, pattern: &str) -> bool {
        if !self.is_available() {
            trace!(pattern = %pattern, "cache unavailable, skipping pattern delete");
            return false;
        }

        // Two-step invalidation: enumerate matches, then delete the batch.
        let keys = match self.backend.keys_matching(pattern).await {
            Ok(keys) => keys,
            Err(e) => {
                warn!(pattern = %pattern, error = %e, "cache key enumeration failed");
                return false;
            }
        };

        if keys.is_empty() {
            return true;
        }

        match self.backend.delete_many(&keys).await {
            Ok(deleted) => {
                debug!(pattern = %pattern, deleted, "cache pattern invalidated");
                true
            }
            Err(e) => {
                warn!(pattern = %pattern, error = %e, "cache pattern delete failed");
                false
            }
        }
    }
}

impl std::fmt::Debug for CacheService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheService")
            .field("available", &self.is_available())
            .finish()
    }
}
