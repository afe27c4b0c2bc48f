//! In-memory cache backend.
//!
//! Reference implementation of the backend contract for stores without
//! native pattern support: pattern deletion enumerates the keyspace with a
//! glob matcher, then deletes the matches as a batch. Also the test double
//! for the policy layer, with a switchable connected flag to simulate
//! outages.

use super::{BackendStatus, CacheBackend};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};
use velora_core::{VeloraError, VeloraResult};

#[derive(Debug, Clone)]
struct Entry {
    value: String,
    expires_at: Option<Instant>,
}

impl Entry {
    fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|at| Instant::now() >= at)
    }
}

/// Process-local cache backend.
#[derive(Default)]
pub struct InMemoryBackend {
    entries: Mutex<HashMap<String, Entry>>,
    disconnected: AtomicBool,
}

impl InMemoryBackend {
    /// Creates a connected, empty backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulates the backend becoming reachable or unreachable.
    pub fn set_connected(&self, connected: bool) {
        self.disconnected.store(!connected, Ordering::SeqCst);
    }

    /// Number of live (unexpired) entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .values()
            .filter(|e| !e.is_expired())
            .count()
    }

    /// Whether the backend holds no live entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn ensure_connected(&self) -> VeloraResult<()> {
        if self.disconnected.load(Ordering::SeqCst) {
            return Err(VeloraError::cache("cache backend is not connected"));
        }
        Ok(())
    }
}

/// Matches a key against a glob pattern where `*` matches any run of
/// characters, the same subset Redis `KEYS` patterns use here.
fn glob_match(pattern: &str, key: &str) -> bool {
    fn inner(p: &[u8], k: &[u8]) -> bool {
        match (p.first(), k.first()) {
            (None, None) => true,
            (Some(&b'*'), _) => {
                // Swallow the star, or consume one key byte and retry.
                inner(&p[1..], k) || (!k.is_empty() && inner(p, &k[1..]))
            }
            (Some(pc), Some(kc)) if pc == kc => inner(&p[1..], &k[1..]),
            _ => false,
        }
    }
    inner(pattern.as_bytes(), key.as_bytes())
}

#[async_trait]
impl CacheBackend for InMemoryBackend {
    async fn connect(&self) -> VeloraResult<()> {
        self.set_connected(true);
        Ok(())
    }

    fn is_connected(&self) -> bool {
        !self.disconnected.load(Ordering::SeqCst)
    }

    fn status(&self) -> BackendStatus {
        if self.is_connected() {
            BackendStatus::Ready
        } else {
            BackendStatus::Disconnected
        }
    }

    async fn disconnect(&self) {
        self.set_connected(false);
    }

    async fn get_raw(&self, key: &str) -> VeloraResult<Option<String>> {
        self.ensure_connected()?;
        let mut entries = self.entries.lock();
        match entries.get(key) {
            Some(entry) if entry.is_expired() => {
                entries.remove(key);
                Ok(None)
            }
            Some(entry) => Ok(Some(entry.value.clone())),
            None => Ok(None),
        }
    }

    async fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> VeloraResult<()> {
        self.ensure_connected()?;
        self.entries.lock().insert(
            key.to_string(),
            Entry {
                value: value.to_string(),
                expires_at: Some(Instant::now() + ttl),
            },
        );
        Ok(())
    }

    async fn delete(&self, key: &str) -> VeloraResult<bool> {
        self.ensure_connected()?;
        Ok(self.entries.lock().remove(key).is_some())
    }

    async fn keys_matching(&self, pattern: &str) -> VeloraResult<Vec<String>> {
        self.ensure_connected()?;
        Ok(self
            .entries
            .lock()
            .iter()
            .filter(|(key, entry)| !entry.is_expired() && glob_match(pattern, key))
            .map(|(key, _)| key.clone())
            .collect())
    }

    async fn delete_many(&self, keys: &[String]) -> VeloraResult<u64> {
        self.ensure_connected()?;
        let mut entries = self.entries.lock();
        let mut deleted = 0;
        for key in keys {
            if entries.remove(key).is_some() {
                deleted += 1;
            }
        }
        Ok(deleted)
    }
}

impl std::fmt::Debug for InMemoryBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryBackend")
            .field("entries", &self.entries.lock().len())
            .field("connected", &self.is_connected())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glob_match() {
        assert!(glob_match("products:*", "products:catA"));
        assert!(glob_match("products:*", "products:"));
        assert!(!glob_match("products:*", "product:42"));
        assert!(glob_match("product:*:rating", "product:42:rating"));
        assert!(glob_match("*", "anything"));
        assert!(glob_match("categories", "categories"));
        assert!(!glob_match("categories", "categories:1"));
    }

    #[tokio::test]
    async fn test_set_get_round_trip() {
        let backend = InMemoryBackend::new();
        backend
            .set_raw("product:1", "{\"name\":\"x\"}", Duration::from_secs(60))
            .await
            .unwrap();
        let value = backend.get_raw("product:1").await.unwrap();
        assert_eq!(value.as_deref(), Some("{\"name\":\"x\"}"));
    }

    #[tokio::test]
    async fn test_expired_entry_reads_as_absent() {
        let backend = InMemoryBackend::new();
        backend
            .set_raw("k", "v", Duration::from_millis(10))
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_millis(30)).await;
        assert!(backend.get_raw("k").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_disconnected_backend_errors() {
        let backend = InMemoryBackend::new();
        backend.set_connected(false);
        assert!(backend.get_raw("k").await.is_err());
        assert!(!backend.is_connected());
        assert_eq!(backend.status(), BackendStatus::Disconnected);
    }

    #[tokio::test]
    async fn test_pattern_enumeration_and_batch_delete() {
        let backend = InMemoryBackend::new();
        let ttl = Duration::from_secs(60);
        backend.set_raw("products:catA", "1", ttl).await.unwrap();
        backend.set_raw("products:catB", "2", ttl).await.unwrap();
        backend.set_raw("user:7", "3", ttl).await.unwrap();

        let mut keys = backend.keys_matching("products:*").await.unwrap();
        keys.sort();
        assert_eq!(keys, vec!["products:catA", "products:catB"]);

        let deleted = backend.delete_many(&keys).await.unwrap();
        assert_eq!(deleted, 2);
        assert!(backend.get_raw("user:7").await.unwrap().is_some());
    }
}
