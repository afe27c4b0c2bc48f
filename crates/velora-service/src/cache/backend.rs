//! Cache backend trait: raw key/value primitives plus connection lifecycle.

use async_trait::async_trait;
use std::time::Duration;
use velora_core::{Interface, VeloraResult};

/// Connection status of a cache backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum BackendStatus {
    /// No live connection; a connect attempt may succeed.
    Disconnected = 0,
    /// A connect attempt is in flight.
    Connecting = 1,
    /// Connected and serving commands.
    Ready = 2,
    /// The reconnect attempt ceiling was reached; no further automatic
    /// attempts are made until an explicit `connect` or process restart.
    Unavailable = 3,
}

impl BackendStatus {
    /// Decodes a status from its atomic representation.
    #[must_use]
    pub const fn from_u8(value: u8) -> Self {
        match value {
            1 => Self::Connecting,
            2 => Self::Ready,
            3 => Self::Unavailable,
            _ => Self::Disconnected,
        }
    }

    /// Short lowercase name for logging.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Disconnected => "disconnected",
            Self::Connecting => "connecting",
            Self::Ready => "ready",
            Self::Unavailable => "unavailable",
        }
    }
}

/// Raw key/value store with a managed connection.
///
/// Implementations own exactly one logical connection (or pool) to the
/// external store. All commands return errors freely; turning errors into
/// degraded behavior is the policy layer's job, not the backend's.
#[async_trait]
pub trait CacheBackend: Interface + Send + Sync {
    /// Establishes the connection. Idempotent: when already connected this
    /// returns immediately, and concurrent callers share one in-flight
    /// attempt instead of opening parallel connections.
    async fn connect(&self) -> VeloraResult<()>;

    /// Non-blocking liveness predicate. Never fails.
    fn is_connected(&self) -> bool;

    /// Current connection status.
    fn status(&self) -> BackendStatus;

    /// Best-effort graceful close for process shutdown. Swallows errors.
    async fn disconnect(&self);

    /// Reads a raw value.
    async fn get_raw(&self, key: &str) -> VeloraResult<Option<String>>;

    /// Writes a raw value with an expiry.
    async fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> VeloraResult<()>;

    /// Deletes a key. Returns `true` if the key existed.
    async fn delete(&self, key: &str) -> VeloraResult<bool>;

    /// Enumerates keys matching a glob pattern (`*` wildcard).
    async fn keys_matching(&self, pattern: &str) -> VeloraResult<Vec<String>>;

    /// Deletes a batch of keys. Returns the number deleted.
    async fn delete_many(&self, keys: &[String]) -> VeloraResult<u64>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trip() {
        for status in [
            BackendStatus::Disconnected,
            BackendStatus::Connecting,
            BackendStatus::Ready,
            BackendStatus::Unavailable,
        ] {
            assert_eq!(BackendStatus::from_u8(status as u8), status);
        }
    }

    #[test]
    fn test_unknown_status_decodes_as_disconnected() {
        assert_eq!(BackendStatus::from_u8(200), BackendStatus::Disconnected);
    }
}
