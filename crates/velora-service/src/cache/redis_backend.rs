//! Redis cache backend with managed connection lifecycle.
//!
//! One multiplexed connection is shared by all concurrent requests in the
//! process; Redis pipelines concurrent commands on it. Connect attempts are
//! serialized so a cold start never opens a storm of connections, and a lost
//! connection triggers a background reconnect loop with capped backoff.

use super::{BackendStatus, CacheBackend};
use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;
use shaku::Component;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, error, info, warn};
use velora_core::{VeloraError, VeloraResult};

/// Upper bound for establishing a TCP connection, as opposed to the much
/// tighter per-command timeout.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Backoff before reconnect `attempt` (1-indexed): `min(attempt * 100ms, 3s)`.
fn reconnect_delay(attempt: u32) -> Duration {
    Duration::from_millis((u64::from(attempt) * 100).min(3_000))
}

/// Shared mutable state, split out so background tasks can own a handle.
struct Shared {
    conn: tokio::sync::RwLock<Option<MultiplexedConnection>>,
    status: AtomicU8,
    connect_lock: tokio::sync::Mutex<()>,
    reconnecting: AtomicBool,
    /// Set by an explicit disconnect; stops any in-flight reconnect loop so
    /// shutdown cannot race a background reconnection.
    closed: AtomicBool,
}

impl Default for Shared {
    fn default() -> Self {
        Self {
            conn: tokio::sync::RwLock::new(None),
            status: AtomicU8::new(BackendStatus::Disconnected as u8),
            connect_lock: tokio::sync::Mutex::new(()),
            reconnecting: AtomicBool::new(false),
            closed: AtomicBool::new(false),
        }
    }
}

impl Shared {
    fn status(&self) -> BackendStatus {
        BackendStatus::from_u8(self.status.load(Ordering::Acquire))
    }

    fn set_status(&self, next: BackendStatus) {
        let prev = BackendStatus::from_u8(self.status.swap(next as u8, Ordering::AcqRel));
        if prev != next {
            info!(from = prev.as_str(), to = next.as_str(), "cache backend state changed");
        }
    }
}

async fn establish_connection(url: &str) -> VeloraResult<MultiplexedConnection> {
    let client = redis::Client::open(url)
        .map_err(|e| VeloraError::Cache(format!("Invalid Redis URL: {}", e)))?;

    match timeout(CONNECT_TIMEOUT, client.get_multiplexed_async_connection()).await {
        Ok(Ok(conn)) => Ok(conn),
        Ok(Err(e)) => Err(VeloraError::Cache(format!("Failed to connect: {}", e))),
        Err(_) => Err(VeloraError::cache("Connect attempt timed out")),
    }
}

/// Spawns the background reconnect loop, unless one is already running.
fn spawn_reconnect(shared: Arc<Shared>, url: String, max_attempts: u32) {
    if shared.reconnecting.swap(true, Ordering::SeqCst) {
        return;
    }

    tokio::spawn(async move {
        for attempt in 1..=max_attempts {
            tokio::time::sleep(reconnect_delay(attempt)).await;
            if shared.closed.load(Ordering::SeqCst) {
                shared.reconnecting.store(false, Ordering::SeqCst);
                return;
            }
            shared.set_status(BackendStatus::Connecting);

            match establish_connection(&url).await {
                Ok(conn) => {
                    *shared.conn.write().await = Some(conn);
                    shared.set_status(BackendStatus::Ready);
                    shared.reconnecting.store(false, Ordering::SeqCst);
                    info!(attempt, "cache backend reconnected");
                    return;
                }
                Err(e) => {
                    shared.set_status(BackendStatus::Disconnected);
                    warn!(attempt, max_attempts, error = %e, "cache reconnect attempt failed");
                }
            }
        }

        shared.set_status(BackendStatus::Unavailable);
        shared.reconnecting.store(false, Ordering::SeqCst);
        error!(
            max_attempts,
            "cache backend unavailable: reconnect attempt ceiling reached"
        );
    });
}

/// Redis-backed cache store.
#[derive(Component)]
#[shaku(interface = CacheBackend)]
pub struct RedisBackend {
    /// Redis URL; host, port, and password travel in the URL.
    url: String,
    /// When false the backend never connects and every liveness check fails,
    /// which the policy layer treats as a permanent miss.
    enabled: bool,
    /// Ceiling on automatic reconnection attempts.
    max_reconnect_attempts: u32,
    /// Per-command timeout; an elapsed timeout is classified as the backend
    /// being unreachable.
    command_timeout: Duration,
    #[shaku(force_default)]
    shared: Arc<Shared>,
}

impl RedisBackend {
    /// Creates a backend from configuration. No connection is made until
    /// [`connect`](CacheBackend::connect) is called.
    #[must_use]
    pub fn new(config: &velora_config::RedisConfig) -> Self {
        Self {
            url: config.url.clone(),
            enabled: config.enabled,
            max_reconnect_attempts: config.max_reconnect_attempts,
            command_timeout: config.command_timeout(),
            shared: Arc::new(Shared::default()),
        }
    }

    /// Creates a permanently-disconnected backend (for when Redis is disabled).
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            url: String::new(),
            enabled: false,
            max_reconnect_attempts: 0,
            command_timeout: Duration::from_millis(250),
            shared: Arc::new(Shared::default()),
        }
    }

    /// Clones the live connection handle, or errors when disconnected.
    async fn connection(&self) -> VeloraResult<MultiplexedConnection> {
        if self.shared.status() != BackendStatus::Ready {
            return Err(VeloraError::cache("cache backend is not connected"));
        }
        self.shared
            .conn
            .read()
            .await
            .clone()
            .ok_or_else(|| VeloraError::cache("cache backend is not connected"))
    }

    /// Classifies a command failure. Connection-level failures flip the
    /// backend to disconnected and start the background reconnect loop.
    fn handle_command_error(&self, err: &redis::RedisError) {
        if err.is_io_error() || err.is_connection_dropped() || err.is_timeout() {
            self.mark_connection_lost();
        }
    }

    /// Records a lost connection and schedules reconnection.
    fn mark_connection_lost(&self) {
        if self.shared.status() == BackendStatus::Ready {
            self.shared.set_status(BackendStatus::Disconnected);
            warn!("cache backend connection lost");
        }
        spawn_reconnect(
            self.shared.clone(),
            self.url.clone(),
            self.max_reconnect_attempts,
        );
    }
}

#[async_trait]
impl CacheBackend for RedisBackend {
    async fn connect(&self) -> VeloraResult<()> {
        if !self.enabled {
            debug!("cache backend disabled, skipping connect");
            return Ok(());
        }

        // Serialize connect attempts: concurrent callers queue on the lock
        // and observe the winner's result instead of dialing themselves.
        let _guard = self.shared.connect_lock.lock().await;
        if self.is_connected() {
            return Ok(());
        }
        self.shared.closed.store(false, Ordering::SeqCst);

        self.shared.set_status(BackendStatus::Connecting);
        match establish_connection(&self.url).await {
            Ok(conn) => {
                *self.shared.conn.write().await = Some(conn);
                self.shared.set_status(BackendStatus::Ready);
                Ok(())
            }
            Err(e) => {
                self.shared.set_status(BackendStatus::Disconnected);
                warn!(error = %e, "cache backend connect failed");
                Err(e)
            }
        }
    }

    fn is_connected(&self) -> bool {
        self.shared.status() == BackendStatus::Ready
    }

    fn status(&self) -> BackendStatus {
        self.shared.status()
    }

    async fn disconnect(&self) {
        let _guard = self.shared.connect_lock.lock().await;
        self.shared.closed.store(true, Ordering::SeqCst);
        // Dropping the multiplexed handle closes the underlying socket.
        self.shared.conn.write().await.take();
        self.shared.set_status(BackendStatus::Disconnected);
    }

    async fn get_raw(&self, key: &str) -> VeloraResult<Option<String>> {
        let mut conn = self.connection().await?;
        match timeout(self.command_timeout, conn.get(key)).await {
            Ok(Ok(value)) => {
                let value: Option<String> = value;
                Ok(value)
            }
            Ok(Err(e)) => {
                self.handle_command_error(&e);
                Err(VeloraError::Cache(format!("GET '{}' failed: {}", key, e)))
            }
            Err(_) => {
                self.mark_connection_lost();
                Err(VeloraError::Cache(format!("GET '{}' timed out", key)))
            }
        }
    }

    async fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> VeloraResult<()> {
        let mut conn = self.connection().await?;
        let ttl_secs = ttl.as_secs().max(1);

        match timeout(self.command_timeout, conn.set_ex(key, value, ttl_secs)).await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(e)) => {
                self.handle_command_error(&e);
                Err(VeloraError::Cache(format!("SET '{}' failed: {}", key, e)))
            }
            Err(_) => {
                self.mark_connection_lost();
                Err(VeloraError::Cache(format!("SET '{}' timed out", key)))
            }
        }
    }

    async fn delete(&self, key: &str) -> VeloraResult<bool> {
        let mut conn = self.connection().await?;
        match timeout(self.command_timeout, conn.del(key)).await {
            Ok(Ok(deleted)) => {
                let deleted: i64 = deleted;
                Ok(deleted > 0)
            }
            Ok(Err(e)) => {
                self.handle_command_error(&e);
                Err(VeloraError::Cache(format!("DEL '{}' failed: {}", key, e)))
            }
            Err(_) => {
                self.mark_connection_lost();
                Err(VeloraError::Cache(format!("DEL '{}' timed out", key)))
            }
        }
    }

    async fn keys_matching(&self, pattern: &str) -> VeloraResult<Vec<String>> {
        let mut conn = self.connection().await?;
        // KEYS is acceptable at this keyspace size; SCAN would avoid the
        // O(N) block on very large instances.
        let command = async {
            let keys: Vec<String> = redis::cmd("KEYS").arg(pattern).query_async(&mut conn).await?;
            Ok::<_, redis::RedisError>(keys)
        };

        match timeout(self.command_timeout, command).await {
            Ok(Ok(keys)) => Ok(keys),
            Ok(Err(e)) => {
                self.handle_command_error(&e);
                Err(VeloraError::Cache(format!(
                    "KEYS '{}' failed: {}",
                    pattern, e
                )))
            }
            Err(_) => {
                self.mark_connection_lost();
                Err(VeloraError::Cache(format!("KEYS '{}' timed out", pattern)))
            }
        }
    }

    async fn delete_many(&self, keys: &[String]) -> VeloraResult<u64> {
        if keys.is_empty() {
            return Ok(0);
        }

        let mut conn = self.connection().await?;
        match timeout(self.command_timeout, conn.del(keys)).await {
            Ok(Ok(deleted)) => {
                let deleted: i64 = deleted;
                Ok(deleted.max(0) as u64)
            }
            Ok(Err(e)) => {
                self.handle_command_error(&e);
                Err(VeloraError::Cache(format!("DEL batch failed: {}", e)))
            }
            Err(_) => {
                self.mark_connection_lost();
                Err(VeloraError::cache("DEL batch timed out"))
            }
        }
    }
}

impl std::fmt::Debug for RedisBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisBackend")
            .field("enabled", &self.enabled)
            .field("status", &self.shared.status())
            .finish_non_exhaustive()
    }
}
