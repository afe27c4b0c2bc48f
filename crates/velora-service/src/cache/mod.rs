//! Caching infrastructure for the service layer.
//!
//! The policy layer ([`CacheService`]) gives services a fail-safe,
//! read-through view over a connection-managed backend ([`CacheBackend`]).
//! Key naming lives in [`cache_keys`] and the per-namespace TTL policy in
//! [`ttl`].

mod backend;
pub mod cache_keys;
mod cache_interface;
mod cache_service;
mod memory_backend;
mod redis_backend;
pub mod ttl;

pub use backend::{BackendStatus, CacheBackend};
pub use cache_interface::{CacheExt, CacheInterface};
pub use cache_service::{CacheService, CacheServiceParameters};
pub use memory_backend::InMemoryBackend;
pub use redis_backend::{RedisBackend, RedisBackendParameters};
