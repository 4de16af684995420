//! Cache service access for cachelink
//!
//! The external key-value service sits behind the `CacheStore` trait:
//! - `RedisStore` opens one Redis connection per invocation, plaintext or
//!   TLS with ACL authentication
//! - `MemoryStore` is an in-memory stand-in for tests, with per-command
//!   access control mirroring the service's ACL users

mod redis_store;
mod store;

pub use redis_store::{ConnectParams, RedisStore};
pub use store::{Access, CacheError, CacheStore, MemoryStore};
