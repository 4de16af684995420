//! The cache seam and its in-memory stand-in

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use thiserror::Error;

/// Cache access errors
#[derive(Debug, Error)]
pub enum CacheError {
    /// Opening the connection failed.
    #[error("Cache connection failed: {0}")]
    Connection(String),

    /// A SET or GET command failed on an established connection.
    #[error("Cache operation failed: {0}")]
    Operation(String),
}

/// One connection to the key-value service, scoped to a single invocation.
///
/// Commands take `&mut self` so a handle cannot be shared across concurrent
/// operations; each invocation opens its own.
#[async_trait]
pub trait CacheStore: Send {
    async fn set(&mut self, key: &str, value: &str) -> Result<(), CacheError>;

    async fn get(&mut self, key: &str) -> Result<Option<String>, CacheError>;
}

/// Which commands a connection's user may run.
///
/// Mirrors the service-side ACL users: the producer role is granted
/// `-@all +SET`, the consumer role `-@all +GET`, and the outsider role runs
/// with the default-deny user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Access {
    pub set: bool,
    pub get: bool,
}

impl Access {
    pub const FULL: Self = Self {
        set: true,
        get: true,
    };
    pub const SET_ONLY: Self = Self {
        set: true,
        get: false,
    };
    pub const GET_ONLY: Self = Self {
        set: false,
        get: true,
    };
    pub const NONE: Self = Self {
        set: false,
        get: false,
    };
}

/// In-memory `CacheStore` standing in for the external service.
///
/// Clones share the underlying entries, so two stores cloned from one
/// `MemoryStore` model two invocations talking to the same service.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    entries: Arc<DashMap<String, String>>,
    access: Access,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            entries: Arc::new(DashMap::new()),
            access: Access::FULL,
        }
    }

    /// A view of the same entries restricted to the given access.
    #[must_use]
    pub fn with_access(&self, access: Access) -> Self {
        Self {
            entries: Arc::clone(&self.entries),
            access,
        }
    }

    fn denied(command: &str) -> CacheError {
        // Same shape as the service's ACL rejection
        CacheError::Operation(format!(
            "NOPERM this user has no permissions to run the '{command}' command"
        ))
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CacheStore for MemoryStore {
    async fn set(&mut self, key: &str, value: &str) -> Result<(), CacheError> {
        if !self.access.set {
            return Err(Self::denied("set"));
        }
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn get(&mut self, key: &str) -> Result<Option<String>, CacheError> {
        if !self.access.get {
            return Err(Self::denied("get"));
        }
        Ok(self.entries.get(key).map(|entry| entry.value().clone()))
    }
}
