//! Aggregate handler error

use thiserror::Error;

use cachelink_cache::CacheError;
use cachelink_core::ConfigError;
use cachelink_secrets::SecretError;

/// Any failure an entry point can propagate to the hosting platform.
///
/// Guarded entry points catch `Cache(CacheError::Operation)` around SET and
/// GET individually and log it instead; everything else always propagates.
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error(transparent)]
    Configuration(#[from] ConfigError),

    #[error(transparent)]
    Secret(#[from] SecretError),

    #[error(transparent)]
    Cache(#[from] CacheError),
}
