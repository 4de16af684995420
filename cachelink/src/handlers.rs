//! Handler entry points
//!
//! Every entry point follows the same sequence: resolved config, optional
//! credential fetch, one fresh connection, one or two key operations, a log
//! line per outcome. The fetch-credential-then-connect steps live in
//! [`connect_with_credentials`]; the entry points stay thin on top of it.

use chrono::Utc;
use tracing::{info, warn};

use cachelink_cache::{CacheStore, ConnectParams, RedisStore};
use cachelink_core::{HandlerConfig, InvocationContext, InvocationEvent};
use cachelink_secrets::SecretSource;

use crate::error::HandlerError;

/// Key written by the round-trip handler.
pub const KEY_NAME: &str = "name";
/// Key handed off between the producer and consumer invocations.
pub const KEY_TIME: &str = "time";
/// Timestamp layout written under [`KEY_TIME`].
pub const TIME_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

const NAME_VALUE: &str = "orkb";

/// Outcome of one guarded cache operation.
#[derive(Debug)]
pub enum OpOutcome {
    /// Operation completed; a GET carries the retrieved value.
    Succeeded(Option<String>),
    /// Operation failed and was logged.
    Failed(String),
}

impl OpOutcome {
    pub fn succeeded(&self) -> bool {
        matches!(self, Self::Succeeded(_))
    }
}

/// Per-invocation summary of the guarded entry points.
///
/// A `Some` slot means the operation was attempted; a GET slot that is
/// `Some` after a failed SET is the contract, not an accident.
#[derive(Debug, Default)]
pub struct OpReport {
    pub set: Option<OpOutcome>,
    pub get: Option<OpOutcome>,
}

impl OpReport {
    pub fn all_succeeded(&self) -> bool {
        self.set.iter().all(OpOutcome::succeeded) && self.get.iter().all(OpOutcome::succeeded)
    }
}

/// Resolve the configured credential and open one cache connection.
///
/// The shared setup for every entry point: when a secret is configured the
/// credential is fetched and parsed first, so secret failures surface before
/// any cache connection is attempted.
pub async fn connect_with_credentials<S: SecretSource>(
    config: &HandlerConfig,
    secrets: &S,
) -> Result<RedisStore, HandlerError> {
    let credential = match config.secret_arn.as_deref() {
        Some(secret_arn) => Some(secrets.fetch_credential(secret_arn).await?),
        None => None,
    };

    let params = ConnectParams {
        host: config.endpoint.clone(),
        port: config.port,
        tls: config.tls,
        credential,
    };

    Ok(RedisStore::connect(&params).await?)
}

/// Unguarded round trip: SET `"name"` then GET it back on the same
/// connection. Any failure propagates to the hosting platform.
pub async fn handle_roundtrip<C: CacheStore>(
    _event: &InvocationEvent,
    ctx: &InvocationContext,
    store: &mut C,
) -> Result<Option<String>, HandlerError> {
    info!(request_id = %ctx.request_id, function = %ctx.function_name, "Round-trip invocation");

    store.set(KEY_NAME, NAME_VALUE).await?;
    info!(key = KEY_NAME, value = NAME_VALUE, "SET succeeded");

    let value = store.get(KEY_NAME).await?;
    match value.as_deref() {
        Some(v) => info!(key = KEY_NAME, value = %v, "GET succeeded"),
        None => info!(key = KEY_NAME, "GET succeeded, key not present"),
    }

    Ok(value)
}

/// Guarded producer: SET `"time"` to the current timestamp, then read it
/// back. Each operation is caught-and-logged individually; the GET runs even
/// when the SET failed.
pub async fn handle_produce<C: CacheStore>(
    _event: &InvocationEvent,
    ctx: &InvocationContext,
    store: &mut C,
) -> OpReport {
    info!(request_id = %ctx.request_id, function = %ctx.function_name, "Producer invocation");

    let time_now = Utc::now().format(TIME_FORMAT).to_string();

    let set = match store.set(KEY_TIME, &time_now).await {
        Ok(()) => {
            info!(key = KEY_TIME, value = %time_now, "SET succeeded");
            OpOutcome::Succeeded(None)
        }
        Err(e) => {
            warn!(key = KEY_TIME, error = %e, "SET failed");
            OpOutcome::Failed(e.to_string())
        }
    };

    // GET runs regardless of the SET outcome
    let get = guarded_get(store, KEY_TIME).await;

    OpReport {
        set: Some(set),
        get: Some(get),
    }
}

/// Guarded consumer: GET `"time"` and log the retrieved value.
pub async fn handle_consume<C: CacheStore>(
    _event: &InvocationEvent,
    ctx: &InvocationContext,
    store: &mut C,
) -> OpReport {
    info!(request_id = %ctx.request_id, function = %ctx.function_name, "Consumer invocation");

    OpReport {
        set: None,
        get: Some(guarded_get(store, KEY_TIME).await),
    }
}

/// GET with catch-and-log semantics. The value is only reported when the GET
/// itself succeeded.
async fn guarded_get<C: CacheStore>(store: &mut C, key: &str) -> OpOutcome {
    match store.get(key).await {
        Ok(value) => {
            match value.as_deref() {
                Some(v) => info!(key = %key, value = %v, "GET succeeded"),
                None => info!(key = %key, "GET succeeded, key not present"),
            }
            OpOutcome::Succeeded(value)
        }
        Err(e) => {
            warn!(key = %key, error = %e, "GET failed");
            OpOutcome::Failed(e.to_string())
        }
    }
}
