//! Handler behavior tests
//!
//! These drive the entry points against the in-memory stand-ins: the cache
//! service is a `MemoryStore` (with per-command access mirroring the
//! service-side ACL users) and the secret store is a `StaticSecretSource`.

use chrono::NaiveDateTime;

use cachelink::{
    connect_with_credentials, handle_consume, handle_produce, handle_roundtrip, HandlerError,
    OpOutcome, KEY_NAME, KEY_TIME, TIME_FORMAT,
};
use cachelink_cache::{Access, CacheStore, MemoryStore};
use cachelink_core::{ConfigError, HandlerConfig, InvocationContext, InvocationEvent};
use cachelink_secrets::{SecretError, StaticSecretSource};

const SECRET_ARN: &str = "arn:aws:secretsmanager:us-east-1:000000000000:secret:producer-abc123";

fn invocation(function_name: &str) -> (InvocationEvent, InvocationContext) {
    (
        InvocationEvent::default(),
        InvocationContext::new(function_name, 30_000),
    )
}

fn credentialed_config() -> HandlerConfig {
    HandlerConfig::from_lookup(|var| match var {
        "redis_endpoint" => Some("cache.local".to_string()),
        "redis_port" => Some("6379".to_string()),
        "secret_arn" => Some(SECRET_ARN.to_string()),
        _ => None,
    })
    .expect("valid config")
}

#[tokio::test]
async fn test_roundtrip_returns_value_just_written() {
    let (event, ctx) = invocation("roundtripFn");
    let mut store = MemoryStore::new();

    let value = handle_roundtrip(&event, &ctx, &mut store)
        .await
        .expect("round trip");

    assert_eq!(value.as_deref(), Some("orkb"));
    assert_eq!(
        store.get(KEY_NAME).await.expect("get").as_deref(),
        Some("orkb")
    );
}

#[tokio::test]
async fn test_produce_writes_parseable_timestamp() {
    let (event, ctx) = invocation("producerFn");
    let mut store = MemoryStore::new();

    let report = handle_produce(&event, &ctx, &mut store).await;

    assert!(report.all_succeeded());
    let Some(OpOutcome::Succeeded(Some(value))) = report.get else {
        panic!("expected a retrieved value");
    };
    NaiveDateTime::parse_from_str(&value, TIME_FORMAT).expect("timestamp matches layout");
}

#[tokio::test]
async fn test_produce_attempts_get_after_set_failure() {
    let (event, ctx) = invocation("producerFn");
    // Consumer-role ACL: SET denied, GET allowed
    let mut store = MemoryStore::new().with_access(Access::GET_ONLY);

    let report = handle_produce(&event, &ctx, &mut store).await;

    assert!(matches!(report.set, Some(OpOutcome::Failed(_))));
    // The GET must still have been attempted, and reports no value rather
    // than a stale one
    assert!(matches!(report.get, Some(OpOutcome::Succeeded(None))));
    assert!(!report.all_succeeded());
}

#[tokio::test]
async fn test_produce_under_set_only_acl_still_writes() {
    let (event, ctx) = invocation("producerFn");
    let base = MemoryStore::new();
    let mut store = base.with_access(Access::SET_ONLY);

    let report = handle_produce(&event, &ctx, &mut store).await;

    assert!(matches!(report.set, Some(OpOutcome::Succeeded(None))));
    assert!(matches!(report.get, Some(OpOutcome::Failed(_))));

    // The write landed even though the read-back was denied
    let mut reader = base.with_access(Access::GET_ONLY);
    assert!(reader.get(KEY_TIME).await.expect("get").is_some());
}

#[tokio::test]
async fn test_consumer_reads_producer_handoff() {
    let base = MemoryStore::new();

    // Producer invocation wrote the key earlier
    let mut producer = base.with_access(Access::SET_ONLY);
    producer
        .set(KEY_TIME, "25/12/2023 10:00:00")
        .await
        .expect("set");

    // A later consumer invocation against the same cache service
    let (event, ctx) = invocation("consumerFn");
    let mut consumer = base.with_access(Access::GET_ONLY);
    let report = handle_consume(&event, &ctx, &mut consumer).await;

    assert!(report.set.is_none());
    let Some(OpOutcome::Succeeded(Some(value))) = report.get else {
        panic!("expected a retrieved value");
    };
    assert_eq!(value, "25/12/2023 10:00:00");
}

#[tokio::test]
async fn test_consume_missing_key_reports_no_value() {
    let (event, ctx) = invocation("consumerFn");
    let mut store = MemoryStore::new();

    let report = handle_consume(&event, &ctx, &mut store).await;

    assert!(report.all_succeeded());
    assert!(matches!(report.get, Some(OpOutcome::Succeeded(None))));
}

#[tokio::test]
async fn test_malformed_secret_fails_before_any_connection() {
    let config = credentialed_config();
    let secrets = StaticSecretSource::new().with_secret(SECRET_ARN, r#"{"username":"producer"}"#);

    // cache.local does not resolve; reaching the connect step would fail
    // with a connection error instead of the format error asserted here
    let result = connect_with_credentials(&config, &secrets).await;

    assert!(matches!(
        result,
        Err(HandlerError::Secret(SecretError::Format(_)))
    ));
}

#[tokio::test]
async fn test_unknown_secret_is_retrieval_failure() {
    let config = credentialed_config();
    let secrets = StaticSecretSource::new();

    let result = connect_with_credentials(&config, &secrets).await;

    assert!(matches!(
        result,
        Err(HandlerError::Secret(SecretError::Retrieval(_)))
    ));
}

#[test]
fn test_missing_environment_fails_before_any_network_call() {
    let result = HandlerConfig::from_lookup(|_| None);
    assert!(matches!(
        result,
        Err(ConfigError::MissingVar("redis_endpoint"))
    ));
}
