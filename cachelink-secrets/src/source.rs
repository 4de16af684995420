//! Secret store access

use std::collections::HashMap;

use async_trait::async_trait;
use thiserror::Error;
use tracing::info;

use crate::credential::Credential;

/// Secret retrieval errors
#[derive(Debug, Error)]
pub enum SecretError {
    /// The store call itself failed: unreachable, access denied, unknown
    /// identifier, or a secret with no string value.
    #[error("Secret retrieval failed: {0}")]
    Retrieval(String),

    /// The payload came back but is not the expected JSON credential shape.
    #[error("Secret payload is malformed: {0}")]
    Format(String),
}

/// One secret store lookup per invocation.
///
/// Implementations fetch the raw `SecretString`; parsing into a
/// [`Credential`] is shared, so a malformed payload fails the same way for
/// every source.
#[async_trait]
pub trait SecretSource: Send + Sync {
    async fn fetch_secret_string(&self, secret_id: &str) -> Result<String, SecretError>;

    /// Fetch and parse a credential pair in one step.
    async fn fetch_credential(&self, secret_id: &str) -> Result<Credential, SecretError> {
        let raw = self.fetch_secret_string(secret_id).await?;
        Credential::from_secret_string(&raw)
    }
}

/// Secrets Manager-backed source.
#[derive(Debug, Clone)]
pub struct AwsSecretSource {
    client: aws_sdk_secretsmanager::Client,
}

impl AwsSecretSource {
    pub fn new(client: aws_sdk_secretsmanager::Client) -> Self {
        Self { client }
    }

    /// Build a client from the ambient AWS environment (region, credentials
    /// provider chain, endpoint overrides).
    pub async fn from_env() -> Self {
        let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        Self::new(aws_sdk_secretsmanager::Client::new(&config))
    }
}

#[async_trait]
impl SecretSource for AwsSecretSource {
    async fn fetch_secret_string(&self, secret_id: &str) -> Result<String, SecretError> {
        info!(secret_id = %secret_id, "Fetching secret value");

        let output = self
            .client
            .get_secret_value()
            .secret_id(secret_id)
            .send()
            .await
            .map_err(|e| SecretError::Retrieval(e.to_string()))?;

        output
            .secret_string()
            .map(ToString::to_string)
            .ok_or_else(|| SecretError::Retrieval(format!("Secret {secret_id} has no string value")))
    }
}

/// Fixed in-memory source for tests and local runs.
#[derive(Debug, Default, Clone)]
pub struct StaticSecretSource {
    secrets: HashMap<String, String>,
}

impl StaticSecretSource {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_secret(mut self, secret_id: impl Into<String>, value: impl Into<String>) -> Self {
        self.secrets.insert(secret_id.into(), value.into());
        self
    }
}

#[async_trait]
impl SecretSource for StaticSecretSource {
    async fn fetch_secret_string(&self, secret_id: &str) -> Result<String, SecretError> {
        self.secrets
            .get(secret_id)
            .cloned()
            .ok_or_else(|| SecretError::Retrieval(format!("Secret not found: {secret_id}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PRODUCER_ARN: &str =
        "arn:aws:secretsmanager:us-east-1:000000000000:secret:producer-abc123";

    #[tokio::test]
    async fn test_static_source_fetches_credential() {
        let source = StaticSecretSource::new()
            .with_secret(PRODUCER_ARN, r#"{"username":"producer","password":"pw"}"#);

        let credential = source
            .fetch_credential(PRODUCER_ARN)
            .await
            .expect("credential");

        assert_eq!(credential.username, "producer");
        assert_eq!(credential.password, "pw");
    }

    #[tokio::test]
    async fn test_unknown_secret_is_retrieval_error() {
        let source = StaticSecretSource::new();

        let result = source.fetch_credential(PRODUCER_ARN).await;
        assert!(matches!(result, Err(SecretError::Retrieval(_))));
    }

    #[tokio::test]
    async fn test_malformed_payload_is_format_error() {
        let source = StaticSecretSource::new().with_secret(PRODUCER_ARN, "not-json");

        let result = source.fetch_credential(PRODUCER_ARN).await;
        assert!(matches!(result, Err(SecretError::Format(_))));
    }
}
