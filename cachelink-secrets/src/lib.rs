//! Credential retrieval for cachelink
//!
//! Provides the `SecretSource` seam over the external secret store:
//! - `AwsSecretSource` fetches secret values from AWS Secrets Manager
//! - `StaticSecretSource` serves fixed values for tests and local runs
//! - `Credential` parses the JSON secret payload into username/password

mod credential;
mod source;

pub use credential::Credential;
pub use source::{AwsSecretSource, SecretError, SecretSource, StaticSecretSource};
