//! Username/password credential parsed from a secret payload

use serde::Deserialize;

use crate::source::SecretError;

/// A cache-service credential pair.
///
/// Lives only in invocation memory; the `Debug` impl redacts the password so
/// the pair can appear in log records without leaking secret material.
#[derive(Clone, Deserialize)]
pub struct Credential {
    pub username: String,
    pub password: String,
}

impl Credential {
    /// Parse the secret store's `SecretString` payload.
    ///
    /// The payload is JSON with `username` and `password` fields, matching
    /// the generated secret template
    /// `{"username": "<user>", "password": "<generated>"}`.
    pub fn from_secret_string(raw: &str) -> Result<Self, SecretError> {
        serde_json::from_str(raw).map_err(|e| SecretError::Format(e.to_string()))
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}
