//! Handler configuration resolved from the invocation environment

use thiserror::Error;

/// Environment variable naming the cache service host.
pub const ENV_REDIS_ENDPOINT: &str = "redis_endpoint";
/// Environment variable naming the cache service port.
pub const ENV_REDIS_PORT: &str = "redis_port";
/// Environment variable naming the secret to fetch credentials from.
pub const ENV_SECRET_ARN: &str = "secret_arn";
/// Optional override for the TLS default.
pub const ENV_REDIS_TLS: &str = "redis_tls";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {var}: {value}")]
    InvalidValue { var: &'static str, value: String },
}

/// Connection parameters for one invocation, read from the environment.
///
/// Resolution happens before any network call, so a missing variable fails
/// the invocation without touching the secret store or the cache service.
#[derive(Debug, Clone)]
pub struct HandlerConfig {
    /// Cache service host.
    pub endpoint: String,
    /// Cache service port.
    pub port: u16,
    /// Secret identifier for credentialed entry points.
    pub secret_arn: Option<String>,
    /// Whether to wrap the cache connection in TLS.
    ///
    /// Defaults to true when a secret is configured (authenticated
    /// connections go over the encrypted transport), false otherwise.
    pub tls: bool,
}

impl HandlerConfig {
    /// Resolve configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Resolve configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let endpoint =
            lookup(ENV_REDIS_ENDPOINT).ok_or(ConfigError::MissingVar(ENV_REDIS_ENDPOINT))?;

        let port_raw = lookup(ENV_REDIS_PORT).ok_or(ConfigError::MissingVar(ENV_REDIS_PORT))?;
        let port = port_raw
            .trim()
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidValue {
                var: ENV_REDIS_PORT,
                value: port_raw,
            })?;

        let secret_arn = lookup(ENV_SECRET_ARN);

        let tls = match lookup(ENV_REDIS_TLS) {
            Some(raw) => parse_flag(&raw).ok_or(ConfigError::InvalidValue {
                var: ENV_REDIS_TLS,
                value: raw,
            })?,
            None => secret_arn.is_some(),
        };

        Ok(Self {
            endpoint,
            port,
            secret_arn,
            tls,
        })
    }

    /// The secret identifier, required by credentialed entry points.
    pub fn require_secret_arn(&self) -> Result<&str, ConfigError> {
        self.secret_arn
            .as_deref()
            .ok_or(ConfigError::MissingVar(ENV_SECRET_ARN))
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}
