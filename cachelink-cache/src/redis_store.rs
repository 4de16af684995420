//! Redis-backed cache store

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::{AsyncCommands, ConnectionAddr, ConnectionInfo, RedisConnectionInfo};
use tracing::info;

use cachelink_secrets::Credential;

use crate::store::{CacheError, CacheStore};

/// Everything needed to open one connection to the cache service.
#[derive(Debug, Clone)]
pub struct ConnectParams {
    pub host: String,
    pub port: u16,
    pub tls: bool,
    pub credential: Option<Credential>,
}

/// One Redis connection, opened fresh per invocation and dropped with the
/// invocation. Not pooled, not reused.
pub struct RedisStore {
    conn: MultiplexedConnection,
}

impl RedisStore {
    /// Open a connection using the resolved parameters.
    ///
    /// With `tls` set the connection goes over `rediss` with certificate
    /// verification; a configured credential authenticates against the
    /// service's ACL on connect.
    pub async fn connect(params: &ConnectParams) -> Result<Self, CacheError> {
        let addr = if params.tls {
            ConnectionAddr::TcpTls {
                host: params.host.clone(),
                port: params.port,
                insecure: false,
                tls_params: None,
            }
        } else {
            ConnectionAddr::Tcp(params.host.clone(), params.port)
        };

        let info = ConnectionInfo {
            addr,
            redis: RedisConnectionInfo {
                username: params.credential.as_ref().map(|c| c.username.clone()),
                password: params.credential.as_ref().map(|c| c.password.clone()),
                ..Default::default()
            },
        };

        info!(
            host = %params.host,
            port = params.port,
            tls = params.tls,
            user = params.credential.as_ref().map_or("<none>", |c| c.username.as_str()),
            "Connecting to cache service"
        );

        let client =
            redis::Client::open(info).map_err(|e| CacheError::Connection(e.to_string()))?;
        let conn = client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| CacheError::Connection(e.to_string()))?;

        Ok(Self { conn })
    }
}

#[async_trait]
impl CacheStore for RedisStore {
    async fn set(&mut self, key: &str, value: &str) -> Result<(), CacheError> {
        self.conn
            .set::<_, _, ()>(key, value)
            .await
            .map_err(|e| CacheError::Operation(e.to_string()))
    }

    async fn get(&mut self, key: &str) -> Result<Option<String>, CacheError> {
        self.conn
            .get::<_, Option<String>>(key)
            .await
            .map_err(|e| CacheError::Operation(e.to_string()))
    }
}
