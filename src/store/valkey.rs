//! Valkey Backend
//!
//! Speaks RESP through the `redis` crate. The connection manager reconnects
//! by itself once the initial handshake has succeeded.

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use tracing::debug;

use crate::config::CacheConfig;
use crate::error::{CacheError, Result};
use crate::store::{Command, Connect, Reply, StoreClient};

// == Connector ==
/// Opens connections to a Valkey server.
#[derive(Debug, Clone)]
pub struct ValkeyConnector {
    url: String,
}

impl ValkeyConnector {
    /// Creates a connector for a `redis://` URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    /// Creates a connector for the host and port in `config`.
    pub fn from_config(config: &CacheConfig) -> Self {
        Self::new(config.url())
    }

    /// Returns the URL this connector dials.
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl Connect for ValkeyConnector {
    type Client = ValkeyClient;

    async fn connect(&self) -> Result<ValkeyClient> {
        let client = redis::Client::open(self.url.as_str()).map_err(|e| {
            CacheError::Connection(format!("Failed to create Valkey client: {}", e))
        })?;
        let connection = client.get_connection_manager().await.map_err(|e| {
            CacheError::Connection(format!("Failed to connect to Valkey at {}: {}", self.url, e))
        })?;
        debug!(url = %self.url, "[Valkey] connected");
        Ok(ValkeyClient { connection })
    }
}

// == Client ==
/// A live Valkey connection.
#[derive(Clone)]
pub struct ValkeyClient {
    connection: ConnectionManager,
}

#[async_trait]
impl StoreClient for ValkeyClient {
    async fn execute(&self, command: Command) -> Result<Reply> {
        debug!("[Valkey] {} {}", command.name(), command.key());
        let mut conn = self.connection.clone();
        match command {
            Command::Get { key } => {
                let value = redis::cmd("GET")
                    .arg(&key)
                    .query_async::<Option<Vec<u8>>>(&mut conn)
                    .await?;
                Ok(value.map(Reply::Bytes).unwrap_or(Reply::Nil))
            }
            Command::Set { key, value } => {
                redis::cmd("SET")
                    .arg(&key)
                    .arg(value)
                    .query_async::<()>(&mut conn)
                    .await?;
                Ok(Reply::Ok)
            }
            Command::Expire { key, seconds } => {
                let existed = redis::cmd("EXPIRE")
                    .arg(&key)
                    .arg(seconds)
                    .query_async::<i64>(&mut conn)
                    .await?;
                Ok(Reply::Integer(existed))
            }
        }
    }
}
