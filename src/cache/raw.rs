//! Raw Cache Module
//!
//! Byte-level get/set/expire against the backing store.

use tracing::debug;

use crate::cache::Connector;
use crate::error::{CacheError, Result};
use crate::store::{Command, Connect, Reply, StoreClient};

// == Raw Cache ==
/// Byte-oriented cache operations over a lazily connected store.
pub struct RawCache<C: Connect> {
    connector: Connector<C>,
}

impl<C: Connect> RawCache<C> {
    // == Constructor ==
    /// Creates a raw cache; the store is not contacted until the first operation.
    pub fn new(connect: C) -> Self {
        Self {
            connector: Connector::new(connect),
        }
    }

    // == Connection State ==
    /// Number of connect attempts made so far.
    pub fn connect_attempts(&self) -> u64 {
        self.connector.attempts()
    }

    /// Returns true if a store handle is currently memoized.
    pub async fn is_connected(&self) -> bool {
        self.connector.is_connected().await
    }

    /// Drops the memoized handle so the next operation reconnects.
    pub async fn reset_connection(&self) {
        self.connector.reset().await
    }

    // == Get ==
    /// Fetches the bytes under `key`.
    ///
    /// An absent key is reported as [`CacheError::Miss`] so callers can tell
    /// "not found" apart from a failed lookup.
    pub async fn get(&self, key: &str) -> Result<Vec<u8>> {
        let client = self.connector.client().await?;
        match client
            .execute(Command::Get {
                key: key.to_string(),
            })
            .await?
        {
            Reply::Bytes(value) => Ok(value),
            Reply::Nil => Err(CacheError::Miss(key.to_string())),
            other => Err(unexpected("GET", &other)),
        }
    }

    // == Set ==
    /// Stores `value` under `key`, overwriting unconditionally.
    pub async fn set(&self, key: &str, value: Vec<u8>) -> Result<()> {
        let client = self.connector.client().await?;
        match client
            .execute(Command::Set {
                key: key.to_string(),
                value,
            })
            .await?
        {
            Reply::Ok => Ok(()),
            other => Err(unexpected("SET", &other)),
        }
    }

    // == Expire ==
    /// Sets the TTL of `key` to zero, making it unavailable to later lookups.
    ///
    /// This is a TTL mutation rather than a delete; expiring an absent key
    /// is not an error.
    pub async fn expire(&self, key: &str) -> Result<()> {
        let client = self.connector.client().await?;
        match client
            .execute(Command::Expire {
                key: key.to_string(),
                seconds: 0,
            })
            .await?
        {
            Reply::Integer(existed) => {
                debug!(key, existed = existed == 1, "expired key");
                Ok(())
            }
            other => Err(unexpected("EXPIRE", &other)),
        }
    }
}

fn unexpected(command: &str, reply: &Reply) -> CacheError {
    CacheError::Store(format!("unexpected reply to {}: {:?}", command, reply))
}
