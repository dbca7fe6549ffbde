//! In-Process Store Module
//!
//! A HashMap-backed store that answers the same commands as Valkey, with
//! lazy TTL expiration. Useful for local development and tests.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::error::Result;
use crate::store::{Command, Connect, Reply, StoreClient, StoredEntry, StoreStats};

#[derive(Debug, Default)]
struct Inner {
    entries: HashMap<String, StoredEntry>,
    stats: StoreStats,
}

// == Memory Store ==
/// Shared in-process store; clones share the same entries.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<Inner>>,
}

impl MemoryStore {
    // == Constructor ==
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    // == Stats ==
    /// Returns current command statistics.
    pub async fn stats(&self) -> StoreStats {
        let inner = self.inner.read().await;
        let mut stats = inner.stats.clone();
        stats.set_total_entries(inner.entries.len());
        stats
    }

    // == Length ==
    /// Returns the number of entries held, including expired ones not yet
    /// removed by a lookup.
    pub async fn len(&self) -> usize {
        self.inner.read().await.entries.len()
    }

    // == Is Empty ==
    /// Returns true if the store holds no entries.
    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.entries.is_empty()
    }

    // == Time To Live ==
    /// Remaining TTL of `key` in milliseconds.
    ///
    /// `None` when the key is absent or has no TTL; an entry expired by a
    /// zero TTL reports `Some(0)` until the next lookup removes it.
    pub async fn ttl_ms(&self, key: &str) -> Option<i64> {
        self.inner
            .read()
            .await
            .entries
            .get(key)
            .and_then(StoredEntry::ttl_remaining_ms)
    }

    fn get(inner: &mut Inner, key: &str) -> Reply {
        let expired = match inner.entries.get(key) {
            Some(entry) if !entry.is_expired() => {
                let value = entry.value.clone();
                inner.stats.record_hit();
                return Reply::Bytes(value);
            }
            Some(_) => true,
            None => false,
        };

        if expired {
            inner.entries.remove(key);
            inner.stats.set_total_entries(inner.entries.len());
        }
        inner.stats.record_miss();
        Reply::Nil
    }

    fn set(inner: &mut Inner, key: String, value: Vec<u8>) -> Reply {
        // SET replaces the value and discards any TTL
        inner.entries.insert(key, StoredEntry::new(value));
        inner.stats.record_set();
        inner.stats.set_total_entries(inner.entries.len());
        Reply::Ok
    }

    fn expire(inner: &mut Inner, key: &str, seconds: i64) -> Reply {
        match inner.entries.get_mut(key) {
            Some(entry) if !entry.is_expired() => {
                entry.expire_in(seconds);
                inner.stats.record_expiration();
                Reply::Integer(1)
            }
            _ => Reply::Integer(0),
        }
    }
}

#[async_trait]
impl StoreClient for MemoryStore {
    async fn execute(&self, command: Command) -> Result<Reply> {
        debug!("[Memory] {} {}", command.name(), command.key());
        let mut inner = self.inner.write().await;
        let reply = match command {
            Command::Get { key } => Self::get(&mut inner, &key),
            Command::Set { key, value } => Self::set(&mut inner, key, value),
            Command::Expire { key, seconds } => Self::expire(&mut inner, &key, seconds),
        };
        Ok(reply)
    }
}

#[async_trait]
impl Connect for MemoryStore {
    type Client = MemoryStore;

    async fn connect(&self) -> Result<MemoryStore> {
        Ok(self.clone())
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    fn get(key: &str) -> Command {
        Command::Get {
            key: key.to_string(),
        }
    }

    fn set(key: &str, value: &[u8]) -> Command {
        Command::Set {
            key: key.to_string(),
            value: value.to_vec(),
        }
    }

    fn expire(key: &str, seconds: i64) -> Command {
        Command::Expire {
            key: key.to_string(),
            seconds,
        }
    }

    #[tokio::test]
    async fn test_store_new() {
        let store = MemoryStore::new();
        assert_eq!(store.len().await, 0);
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_store_set_and_get() {
        let store = MemoryStore::new();

        assert_eq!(store.execute(set("key1", b"value1")).await.unwrap(), Reply::Ok);
        let reply = store.execute(get("key1")).await.unwrap();

        assert_eq!(reply, Reply::Bytes(b"value1".to_vec()));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_store_get_nonexistent() {
        let store = MemoryStore::new();

        let reply = store.execute(get("nonexistent")).await.unwrap();
        assert_eq!(reply, Reply::Nil);
    }

    #[tokio::test]
    async fn test_store_overwrite() {
        let store = MemoryStore::new();

        store.execute(set("key1", b"value1")).await.unwrap();
        store.execute(set("key1", b"value2")).await.unwrap();

        let reply = store.execute(get("key1")).await.unwrap();
        assert_eq!(reply, Reply::Bytes(b"value2".to_vec()));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_expire_zero_hides_entry() {
        let store = MemoryStore::new();

        store.execute(set("key1", b"value1")).await.unwrap();
        let reply = store.execute(expire("key1", 0)).await.unwrap();
        assert_eq!(reply, Reply::Integer(1));

        // Still held until a lookup removes it, but already unreadable
        assert_eq!(store.ttl_ms("key1").await, Some(0));
        assert_eq!(store.execute(get("key1")).await.unwrap(), Reply::Nil);
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_expire_missing_key() {
        let store = MemoryStore::new();

        let reply = store.execute(expire("ghost", 0)).await.unwrap();
        assert_eq!(reply, Reply::Integer(0));
        assert_eq!(store.stats().await.expirations, 0);
    }

    #[tokio::test]
    async fn test_expire_positive_keeps_entry_readable() {
        let store = MemoryStore::new();

        store.execute(set("key1", b"value1")).await.unwrap();
        store.execute(expire("key1", 60)).await.unwrap();

        assert!(store.ttl_ms("key1").await.unwrap() > 0);
        assert_eq!(
            store.execute(get("key1")).await.unwrap(),
            Reply::Bytes(b"value1".to_vec())
        );
    }

    #[tokio::test]
    async fn test_expire_with_huge_ttl_keeps_entry() {
        let store = MemoryStore::new();

        store.execute(set("key1", b"value1")).await.unwrap();
        let reply = store.execute(expire("key1", i64::MAX)).await.unwrap();

        assert_eq!(reply, Reply::Integer(1));
        assert_eq!(
            store.execute(get("key1")).await.unwrap(),
            Reply::Bytes(b"value1".to_vec())
        );
    }

    #[tokio::test]
    async fn test_set_clears_ttl() {
        let store = MemoryStore::new();

        store.execute(set("key1", b"value1")).await.unwrap();
        store.execute(expire("key1", 0)).await.unwrap();
        store.execute(set("key1", b"value2")).await.unwrap();

        assert_eq!(store.ttl_ms("key1").await, None);
        assert_eq!(
            store.execute(get("key1")).await.unwrap(),
            Reply::Bytes(b"value2".to_vec())
        );
    }

    #[tokio::test]
    async fn test_store_stats() {
        let store = MemoryStore::new();

        store.execute(set("key1", b"value1")).await.unwrap();
        store.execute(get("key1")).await.unwrap(); // hit
        store.execute(get("nonexistent")).await.unwrap(); // miss
        store.execute(expire("key1", 0)).await.unwrap();
        store.execute(get("key1")).await.unwrap(); // miss after expiry

        let stats = store.stats().await;
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 2);
        assert_eq!(stats.sets, 1);
        assert_eq!(stats.expirations, 1);
        assert_eq!(stats.total_entries, 0);
    }

    #[tokio::test]
    async fn test_clones_share_entries() {
        let store = MemoryStore::new();
        let client = store.connect().await.unwrap();

        client.execute(set("shared", b"1")).await.unwrap();
        assert_eq!(
            store.execute(get("shared")).await.unwrap(),
            Reply::Bytes(b"1".to_vec())
        );
    }
}
