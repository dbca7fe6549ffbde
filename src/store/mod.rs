//! Store Module
//!
//! The backing-store boundary: a minimal command set and the traits a
//! backend implements to take part in cache-aside lookups.

mod entry;
mod memory;
mod stats;
mod valkey;

use async_trait::async_trait;

use crate::error::Result;

// Re-export public types
pub use entry::StoredEntry;
pub use memory::MemoryStore;
pub use stats::StoreStats;
pub use valkey::{ValkeyClient, ValkeyConnector};

// == Command ==
/// A single command sent to the backing store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Fetch the bytes stored under `key`
    Get { key: String },
    /// Store `value` under `key`, replacing any previous value and TTL
    Set { key: String, value: Vec<u8> },
    /// Set the time-to-live of `key`; zero or less expires it immediately
    Expire { key: String, seconds: i64 },
}

impl Command {
    /// Key the command operates on.
    pub fn key(&self) -> &str {
        match self {
            Command::Get { key } | Command::Set { key, .. } | Command::Expire { key, .. } => key,
        }
    }

    /// Command name as the store knows it.
    pub fn name(&self) -> &'static str {
        match self {
            Command::Get { .. } => "GET",
            Command::Set { .. } => "SET",
            Command::Expire { .. } => "EXPIRE",
        }
    }
}

// == Reply ==
/// A backing store reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// A bulk string
    Bytes(Vec<u8>),
    /// The "not found" sentinel
    Nil,
    /// Simple acknowledgement
    Ok,
    /// Integer reply (EXPIRE answers 1 when the key existed, 0 otherwise)
    Integer(i64),
}

// == Store Client ==
/// A connected handle to the backing store.
///
/// Handles are cloned for every operation and must be cheap to clone.
#[async_trait]
pub trait StoreClient: Clone + Send + Sync + 'static {
    /// Executes a single command.
    async fn execute(&self, command: Command) -> Result<Reply>;
}

// == Connect ==
/// Establishes a [`StoreClient`].
#[async_trait]
pub trait Connect: Send + Sync {
    type Client: StoreClient;

    /// Performs one connect attempt.
    async fn connect(&self) -> Result<Self::Client>;
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_key_and_name() {
        let get = Command::Get {
            key: "a".to_string(),
        };
        let set = Command::Set {
            key: "b".to_string(),
            value: b"1".to_vec(),
        };
        let expire = Command::Expire {
            key: "c".to_string(),
            seconds: 0,
        };

        assert_eq!((get.key(), get.name()), ("a", "GET"));
        assert_eq!((set.key(), set.name()), ("b", "SET"));
        assert_eq!((expire.key(), expire.name()), ("c", "EXPIRE"));
    }
}
