//! Error types for the cache accessor
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache accessor.
///
/// Payloads are plain strings so a failed connect outcome can be cloned
/// out to every caller that waited on the same attempt.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// Connecting to the backing store failed
    #[error("Connection error: {0}")]
    Connection(String),

    /// Key is not present in the backing store
    #[error("Key not found: {0}")]
    Miss(String),

    /// The backing store rejected a command or replied unexpectedly
    #[error("Store error: {0}")]
    Store(String),

    /// A value could not be encoded
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Stored bytes could not be decoded into the requested type
    #[error("Deserialization error: {0}")]
    Deserialization(String),
}

impl CacheError {
    /// Returns true if this is the "key not found" outcome rather than a failure.
    pub fn is_miss(&self) -> bool {
        matches!(self, CacheError::Miss(_))
    }
}

impl From<redis::RedisError> for CacheError {
    fn from(err: redis::RedisError) -> Self {
        if err.is_io_error() || err.is_connection_dropped() || err.is_connection_refusal() {
            CacheError::Connection(err.to_string())
        } else {
            CacheError::Store(err.to_string())
        }
    }
}

// == Result Type Alias ==
/// Convenience Result type for the cache accessor.
pub type Result<T> = std::result::Result<T, CacheError>;
