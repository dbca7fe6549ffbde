//! Stored Entry Module
//!
//! Defines the structure for entries held by the in-process backend.

use chrono::Utc;

// == Stored Entry ==
/// A single stored value with TTL metadata.
#[derive(Debug, Clone)]
pub struct StoredEntry {
    /// The stored bytes
    pub value: Vec<u8>,
    /// Expiration timestamp (Unix milliseconds), None = no expiration
    pub expires_at: Option<i64>,
}

impl StoredEntry {
    // == Constructor ==
    /// Creates a new entry without expiration.
    pub fn new(value: Vec<u8>) -> Self {
        Self {
            value,
            expires_at: None,
        }
    }

    // == Expire ==
    /// Sets the entry to expire `seconds` from now.
    ///
    /// Zero or negative seconds expire the entry immediately; huge values
    /// saturate instead of overflowing.
    pub fn expire_in(&mut self, seconds: i64) {
        let now = current_timestamp_ms();
        let ttl_ms = seconds.max(0).saturating_mul(1000);
        self.expires_at = Some(now.saturating_add(ttl_ms));
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// An entry is expired once the current time reaches its expiration time,
    /// so a zero TTL takes effect immediately.
    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(expires) => current_timestamp_ms() >= expires,
            None => false,
        }
    }

    // == Time To Live ==
    /// Returns remaining TTL in milliseconds, or None if no expiration is set.
    pub fn ttl_remaining_ms(&self) -> Option<i64> {
        self.expires_at
            .map(|expires| (expires - current_timestamp_ms()).max(0))
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
pub fn current_timestamp_ms() -> i64 {
    Utc::now().timestamp_millis()
}
