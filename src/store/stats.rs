//! Store Statistics Module
//!
//! Counts the commands served by the in-process backend.

use serde::Serialize;

// == Store Stats ==
/// Command counters for the in-process backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StoreStats {
    /// Number of GET commands that found a value
    pub hits: u64,
    /// Number of GET commands that found nothing (absent or expired)
    pub misses: u64,
    /// Number of SET commands
    pub sets: u64,
    /// Number of EXPIRE commands that applied a TTL to an existing key
    pub expirations: u64,
    /// Current number of live entries
    pub total_entries: usize,
}

impl StoreStats {
    // == Constructor ==
    /// Creates a new StoreStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of commands served.
    pub fn commands(&self) -> u64 {
        self.hits + self.misses + self.sets + self.expirations
    }

    // == Record Hit ==
    /// Increments the hit counter.
    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    // == Record Miss ==
    /// Increments the miss counter.
    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    // == Record Set ==
    /// Increments the SET counter.
    pub fn record_set(&mut self) {
        self.sets += 1;
    }

    // == Record Expiration ==
    /// Increments the expiration counter.
    pub fn record_expiration(&mut self) {
        self.expirations += 1;
    }

    // == Update Entry Count ==
    /// Updates the total entries count.
    pub fn set_total_entries(&mut self, count: usize) {
        self.total_entries = count;
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_new() {
        let stats = StoreStats::new();
        assert_eq!(stats, StoreStats::default());
        assert_eq!(stats.commands(), 0);
    }

    #[test]
    fn test_set_total_entries() {
        let mut stats = StoreStats::new();
        stats.set_total_entries(42);
        assert_eq!(stats.total_entries, 42);
        assert_eq!(stats.commands(), 0);
    }

    #[test]
    fn test_commands_counts_every_kind() {
        let mut stats = StoreStats::new();
        stats.record_hit();
        stats.record_miss();
        stats.record_set();
        stats.record_expiration();
        assert_eq!(stats.commands(), 4);
    }
}
