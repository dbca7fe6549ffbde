//! Connector Module
//!
//! Lazily establishes the backing store handle and memoizes it for the
//! lifetime of the accessor.

use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::error::{CacheError, Result};
use crate::store::Connect;

enum Slot<H> {
    Empty,
    Ready(H),
    /// Outcome of a failed attempt, kept only for callers that were already
    /// waiting while that attempt ran.
    Failed { attempt: u64, error: CacheError },
}

// == Connector ==
/// Hands out one shared store handle, connecting at most once.
///
/// Concurrent first callers queue on the slot lock, so a single connect
/// attempt runs and all of them observe its outcome. A failed attempt is not
/// memoized: the first caller to arrive after it re-arms the slot and tries
/// again.
pub struct Connector<C: Connect> {
    connect: C,
    slot: Mutex<Slot<C::Client>>,
    /// Number of completed connect attempts; only written under the slot lock
    attempts: AtomicU64,
}

impl<C: Connect> Connector<C> {
    // == Constructor ==
    /// Creates a connector; nothing is connected until [`Connector::client`].
    pub fn new(connect: C) -> Self {
        Self {
            connect,
            slot: Mutex::new(Slot::Empty),
            attempts: AtomicU64::new(0),
        }
    }

    // == Client ==
    /// Returns the shared handle, connecting first if needed.
    ///
    /// Crate-private: the handle never leaves the raw cache layer.
    pub(crate) async fn client(&self) -> Result<C::Client> {
        let seen = self.attempts.load(Ordering::Acquire);
        let mut slot = self.slot.lock().await;

        match &*slot {
            Slot::Ready(client) => return Ok(client.clone()),
            Slot::Failed { attempt, error } if *attempt > seen => {
                debug!(attempt, "sharing outcome of concurrent connect attempt");
                return Err(error.clone());
            }
            Slot::Failed { .. } => debug!("re-arming connector after failed attempt"),
            Slot::Empty => {}
        }

        let attempt = self.attempts.load(Ordering::Acquire) + 1;
        let outcome = self.connect.connect().await;
        self.attempts.store(attempt, Ordering::Release);

        match outcome {
            Ok(client) => {
                info!(attempt, "connected to backing store");
                *slot = Slot::Ready(client.clone());
                Ok(client)
            }
            Err(error) => {
                warn!(attempt, %error, "error while connecting to backing store");
                *slot = Slot::Failed {
                    attempt,
                    error: error.clone(),
                };
                Err(error)
            }
        }
    }

    // == Reset ==
    /// Drops the memoized handle so the next call connects again.
    pub async fn reset(&self) {
        *self.slot.lock().await = Slot::Empty;
    }

    /// Number of connect attempts made so far.
    pub fn attempts(&self) -> u64 {
        self.attempts.load(Ordering::Acquire)
    }

    /// Returns true if a handle is memoized.
    pub async fn is_connected(&self) -> bool {
        matches!(*self.slot.lock().await, Slot::Ready(_))
    }
}
