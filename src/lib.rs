//! Valkey Cache - A cache-aside accessor for Valkey
//!
//! Looks values up by key and, on a miss, computes them with a caller-supplied
//! producer, stores them and returns them. The connection is established
//! lazily, at most once, and re-armed after a failed attempt.

pub mod cache;
pub mod config;
pub mod error;
pub mod store;

pub use cache::{CacheAside, Codec, JsonCodec, MessagePackCodec};
pub use config::CacheConfig;
pub use error::{CacheError, Result};
