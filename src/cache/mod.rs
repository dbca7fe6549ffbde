//! Cache Module
//!
//! Cache-aside lookups over a lazily connected backing store.

mod aside;
mod codec;
mod connector;
mod raw;


// Re-export public types
pub use aside::CacheAside;
pub use codec::{Codec, JsonCodec, MessagePackCodec};
pub use connector::Connector;
pub use raw::RawCache;
