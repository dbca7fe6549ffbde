//! Cache-Aside Module
//!
//! The get-or-compute-and-store protocol over a [`RawCache`] and a [`Codec`].

use std::future::Future;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::cache::{Codec, JsonCodec, RawCache};
use crate::config::CacheConfig;
use crate::error::{CacheError, Result};
use crate::store::{Connect, ValkeyConnector};

// == Cache Aside ==
/// Typed cache-aside accessor.
///
/// Looks a key up in the store and, on a miss, awaits a caller-supplied
/// producer, stores its value and returns it. Values are encoded with `K`,
/// chosen per accessor so different encodings can coexist.
///
/// Producers return their own error type `E`. Producer errors come back
/// untouched; cache failures are converted with `E: From<CacheError>`.
///
/// Concurrent misses on the same key both run their producer and both
/// store; the last write wins.
pub struct CacheAside<C: Connect, K: Codec = JsonCodec> {
    config: CacheConfig,
    raw: RawCache<C>,
    codec: K,
}

impl CacheAside<ValkeyConnector> {
    /// Creates a Valkey-backed accessor for the host and port in `config`.
    ///
    /// No connection is made until the first cache operation.
    pub fn from_config(config: CacheConfig) -> Self {
        let connect = ValkeyConnector::from_config(&config);
        Self::new(config, connect)
    }
}

impl<C: Connect> CacheAside<C> {
    /// Creates a JSON-encoding accessor over any backend.
    pub fn new(config: CacheConfig, connect: C) -> Self {
        Self {
            config,
            raw: RawCache::new(connect),
            codec: JsonCodec,
        }
    }
}

impl<C: Connect, K: Codec> CacheAside<C, K> {
    /// Swaps the value encoding.
    pub fn with_codec<K2: Codec>(self, codec: K2) -> CacheAside<C, K2> {
        CacheAside {
            config: self.config,
            raw: self.raw,
            codec,
        }
    }

    /// Returns the configuration this accessor was built with.
    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Returns the byte-level cache underneath.
    pub fn raw(&self) -> &RawCache<C> {
        &self.raw
    }

    /// Returns the value codec.
    pub fn codec(&self) -> &K {
        &self.codec
    }

    /// Number of connect attempts made against the backing store so far.
    pub fn connect_attempts(&self) -> u64 {
        self.raw.connect_attempts()
    }

    /// Returns true if a store connection is currently established.
    pub async fn is_connected(&self) -> bool {
        self.raw.is_connected().await
    }

    /// Returns false when lookups bypass the store entirely.
    pub fn use_cache(&self) -> bool {
        self.config.use_cache
    }

    // == Get Or Compute ==
    /// Returns the cached value for `key`, computing and storing it on a miss.
    ///
    /// - With caching disabled, `producer` is awaited and its result returned
    ///   as is; the store is never touched.
    /// - On a hit, the stored bytes are decoded and `producer` is not called.
    ///   Undecodable bytes are an error; there is no fallback to `producer`.
    /// - On a miss, behaves as [`CacheAside::set_and_compute`].
    /// - Any other lookup failure is returned without calling `producer`.
    pub async fn get_or_compute<T, E, F, Fut>(
        &self,
        key: &str,
        producer: F,
    ) -> std::result::Result<T, E>
    where
        T: Serialize + DeserializeOwned,
        E: From<CacheError>,
        F: FnOnce() -> Fut,
        Fut: Future<Output = std::result::Result<T, E>>,
    {
        if !self.use_cache() {
            debug!(key, "cache is not enabled, calling producer");
            return producer().await;
        }

        match self.raw.get(key).await {
            Ok(bytes) => self.codec.deserialize(&bytes).map_err(|error| {
                warn!(
                    key,
                    codec = self.codec.name(),
                    %error,
                    "error while deserializing cached value"
                );
                E::from(error)
            }),
            Err(CacheError::Miss(_)) => {
                debug!(key, "value not found in cache, calling producer");
                self.set_and_compute(key, producer).await
            }
            Err(error) => {
                warn!(key, %error, "error while getting value from cache");
                Err(E::from(error))
            }
        }
    }

    // == Set And Compute ==
    /// Awaits `producer`, stores its value under `key` and returns it.
    ///
    /// The value is discarded if it cannot be encoded or stored; in both
    /// cases the error is returned and nothing corrupt is written.
    pub async fn set_and_compute<T, E, F, Fut>(
        &self,
        key: &str,
        producer: F,
    ) -> std::result::Result<T, E>
    where
        T: Serialize,
        E: From<CacheError>,
        F: FnOnce() -> Fut,
        Fut: Future<Output = std::result::Result<T, E>>,
    {
        let value = producer().await.map_err(|error| {
            debug!(key, "producer failed");
            error
        })?;

        let bytes = self.codec.serialize(&value).map_err(|error| {
            warn!(key, codec = self.codec.name(), %error, "error while serializing value");
            E::from(error)
        })?;

        self.raw.set(key, bytes).await.map_err(|error| {
            warn!(key, %error, "error while storing computed value");
            E::from(error)
        })?;

        Ok(value)
    }

    // == Invalidate ==
    /// Expires `key` so the next lookup is a miss.
    pub async fn invalidate(&self, key: &str) -> Result<()> {
        self.raw.expire(key).await
    }
}
