//! Configuration Module
//!
//! Handles loading the cache accessor configuration from environment variables.

use std::env;

/// Host used when none is configured.
pub const DEFAULT_HOST: &str = "localhost";

/// Port used when none is configured.
pub const DEFAULT_PORT: u16 = 6739;

/// Cache accessor configuration.
///
/// Immutable once handed to the accessor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    /// Backing store host
    pub host: String,
    /// Backing store port
    pub port: u16,
    /// When false, every lookup goes straight to the producer
    pub use_cache: bool,
}

impl CacheConfig {
    /// Creates a config, substituting defaults for an empty host or a zero port.
    pub fn new(host: impl Into<String>, port: u16, use_cache: bool) -> Self {
        let host = host.into();
        Self {
            host: if host.is_empty() {
                DEFAULT_HOST.to_string()
            } else {
                host
            },
            port: if port == 0 { DEFAULT_PORT } else { port },
            use_cache,
        }
    }

    /// Creates a new CacheConfig by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_HOST` - Backing store host (default: localhost)
    /// - `CACHE_PORT` - Backing store port (default: 6739)
    /// - `USE_CACHE` - Enable the cache: true/1/yes/on (default: false)
    pub fn from_env() -> Self {
        Self::new(
            env::var("CACHE_HOST").unwrap_or_default(),
            env::var("CACHE_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_PORT),
            env::var("USE_CACHE")
                .ok()
                .map(|v| parse_flag(&v))
                .unwrap_or(false),
        )
    }

    /// Connection URL for the backing store.
    pub fn url(&self) -> String {
        format!("redis://{}:{}/", self.host, self.port)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            use_cache: false,
        }
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "true" | "1" | "yes" | "on"
    )
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = CacheConfig::default();
        assert_eq!(config.host, "localhost");
        assert_eq!(config.port, 6739);
        assert!(!config.use_cache);
    }

    #[test]
    fn test_config_new_falls_back_to_defaults() {
        let config = CacheConfig::new("", 0, true);
        assert_eq!(config.host, DEFAULT_HOST);
        assert_eq!(config.port, DEFAULT_PORT);
        assert!(config.use_cache);
    }

    #[test]
    fn test_config_url() {
        let config = CacheConfig::new("valkey.internal", 6380, true);
        assert_eq!(config.url(), "redis://valkey.internal:6380/");
    }

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("true"));
        assert!(parse_flag(" YES "));
        assert!(parse_flag("1"));
        assert!(!parse_flag("false"));
        assert!(!parse_flag(""));
    }

    #[test]
    fn test_config_from_env_defaults() {
        env::remove_var("CACHE_HOST");
        env::remove_var("CACHE_PORT");
        env::remove_var("USE_CACHE");

        let config = CacheConfig::from_env();
        assert_eq!(config, CacheConfig::default());
    }
}
