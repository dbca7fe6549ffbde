//! Valkey Cache demo
//!
//! Runs a cache-aside lookup twice against the configured Valkey server: the
//! first call computes and stores the value, the second is served from the
//! store.

use std::sync::atomic::{AtomicUsize, Ordering};

use serde::{Deserialize, Serialize};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use valkey_cache::{CacheAside, CacheConfig};

#[derive(Debug, Clone, Serialize, Deserialize)]
struct User {
    id: u64,
    name: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "valkey_cache=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = CacheConfig::from_env();
    info!(
        "Configuration loaded: host={}, port={}, use_cache={}",
        config.host, config.port, config.use_cache
    );

    let cache = CacheAside::from_config(config);
    let producer_calls = AtomicUsize::new(0);
    let calls = &producer_calls;

    for round in 1..=2 {
        let user: User = cache
            .get_or_compute("user:42", || async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok::<_, anyhow::Error>(User {
                    id: 42,
                    name: "Ada".to_string(),
                })
            })
            .await?;
        info!(round, ?user, "lookup complete");
    }

    info!(
        "Producer ran {} time(s) for 2 lookups",
        producer_calls.load(Ordering::SeqCst)
    );
    Ok(())
}
