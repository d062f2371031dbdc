//! Cache Adapter demo
//!
//! Wires a cache-aside policy over the in-memory store using the configured
//! representation, runs the same lookup twice and reports store statistics.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cache_adapter::{
    from_config, spawn_cleanup_task, BackingStore, CacheError, CachePolicy, Config, Context,
    MemoryStore,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Forecast {
    city: String,
    celsius: i32,
}

/// Stand-in for an expensive lookup.
async fn fetch_forecast(context: Context) -> Result<Forecast, CacheError> {
    info!("Fetching forecast for {}", context.operation_key());
    tokio::time::sleep(Duration::from_millis(250)).await;
    Ok(Forecast {
        city: context.operation_key().to_string(),
        celsius: 21,
    })
}

/// Main entry point for the cache adapter demo.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Create the in-memory store and start its expiration sweep
/// 4. Build a provider for the configured representation
/// 5. Execute the same lookup twice through a cache-aside policy
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cache_adapter=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Cache Adapter demo");

    let config = Config::from_env();
    info!(
        "Configuration loaded: representation={}, default_ttl={}s, sliding={}, cleanup_interval={}s",
        config.representation,
        config.default_ttl,
        config.sliding_expiration,
        config.cleanup_interval
    );

    let store = Arc::new(MemoryStore::new());
    let shutdown = CancellationToken::new();
    let cleanup_handle =
        spawn_cleanup_task(store.clone(), config.cleanup_interval, shutdown.clone());

    let backing: Arc<dyn BackingStore> = store.clone();
    let provider = from_config::<Forecast>(&config, Some(backing))?;
    let policy = CachePolicy::new(provider, config.ttl_strategy());

    let cancel = CancellationToken::new();
    let context = Context::new("lisbon");
    for attempt in 1..=2 {
        let started = std::time::Instant::now();
        let forecast = policy
            .execute_async(&context, &cancel, false, fetch_forecast)
            .await?;
        info!(
            "Attempt {}: {} is {}°C ({:?})",
            attempt,
            forecast.city,
            forecast.celsius,
            started.elapsed()
        );
    }

    let stats = store.stats();
    info!(
        "Store stats: {} (hit rate {:.0}%)",
        serde_json::to_string(&stats)?,
        stats.hit_rate() * 100.0
    );

    shutdown.cancel();
    cleanup_handle.await?;
    info!("Cache Adapter demo complete");
    Ok(())
}
