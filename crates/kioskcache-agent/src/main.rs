//! Kioskcache agent - primes the offline bucket for a kiosk deployment.
//!
//! Runs the install and activate lifecycle against the on-disk cache:
//! fetches the compiled-in asset manifest from the configured origin,
//! commits it to the version-tagged bucket, and prunes buckets left by
//! older versions. Takes no arguments; the configuration is compiled
//! into kioskcache-core.

use std::io;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use kioskcache_core::agent::CacheAgent;
use kioskcache_core::cache::DiskStore;
use kioskcache_core::config::AgentConfig;
use kioskcache_core::host::{AgentRuntime, RecordedControl};
use kioskcache_core::net::HttpClient;

/// Directory name under the platform cache dir
const APP_NAME: &str = "kioskcache";

/// Initialize the tracing subscriber for logging
fn init_tracing() {
    // Use RUST_LOG to control log level (e.g. RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    info!("kioskcache agent starting");

    let config = AgentConfig::default();
    let bucket = config.cache_name.clone();

    let cache_root = dirs::cache_dir()
        .context("could not determine cache directory")?
        .join(APP_NAME);
    let store = DiskStore::new(cache_root).context("failed to open cache root")?;
    let network = HttpClient::new(config.origin.as_str()).context("failed to build http client")?;
    let control = Arc::new(RecordedControl::new());

    let agent = Arc::new(CacheAgent::new(
        config,
        Arc::new(store),
        Arc::new(network),
        control,
    ));

    let (runtime, handle) = AgentRuntime::new(agent);
    let loop_task = tokio::spawn(runtime.run());

    handle
        .install()
        .await
        .context("install failed, previous bucket left in place")?;
    handle.activate().await.context("activation failed")?;

    drop(handle);
    loop_task.await.context("agent runtime panicked")?;

    info!(%bucket, "offline bucket ready");
    Ok(())
}
