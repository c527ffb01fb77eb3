//! Meteoprog informers server entry point.
//!
//! Loads configuration, opens the store and serves the HTTP API.
//! Logs are JSON on stderr.

use anyhow::{Context, Result};
use informers_client::{InformerService, LoaderSettings};
use informers_core::{AppConfig, ConfigHooks, StoreDb};
use tracing_subscriber::EnvFilter;

mod error;
mod handler;
mod routes;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .json()
        .init();

    let config = AppConfig::load()?;
    let hooks = ConfigHooks::from_config(&config);

    let store = StoreDb::open(&config.db_path)
        .await
        .with_context(|| format!("opening store at {}", config.db_path.display()))?;

    let service = InformerService::from_config(&config, &hooks, store).await?;
    if service.is_debug() {
        tracing::warn!("debug mode: serving the fixture directory");
    }
    if let Err(e) = config.require_admin_token() {
        tracing::warn!("{e}; administrative endpoints are disabled");
    }

    let loader = LoaderSettings::resolve(&config, &hooks);
    let bind_addr = config.bind_addr.clone();
    let app = handler::router(handler::AppState::new(config, service, loader));

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("binding {bind_addr}"))?;
    tracing::info!("Starting informers server on {bind_addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await?;

    Ok(())
}
