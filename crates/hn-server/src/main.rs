//! hn-feed server binary.

use std::sync::Arc;

use anyhow::Context;
use hn_client::HackerNewsClient;
use hn_server::{AppState, FeedEngine, Settings, create_router, metrics::init_metrics, run_server};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let settings = Settings::load().context("failed to load settings")?;
    let addr = settings.socket_addr()?;

    tracing::info!("Starting hn-feed server v{}", hn_server::version());
    tracing::info!("Upstream: {}", settings.hacker_news.base_url);
    tracing::info!(
        max_concurrency = settings.fetch.max_concurrency,
        search_window = settings.fetch.search_window,
        request_timeout_secs = settings.server.request_timeout_secs,
        "Engine settings"
    );

    let prometheus_handle = init_metrics().context("failed to install metrics recorder")?;

    let client = HackerNewsClient::new(settings.hacker_news_config()?)
        .context("failed to build Hacker News client")?;
    let engine = FeedEngine::new(Arc::new(client), settings.engine_config());

    let state = AppState::from_engine(&engine, settings.request_timeout());
    let app = create_router(state, prometheus_handle, &settings.cors.allowed_origins);

    run_server(addr, app).await?;

    tracing::info!("Server stopped");
    Ok(())
}
