use anyhow::Result;
use onaircache::CacheStore;
use onairconfig::Settings;
use onairserver::{api::api_router, AppState};
use reqwest::Client;
use std::{net::SocketAddr, sync::Arc};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = Arc::new(Settings::load()?);
    let cache = CacheStore::new();
    let client = Client::new();

    info!(
        stream_type = settings.stream.stream_type.as_str(),
        stream_url = %settings.stream.stream_url,
        "Starting OnAir now-playing service"
    );

    let state = AppState::new(settings.clone(), cache, client);
    let router = api_router(state.clone());

    let addr = SocketAddr::from(([0, 0, 0, 0], settings.server.http_port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("OnAir API listening at http://{}", addr);

    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    state.cache.clear().await;
    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for Ctrl+C");
        return;
    }
    info!("Ctrl+C received, shutting down");
}
