mod api_doc;
mod asset_id;
mod config;
mod error;
mod handlers;
mod models;
mod routes;
mod state;
mod store;

use anyhow::Context;
use config::{Config, StoreBackend};
use state::AppState;
use std::sync::Arc;
use store::{AssetStore, MemoryAssetStore, MongoAssetStore};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")),
        )
        .init();

    tracing::info!("rust-mongo-assets starting");

    let config = Config::from_env()?;
    config.log_startup();

    let store: Arc<dyn AssetStore> = match config.store_backend {
        StoreBackend::MongoDb => Arc::new(MongoAssetStore::from_config(&config)),
        StoreBackend::Memory => Arc::new(MemoryAssetStore::new()),
    };

    store.connect().await.context("Failed to connect asset store")?;
    check_connectivity(store.as_ref(), config.require_db_on_startup).await?;

    let app = routes::router(AppState::new(store.clone()));

    let addr = format!("{}:{}", config.service_host, config.service_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("Listening on {}", addr);

    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error");

    store.close().await;
    tracing::info!("rust-mongo-assets stopped");
    served
}

/// Ping the store once at startup; a failure is fatal only when required
async fn check_connectivity(store: &dyn AssetStore, required: bool) -> anyhow::Result<()> {
    match store.ping().await {
        Ok(()) => {
            tracing::info!("Successfully connected to asset store");
            Ok(())
        }
        Err(e) if required => {
            store.close().await;
            Err(e).context("Asset store is unreachable at startup")
        }
        Err(e) => {
            tracing::warn!("Asset store is unreachable, continuing startup: {}", e);
            Ok(())
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for ctrl-c: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => tracing::error!("Failed to listen for SIGTERM: {}", e),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
