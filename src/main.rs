use std::net::SocketAddr;
use std::sync::Arc;

use mimalloc::MiMalloc;
use threatdash::config::AppConfig;
use threatdash::services::loader::DatasetCache;
use threatdash::{routes, AppState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "threatdash=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    let config = AppConfig::from_env();

    // The composition root owns the dataset lifecycle: one load, cached for
    // the process lifetime. A failed load serves an empty catalogue.
    let cache = Arc::new(DatasetCache::new(&config.dataset_path));
    let store = cache.get_or_load().await;
    let state = AppState::new(store, config.clone());

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!(host = %addr, "Starting threat catalogue API server");

    let app = routes::router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
