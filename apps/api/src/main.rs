mod config;
mod errors;
mod models;
mod notifier;
mod routes;
mod seed;
mod state;
mod store;

use anyhow::Result;
use chrono::{Duration, Utc};
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use std::sync::Arc;

use crate::config::Config;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::{JobStore, JsonFileBackend};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting job board API v{}", env!("CARGO_PKG_VERSION"));

    // Open the store; a missing data file starts an empty board
    let backend = Arc::new(JsonFileBackend::new(&config.data_file));
    let store = JobStore::open(backend)
        .await?
        .with_job_ttl(Duration::days(config.job_ttl_days));
    let store = Arc::new(store);
    info!("Data file: {}", config.data_file.display());

    if config.seed_demo_data {
        seed::seed_demo_data(&store).await?;
    }

    store.expire_overdue_jobs(Utc::now()).await?;

    notifier::spawn_notifier(Arc::clone(&store));

    let state = AppState { store };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
