//! Server binary: wire config, store, cache, and router together.

use repairshop_auth::StaticDirectory;
use repairshop_store::{PostgresStore, Queries, QueryCache};
use repairshop_web::{app_router, AppState, ServerConfig};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::load()?;

    let store = PostgresStore::connect(&config.database_url).await?;
    store.migrate().await?;

    let queries = Queries::new(store, Arc::new(QueryCache::default()));
    let directory = StaticDirectory::from_list(&config.technicians);
    let state = AppState::new(queries, Arc::new(directory));

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "listening");
    axum::serve(listener, app_router(state)).await?;
    Ok(())
}
