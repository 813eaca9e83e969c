mod accounts;
mod auth;
mod config;
mod db;
mod errors;
mod jobs;
mod models;
mod routes;
mod saved_jobs;
mod state;

#[cfg(test)]
mod tests;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::accounts::PgAccountStore;
use crate::config::Config;
use crate::db::create_pool;
use crate::jobs::{JobCache, JobsClient};
use crate::routes::build_router;
use crate::saved_jobs::PgSavedJobStore;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting Jobfolio API v{} ({:?})",
        env!("CARGO_PKG_VERSION"),
        config.app_env
    );

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url).await?;

    // Initialize Redis
    let redis = redis::Client::open(config.redis_url.clone())?;
    let cache = JobCache::new(redis, config.jobs_cache_ttl);
    info!(
        "Redis job cache initialized (ttl {}s)",
        config.jobs_cache_ttl.as_secs()
    );

    // Initialize listings client
    let jobs = JobsClient::new(&config)?;
    info!(
        "Listings client initialized ({}/{})",
        config.jobs_api_base, config.jobs_country
    );

    let state = AppState {
        config: config.clone(),
        jobs: Arc::new(jobs),
        cache,
        accounts: Arc::new(PgAccountStore::new(db.clone())),
        saved_jobs: Arc::new(PgSavedJobStore::new(db)),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
