mod allocation;
mod analytics;
mod config;
mod errors;
mod models;
mod projects;
mod resources;
mod routes;
mod state;
mod store;

#[cfg(test)]
mod test_support;

use anyhow::Result;
use chrono::Utc;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::allocation::scoring::WeightedMatchScorer;
use crate::config::Config;
use crate::resources::generator::generate_dataset;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::{InMemoryStore, ResourceStore};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting RMS API v{}", env!("CARGO_PKG_VERSION"));

    // Seed the in-memory dataset
    let (resources, projects) = {
        let mut rng = rand::thread_rng();
        generate_dataset(config.seed_resource_count, Utc::now().date_naive(), &mut rng)
    };
    info!(
        "Seeded {} resources across {} projects",
        resources.len(),
        projects.len()
    );
    let store = Arc::new(InMemoryStore::new(resources, projects));

    match config.refresh_interval {
        Some(every) => {
            tokio::spawn(refresh_loop(store.clone(), every, config.seed_resource_count));
            info!("Dataset refresh every {}s", every.as_secs());
        }
        None => info!("Dataset refresh disabled"),
    }

    let state = AppState {
        store,
        match_scorer: Arc::new(WeightedMatchScorer::default()),
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(config.request_timeout))
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Regenerates the whole dataset on a fixed cadence. Edits and allocations
/// made since the previous tick are discarded.
async fn refresh_loop(store: Arc<dyn ResourceStore>, every: Duration, count: usize) {
    let mut ticker = tokio::time::interval(every);
    ticker.tick().await; // first tick fires immediately

    loop {
        ticker.tick().await;
        let (resources, projects) = {
            let mut rng = rand::thread_rng();
            generate_dataset(count, Utc::now().date_naive(), &mut rng)
        };
        info!("Refreshing dataset: {} resources", resources.len());
        store.replace_all(resources, projects).await;
    }
}
