//! Waypost Server entry point.

use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use waypost_server::config::Config;
use waypost_server::index::MemoryIndex;
use waypost_server::{app, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "waypost_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    tracing::info!("Starting Waypost Server on {}:{}", config.host, config.port);

    // Load the registry seed
    let seed = std::fs::read_to_string(&config.seed_path)?;
    let index = MemoryIndex::from_json(&seed)?;
    tracing::info!("Loaded {} hotels from {}", index.len(), config.seed_path);

    // Build application state
    let state = AppState {
        index: Arc::new(index),
        config: Arc::new(config.clone()),
    };

    let app = app(state);

    // Start server
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
