//! Waypost Server - read-only hotel directory API.
//!
//! Serves customizable field projections of hotel records assembled from
//! the registry index and pointer-addressed remote documents, with
//! resilient pagination handled by the waypost-engine crate.

pub mod config;
pub mod error;
pub mod handlers;
pub mod index;
pub mod routes;

use crate::config::Config;
use crate::index::HotelIndex;
use axum::Router;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub index: Arc<dyn HotelIndex>,
    pub config: Arc<Config>,
}

/// Build the application router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(routes::create_routes())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
