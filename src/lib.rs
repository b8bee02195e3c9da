pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod services;
pub mod utils;

pub use error::types::*;

use axum::{routing::get, Router};
use std::{future::Future, io, sync::Arc};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info};

use crate::config::Settings;
use crate::services::{RatingEngine, RatingPolicy};

/// Shared, read-only state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<RatingEngine>,
    pub settings: Arc<Settings>,
}

impl AppState {
    pub fn new(settings: Settings) -> Self {
        let engine = RatingEngine::with_policy(RatingPolicy::from(&settings.rating));
        Self {
            engine: Arc::new(engine),
            settings: Arc::new(settings),
        }
    }
}

pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/metrics", get(handlers::metrics_handler))
        .nest("/rating", handlers::create_rating_routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Resolves on Ctrl-C. If the handler cannot be installed the server keeps
/// running instead of stopping right after startup.
pub async fn shutdown_signal() {
    wait_for_shutdown(tokio::signal::ctrl_c()).await
}

pub async fn wait_for_shutdown<F>(signal: F)
where
    F: Future<Output = io::Result<()>>,
{
    match signal.await {
        Ok(()) => info!("Received shutdown signal"),
        Err(e) => {
            error!("Failed to listen for shutdown signal: {}", e);
            std::future::pending::<()>().await;
        }
    }
}
