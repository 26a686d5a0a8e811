//! HTTP server setup and configuration.
//!
//! This module provides the router and application state used by both
//! the production server and integration tests.

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::api;
use crate::models::AppConfig;
use crate::services::{Pages, PatternService, PatternStore};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<PatternStore>,
    pub service: Arc<PatternService>,
    pub pages: Arc<Pages>,
}

/// Create application state from a configuration.
pub fn create_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let store = Arc::new(
        PatternStore::new(&config.storage_dir)
            .map_err(|e| anyhow::anyhow!("Failed to open storage: {e}"))?,
    );
    let service = Arc::new(PatternService::new(config));
    let pages = Arc::new(Pages::new()?);

    Ok(AppState {
        store,
        service,
        pages,
    })
}

/// Build the router with all endpoints and middleware.
///
/// This is the core router used by both production and tests.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(api::handle_welcome))
        .route("/generate", post(api::handle_generate))
        .route("/show/:id", get(api::handle_show))
        .route("/storage/:file", get(api::handle_storage))
        // Health check
        .route("/health", get(|| async { "OK" }))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
