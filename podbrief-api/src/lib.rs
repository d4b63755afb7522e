//! podbrief-api library interface
//!
//! Exposes the router, shared state and pipelines so integration tests can
//! drive the service with scripted collaborators.

pub mod api;
pub mod db;
pub mod error;
pub mod models;
pub mod services;

pub use crate::error::{ApiError, ApiResult};

use axum::Router;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use services::{CompletionClient, ContentFetcher};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub completion: Arc<dyn CompletionClient>,
    pub fetcher: Arc<dyn ContentFetcher>,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
    /// Built web client to serve for non-API paths, if any
    pub static_dir: Option<PathBuf>,
}

impl AppState {
    pub fn new(
        db: SqlitePool,
        completion: Arc<dyn CompletionClient>,
        fetcher: Arc<dyn ContentFetcher>,
    ) -> Self {
        Self {
            db,
            completion,
            fetcher,
            startup_time: Utc::now(),
            static_dir: None,
        }
    }

    pub fn with_static_dir(mut self, static_dir: Option<PathBuf>) -> Self {
        self.static_dir = static_dir;
        self
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    let static_dir = state.static_dir.clone();

    let router = Router::new()
        .merge(api::health_routes())
        .merge(api::brief_routes())
        .merge(api::research_routes())
        .merge(api::content_routes())
        .with_state(state);

    let router = match static_dir {
        Some(dir) => {
            // Unknown paths fall through to index.html for client-side routing
            let index = dir.join("index.html");
            router.fallback_service(ServeDir::new(dir).not_found_service(ServeFile::new(index)))
        }
        None => router,
    };

    router
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
