//! ludex-gi library interface
//!
//! Exposes public APIs for integration testing

pub mod api;
pub mod db;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;

pub use crate::error::{ApiError, ApiResult};

use axum::Router;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::services::ServeDir;

use crate::services::benchmark_catalog::BenchmarkCatalog;
use crate::services::media_store::MediaStore;
use crate::services::registrar::GameRegistrar;
use crate::services::steam_client::SteamClient;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
    /// Storefront client
    pub steam: Arc<SteamClient>,
    /// Registration workflow over the database-backed benchmark catalog
    pub registrar: GameRegistrar<BenchmarkCatalog>,
    /// Media cache directory, served under /media
    pub media_dir: PathBuf,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
    /// Last error for diagnostic purposes
    pub last_error: Arc<RwLock<Option<String>>>,
}

impl AppState {
    pub fn new(db: SqlitePool, steam: Arc<SteamClient>, media_dir: PathBuf) -> Self {
        let catalog = BenchmarkCatalog::new(db.clone());
        let media = MediaStore::new(media_dir.clone());
        let registrar = GameRegistrar::new(db.clone(), steam.clone(), catalog, media);

        Self {
            db,
            steam,
            registrar,
            media_dir,
            startup_time: Utc::now(),
            last_error: Arc::new(RwLock::new(None)),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::health_routes())
        .merge(api::search_routes())
        .merge(api::app_routes())
        .merge(api::register_routes())
        .merge(api::benchmark_routes())
        .nest_service("/media", ServeDir::new(&state.media_dir))
        .with_state(state)
}
