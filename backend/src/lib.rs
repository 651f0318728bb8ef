//! # Scouting Roster Backend
//!
//! Player roster storage and search for a scouting workflow.
//!
//! ## Architecture
//!
//! ```text
//! Presentation (forms, tables)
//!     ↓
//! IO Layer (REST handlers)
//!     ↓
//! Domain Layer (validation, query, player service)
//!     ↓
//! Storage Layer (SQLite table or JSON document)
//! ```
//!
//! The domain never knows which storage backend it runs on; the choice is made
//! once from [`RosterConfig`] in [`initialize_backend`].

pub mod config;
pub mod domain;
pub mod error;
pub mod io;
pub mod storage;

use std::sync::Arc;

use axum::{
    http::{HeaderValue, Method},
    routing::get,
    Router,
};
use tokio::sync::Mutex;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

pub use config::{RosterConfig, StorageKind};
pub use domain::PlayerService;
pub use error::{PersistenceError, RosterError, RosterResult};

/// Main application state shared by all handlers
#[derive(Clone)]
pub struct AppState {
    /// Requests reach the service one at a time
    pub player_service: Arc<Mutex<PlayerService>>,
}

/// Open the configured storage and build the services on top of it
pub async fn initialize_backend(config: &RosterConfig) -> anyhow::Result<AppState> {
    info!("Setting up {:?} storage", config.storage);
    let storage = storage::open_storage(config).await?;

    info!("Setting up domain model");
    let player_service = PlayerService::new(storage);

    Ok(AppState {
        player_service: Arc::new(Mutex::new(player_service)),
    })
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState) -> Router {
    // CORS setup to allow a local frontend to make requests
    let cors = CorsLayer::new()
        .allow_origin(HeaderValue::from_static("http://localhost:8080"))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/players", get(io::list_players).post(io::create_player))
        .route("/players/search", get(io::search_players))
        .route(
            "/players/:id",
            get(io::get_player).put(io::update_player).delete(io::delete_player),
        );

    Router::new()
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state)
}
