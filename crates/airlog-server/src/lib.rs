//! airlog-server — HTTP API over the maintenance log store.
//!
//! ```text
//! GET    /                                  liveness
//! GET    /health                            liveness + version
//! POST   /api/v1/upload-log/                image → model → normalizer → store
//! GET    /api/v1/logs/                      history listing
//! GET    /api/v1/logs/{id}                  one document
//! PUT    /api/v1/logs/{id}                  replace its record
//! DELETE /api/v1/logs/{id}
//! POST   /api/v1/logs/{id}/export           json | text attachment
//! GET    /api/v1/logs/search/{registration}
//! ```

pub mod error;
pub mod routes;

pub use error::ApiError;

use airlog_core::config::Config;
use airlog_core::LogStore;
use airlog_vision::VisionModel;
use axum::extract::DefaultBodyLimit;
use axum::http::HeaderValue;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<LogStore>,
    pub model: Arc<dyn VisionModel>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(store: Arc<LogStore>, model: Arc<dyn VisionModel>, config: Config) -> Self {
        Self {
            store,
            model,
            config: Arc::new(config),
        }
    }
}

/// Build the application router.
pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/upload-log/", post(routes::upload_log))
        .route("/logs/", get(routes::list_logs))
        .route(
            "/logs/{id}",
            get(routes::get_log).put(routes::update_log).delete(routes::delete_log),
        )
        .route("/logs/{id}/export", post(routes::export_log))
        .route("/logs/search/{registration}", get(routes::search_logs));

    Router::new()
        .route("/", get(routes::root_handler))
        .route("/health", get(routes::health_handler))
        .nest("/api/v1", api)
        .layer(DefaultBodyLimit::max(state.config.server.upload_limit_bytes()))
        .layer(cors_layer(&state.config.server.allowed_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(%origin, "ignoring malformed CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(allowed)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Bind the configured address and serve until the process is stopped.
pub async fn serve(state: AppState) -> anyhow::Result<()> {
    let bind = state.config.server.bind.clone();
    let listener = tokio::net::TcpListener::bind(&bind).await?;
    info!(addr = %listener.local_addr()?, "listening");
    axum::serve(listener, build_router(state)).await?;
    Ok(())
}
