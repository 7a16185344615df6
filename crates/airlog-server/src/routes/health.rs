use axum::Json;
use serde::Serialize;

const SERVICE: &str = "Aircraft Maintenance Log Analyzer API";

#[derive(Serialize)]
pub struct RootResponse {
    message: &'static str,
    status: &'static str,
}

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    service: &'static str,
    version: &'static str,
}

pub async fn root_handler() -> Json<RootResponse> {
    Json(RootResponse {
        message: SERVICE,
        status: "healthy",
    })
}

/// Liveness only; the store is in-process and always reachable.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: SERVICE,
        version: env!("CARGO_PKG_VERSION"),
    })
}
