//! CRUD and search over stored maintenance logs.

use crate::error::ApiError;
use crate::AppState;
use airlog_core::normalizer::normalize_object;
use airlog_core::types::{LogId, LogSummary, MaintenanceLog};
use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub message: &'static str,
}

/// `GET /logs/` — newest first, bounded by `store.list_limit`.
pub async fn list_logs(State(state): State<AppState>) -> Json<Vec<LogSummary>> {
    let logs = state.store.list_recent(state.config.store.list_limit).await;
    Json(logs.iter().map(LogSummary::from).collect())
}

pub async fn get_log(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MaintenanceLog>, ApiError> {
    let id: LogId = id.parse()?;
    state.store.get(id).await.map(Json).ok_or(ApiError::NotFound)
}

/// `PUT /logs/{id}` — the body is a record in either reply shape; it is
/// normalized like a model reply and replaces the stored record wholesale.
pub async fn update_log(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Result<Json<MaintenanceLog>, ApiError> {
    let id: LogId = id.parse()?;
    let Value::Object(raw) = body else {
        return Err(ApiError::BadRequest("Record must be a JSON object".to_string()));
    };

    let record = normalize_object(&raw);
    let updated = state
        .store
        .replace_record(id, record)
        .await
        .ok_or(ApiError::NotFound)?;

    info!(log_id = %id, entries = updated.structured_data.entries.len(), "maintenance log updated");
    Ok(Json(updated))
}

pub async fn delete_log(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let id: LogId = id.parse()?;
    if !state.store.delete(id).await {
        return Err(ApiError::NotFound);
    }

    info!(log_id = %id, "maintenance log deleted");
    Ok(Json(DeleteResponse {
        message: "Maintenance log deleted successfully",
    }))
}

/// `GET /logs/search/{registration}` — case-insensitive substring match.
pub async fn search_logs(
    State(state): State<AppState>,
    Path(registration): Path<String>,
) -> Json<Vec<MaintenanceLog>> {
    let logs = state.store.search_registration(&registration).await;
    debug!(term = %registration, results = logs.len(), "registration search");
    Json(logs)
}
