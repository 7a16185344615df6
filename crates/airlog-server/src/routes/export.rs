//! `POST /logs/{id}/export` — download a stored log as a file.

use crate::error::ApiError;
use crate::AppState;
use airlog_core::export::{export, ExportFormat};
use airlog_core::types::LogId;
use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use serde::Deserialize;
use tracing::{debug, warn};

#[derive(Debug, Deserialize)]
pub struct ExportRequest {
    pub format: String,
    /// Echoed by the frontend; the path id is authoritative.
    #[serde(default)]
    pub log_id: Option<String>,
}

pub async fn export_log(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<ExportRequest>,
) -> Result<Response, ApiError> {
    let id: LogId = id.parse()?;
    if request.log_id.as_deref().is_some_and(|body_id| body_id != id.to_string()) {
        warn!(log_id = %id, body_log_id = ?request.log_id, "export body names a different log");
    }

    let format: ExportFormat = request.format.parse()?;
    let log = state.store.get(id).await.ok_or(ApiError::NotFound)?;
    let rendered = export(&log, format, Utc::now())?;

    debug!(log_id = %id, format = ?format, bytes = rendered.body.len(), "log exported");
    Ok((
        [
            (header::CONTENT_TYPE, rendered.content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename={}", rendered.filename),
            ),
        ],
        rendered.body,
    )
        .into_response())
}
