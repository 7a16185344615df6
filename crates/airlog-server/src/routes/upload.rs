//! `POST /upload-log/` — image in, normalized and stored record out.

use crate::error::ApiError;
use crate::AppState;
use airlog_core::assess::registration_is_plausible;
use airlog_core::types::{LogId, MaintenanceRecord, NewLog};
use airlog_core::normalize_reply;
use airlog_vision::ImageUpload;
use axum::extract::{Multipart, State};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::Path;
use tracing::{info, warn};

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub success: bool,
    pub message: String,
    pub log_id: LogId,
    pub structured_data: MaintenanceRecord,
}

pub async fn upload_log(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    let (image, original_name) = read_image(&mut multipart).await?;
    info!(
        filename = ?original_name,
        content_type = %image.content_type,
        bytes = image.bytes.len(),
        "analyzing maintenance log image"
    );

    let reply = state.model.analyze(&image).await?;
    let normalized = normalize_reply(&reply)?;

    if let Some(registration) = normalized.record.aircraft_registration.as_deref() {
        if !registration_is_plausible(registration) {
            warn!(%registration, "registration does not look like a valid mark");
        }
    }

    let image_filename = stored_filename(original_name.as_deref(), Utc::now());
    let log = state
        .store
        .insert(NewLog::anonymous(image_filename, normalized.record))
        .await;

    info!(
        log_id = %log.id,
        provenance = %normalized.provenance,
        entries = log.structured_data.entries.len(),
        "maintenance log stored"
    );

    Ok(Json(UploadResponse {
        success: true,
        message: "Maintenance log analyzed and saved successfully".to_string(),
        log_id: log.id,
        structured_data: log.structured_data,
    }))
}

/// The first `file` field, which must carry an `image/*` content type.
async fn read_image(multipart: &mut Multipart) -> Result<(ImageUpload, Option<String>), ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(e.body_text()))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let content_type = field.content_type().unwrap_or_default().to_string();
        if !content_type.starts_with("image/") {
            return Err(ApiError::BadRequest("File must be an image".to_string()));
        }
        let original_name = field.file_name().map(str::to_string);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest(e.body_text()))?;

        return Ok((ImageUpload::new(bytes.to_vec(), content_type), original_name));
    }

    Err(ApiError::BadRequest("Missing image upload field 'file'".to_string()))
}

/// `maintenance_log_<YYYYmmdd_HHMMSS><ext>`, keeping the uploaded file's
/// extension and falling back to `.jpg`.
pub fn stored_filename(original: Option<&str>, at: DateTime<Utc>) -> String {
    let extension = original
        .and_then(|name| Path::new(name).extension())
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{ext}"))
        .unwrap_or_else(|| ".jpg".to_string());
    format!("maintenance_log_{}{}", at.format("%Y%m%d_%H%M%S"), extension)
}
