//! HTTP error mapping.
//!
//! Every failure leaves the API as `{"detail": "..."}` with a status code
//! chosen by kind. Parser and upstream internals stay in the logs.

use airlog_core::export::ExportError;
use airlog_core::types::InvalidLogId;
use airlog_core::NormalizeError;
use airlog_vision::VisionError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error(transparent)]
    InvalidId(#[from] InvalidLogId),

    #[error("Maintenance log not found")]
    NotFound,

    /// Logged by the normalizer with an excerpt of the reply.
    #[error("could not interpret the analysis result")]
    Unreadable(#[from] NormalizeError),

    #[error("vision model request failed")]
    Model(#[from] VisionError),

    #[error(transparent)]
    Export(#[from] ExportError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) | ApiError::InvalidId(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Unreadable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Model(_) => StatusCode::BAD_GATEWAY,
            ApiError::Export(ExportError::UnsupportedFormat(_)) => StatusCode::BAD_REQUEST,
            ApiError::Export(ExportError::Serialize(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Model(e) => warn!(error = %e, "vision model failed"),
            ApiError::Export(ExportError::Serialize(e)) => error!(error = %e, "export failed"),
            _ => {}
        }
        (self.status(), Json(json!({ "detail": self.to_string() }))).into_response()
    }
}
