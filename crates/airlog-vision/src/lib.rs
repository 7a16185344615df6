//! airlog-vision — sends a maintenance log image to a vision model.
//!
//! The model is a black box that turns an image into free-form text. Nothing
//! in this crate interprets that text; the reply is handed back verbatim for
//! [`airlog_core::normalize_reply`] to make sense of.
//!
//! # Example
//!
//! ```rust,ignore
//! use airlog_vision::{ImageUpload, OpenAiVision, VisionModel};
//!
//! let model = OpenAiVision::from_env(&config.model)?;
//! let reply = model.analyze(&ImageUpload::new(bytes, "image/jpeg")).await?;
//! ```

pub mod error;
pub mod openai;

pub use error::{Result, VisionError};
pub use openai::OpenAiVision;

use async_trait::async_trait;

/// An uploaded image, as received from the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub bytes: Vec<u8>,
    /// MIME type reported by the uploader, e.g. `image/png`.
    pub content_type: String,
}

impl ImageUpload {
    pub fn new(bytes: impl Into<Vec<u8>>, content_type: impl Into<String>) -> Self {
        Self {
            bytes: bytes.into(),
            content_type: content_type.into(),
        }
    }
}

/// Anything that can describe a maintenance log image as text.
#[async_trait]
pub trait VisionModel: Send + Sync {
    /// Return the model's raw reply for `image`.
    async fn analyze(&self, image: &ImageUpload) -> Result<String>;
}
