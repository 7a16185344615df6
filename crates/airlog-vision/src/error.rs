//! Error types for the vision client.

use thiserror::Error;

/// Result type for vision model operations.
pub type Result<T> = std::result::Result<T, VisionError>;

/// Vision model errors.
#[derive(Debug, Error)]
pub enum VisionError {
    /// Configuration error (missing API key, unreadable prompt file)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Network error (connection failed, timeout)
    #[error("Network error: {0}")]
    Network(String),

    /// API error (non-2xx response, rate limit, invalid request)
    #[error("API error: {0}")]
    Api(String),

    /// Parse error (response body is not a chat completion)
    #[error("Parse error: {0}")]
    Parse(String),

    /// The model answered with no content at all
    #[error("model returned an empty reply")]
    EmptyReply,
}
