//! Telemetry envelope errors.

use super::error_code::{self, StorylineErrorCode};

/// Errors that can occur while parsing a telemetry message.
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    #[error("Invalid telemetry JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid timestamp {value:?}: {message}")]
    InvalidTimestamp { value: String, message: String },
}

impl StorylineErrorCode for TelemetryError {
    fn error_code(&self) -> &'static str {
        error_code::TELEMETRY_ERROR
    }
}
