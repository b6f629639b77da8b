//! Curator-label load errors.

use super::error_code::{self, StorylineErrorCode};

/// Errors that can occur while loading curator-label files.
#[derive(Debug, thiserror::Error)]
pub enum CuratorLoadError {
    #[error("Failed to read {path}: {message}")]
    Io { path: String, message: String },

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Curator label list root must be an array")]
    NotArray,

    #[error("Malformed curator label {index}: {reason}")]
    MalformedLabel { index: usize, reason: String },

    #[error("Duplicate curator label id: {0}")]
    DuplicateLabel(String),
}

impl StorylineErrorCode for CuratorLoadError {
    fn error_code(&self) -> &'static str {
        error_code::CURATOR_LOAD_ERROR
    }
}
