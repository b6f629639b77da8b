//! Graph store load errors.

use super::error_code::{self, StorylineErrorCode};

/// Errors that can occur while loading edge-list or node-list files.
///
/// Any of these aborts the whole load; the store never keeps a partial graph.
#[derive(Debug, thiserror::Error)]
pub enum GraphLoadError {
    #[error("Failed to read {path}: {message}")]
    Io { path: String, message: String },

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Edge list has no `edges` array")]
    MissingEdges,

    #[error("Node list root must be an array")]
    NodeListNotArray,

    #[error("Malformed edge entry {index}: {reason}")]
    MalformedEdge { index: usize, reason: String },

    #[error("Malformed node entry {index}: {reason}")]
    MalformedNode { index: usize, reason: String },
}

impl StorylineErrorCode for GraphLoadError {
    fn error_code(&self) -> &'static str {
        error_code::GRAPH_LOAD_ERROR
    }
}
