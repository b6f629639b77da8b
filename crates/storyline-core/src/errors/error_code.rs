//! StorylineErrorCode trait for structured error reporting.

/// Every error enum implements this to provide a stable code string that
/// display collaborators can match on without parsing messages.
pub trait StorylineErrorCode {
    /// Returns the error code string (e.g., "GRAPH_LOAD_ERROR").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted error string: `[ERROR_CODE] message`.
    fn tagged_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const GRAPH_LOAD_ERROR: &str = "GRAPH_LOAD_ERROR";
pub const CURATOR_LOAD_ERROR: &str = "CURATOR_LOAD_ERROR";
pub const CONTRACT_VIOLATION: &str = "CONTRACT_VIOLATION";
pub const TELEMETRY_ERROR: &str = "TELEMETRY_ERROR";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const SESSION_ERROR: &str = "SESSION_ERROR";
