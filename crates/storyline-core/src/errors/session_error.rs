//! Play-session errors.
//! Aggregates subsystem errors via `From` conversions.

use super::error_code::{self, StorylineErrorCode};
use super::{ContractError, TelemetryError};

/// Errors that can occur while driving a play session.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Contract violation: {0}")]
    Contract(#[from] ContractError),

    #[error("Telemetry error: {0}")]
    Telemetry(#[from] TelemetryError),

    #[error("Unknown session: {0}")]
    UnknownSession(String),

    #[error("Session already exists: {0}")]
    DuplicateSession(String),

    #[error("Session limit reached ({max})")]
    LimitReached { max: usize },
}

impl StorylineErrorCode for SessionError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Contract(e) => e.error_code(),
            Self::Telemetry(e) => e.error_code(),
            Self::UnknownSession(_) | Self::DuplicateSession(_) | Self::LimitReached { .. } => {
                error_code::SESSION_ERROR
            }
        }
    }
}
