//! Contract violations: ids that should exist under correct calling discipline.

use super::error_code::{self, StorylineErrorCode};

/// Raised when a caller passes a curator or objective id the tracker never
/// loaded. Ids are built internally from already-validated sources, so
/// hitting one of these means a caller bug, not bad user input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContractError {
    #[error("Unknown curator label: {curator_id}")]
    UnknownCurator { curator_id: String },

    #[error("Unknown objective {objective_id} in curator label {curator_id}")]
    UnknownObjective {
        curator_id: String,
        objective_id: String,
    },
}

impl StorylineErrorCode for ContractError {
    fn error_code(&self) -> &'static str {
        error_code::CONTRACT_VIOLATION
    }
}
