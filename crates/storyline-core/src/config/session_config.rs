//! Play-session configuration.

use serde::{Deserialize, Serialize};

use crate::constants;

/// Configuration for the session registry.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SessionConfig {
    /// Maximum concurrently tracked sessions. Default: 64.
    pub max_sessions: Option<usize>,
    /// Node every new session starts its first traversal window at.
    pub spawn_node: Option<String>,
}

impl SessionConfig {
    pub fn effective_max_sessions(&self) -> usize {
        self.max_sessions.unwrap_or(constants::DEFAULT_MAX_SESSIONS)
    }
}
