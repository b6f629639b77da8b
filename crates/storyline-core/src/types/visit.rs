//! The (object, verb) pair recorded for every telemetry visit.

use serde::{Deserialize, Serialize};

/// One visitation: the node a player acted on and how.
///
/// Two visits are the same only when both fields match, so jumping to a
/// door and attempting the door count as two unique visits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Visit {
    pub object: String,
    pub verb: String,
}

impl Visit {
    pub fn new(object: impl Into<String>, verb: impl Into<String>) -> Self {
        Self {
            object: object.into(),
            verb: verb.into(),
        }
    }
}
