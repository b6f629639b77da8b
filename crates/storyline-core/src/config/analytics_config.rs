//! Analytics configuration.

use serde::{Deserialize, Serialize};

use crate::constants;

/// Configuration for visitation tracking and lostness scoring.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AnalyticsConfig {
    /// Verb that marks a move to a location node. Default: "jumped to".
    pub locomotion_verb: Option<String>,
    /// Verb of an unlock attempt. Default: "attempted".
    pub unlock_verb: Option<String>,
    /// Result of a successful unlock. Default: "unlocked".
    pub unlock_result: Option<String>,
    /// Name fragment for logic nodes without a recorded kind. Default: "Logic".
    pub logic_marker: Option<String>,
    /// Lostness value mapped to 1.0 when normalizing. Default: sqrt(2).
    pub lostness_ceiling: Option<f64>,
}

impl AnalyticsConfig {
    pub fn effective_locomotion_verb(&self) -> &str {
        self.locomotion_verb
            .as_deref()
            .unwrap_or(constants::LOCOMOTION_VERB)
    }

    pub fn effective_unlock_verb(&self) -> &str {
        self.unlock_verb.as_deref().unwrap_or(constants::UNLOCK_VERB)
    }

    pub fn effective_unlock_result(&self) -> &str {
        self.unlock_result
            .as_deref()
            .unwrap_or(constants::UNLOCK_RESULT)
    }

    pub fn effective_logic_marker(&self) -> &str {
        self.logic_marker.as_deref().unwrap_or(constants::LOGIC_MARKER)
    }

    pub fn effective_lostness_ceiling(&self) -> f64 {
        self.lostness_ceiling.unwrap_or(constants::LOSTNESS_CEILING)
    }
}
