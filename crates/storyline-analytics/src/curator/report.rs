//! Serializable analytics snapshot for display collaborators.

use serde::Serialize;

use super::tracker::CuratorTracker;
use super::types::{CuratorLabel, CuratorObjective};
use crate::lostness::normalized;

/// Whole-game view: one entry per task plus the game-wide aggregates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyticsReport {
    pub game_progress: f64,
    pub local_lostness: Option<f64>,
    pub local_lostness_normalized: f64,
    pub tasks: Vec<TaskReport>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskReport {
    pub id: String,
    pub min_steps: u32,
    pub progress: f64,
    pub total_nodes_visited: u32,
    pub unique_nodes_visited: usize,
    pub lostness: Option<f64>,
    pub lostness_normalized: f64,
    pub objectives: Vec<ObjectiveReport>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObjectiveReport {
    pub id: String,
    pub found: bool,
    pub min_steps: Option<u32>,
    pub total_nodes_visited: u32,
    pub unique_nodes_visited: u32,
    pub start_node: Option<String>,
    pub end_node: Option<String>,
    pub lostness: Option<f64>,
    pub lostness_normalized: f64,
}

impl AnalyticsReport {
    /// Build a report from the tracker's cached values. Nothing is
    /// recomputed, so uncached lostness shows up as `None`.
    pub fn from_tracker(tracker: &CuratorTracker, ceiling: f64) -> Self {
        Self {
            game_progress: tracker.game_progress(),
            local_lostness: tracker.local_lostness(),
            local_lostness_normalized: normalized(tracker.local_lostness(), ceiling),
            tasks: tracker
                .labels()
                .iter()
                .map(|label| TaskReport::from_label(label, ceiling))
                .collect(),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl TaskReport {
    fn from_label(label: &CuratorLabel, ceiling: f64) -> Self {
        Self {
            id: label.id().to_string(),
            min_steps: label.min_steps(),
            progress: label.progress(),
            total_nodes_visited: label.total_nodes_visited(),
            unique_nodes_visited: label.unique_nodes_visited().len(),
            lostness: label.cached_lostness(),
            lostness_normalized: normalized(label.cached_lostness(), ceiling),
            objectives: label
                .objectives()
                .iter()
                .map(|o| ObjectiveReport::from_objective(o, ceiling))
                .collect(),
        }
    }
}

impl ObjectiveReport {
    fn from_objective(objective: &CuratorObjective, ceiling: f64) -> Self {
        Self {
            id: objective.id.clone(),
            found: objective.found,
            min_steps: objective.min_steps,
            total_nodes_visited: objective.total_nodes_visited,
            unique_nodes_visited: objective.unique_nodes_visited,
            start_node: objective.start_node.clone(),
            end_node: objective.end_node.clone(),
            lostness: objective.lostness,
            lostness_normalized: normalized(objective.lostness, ceiling),
        }
    }
}
