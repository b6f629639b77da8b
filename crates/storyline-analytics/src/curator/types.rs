//! Curator label and objective types.

use serde::{Deserialize, Serialize};
use storyline_core::types::{FxHashMap, FxIndexSet, Visit};

/// A sub-goal of a curator label, measured once when it is reached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CuratorObjective {
    /// Label copied from the curator file (`begin_dep` or `narr_id`).
    pub id: String,
    /// R: minimum required steps. `None` until computed, or when no path exists.
    pub min_steps: Option<u32>,
    /// S: every visit in the objective's window.
    pub total_nodes_visited: u32,
    /// N: distinct (object, verb) visits in the objective's window.
    pub unique_nodes_visited: u32,
    /// Cached lostness, `None` until computed.
    pub lostness: Option<f64>,
    pub start_node: Option<String>,
    pub end_node: Option<String>,
    pub found: bool,
}

impl CuratorObjective {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            min_steps: None,
            total_nodes_visited: 0,
            unique_nodes_visited: 0,
            lostness: None,
            start_node: None,
            end_node: None,
            found: false,
        }
    }

    pub(crate) fn reset(&mut self) {
        self.min_steps = None;
        self.total_nodes_visited = 0;
        self.unique_nodes_visited = 0;
        self.lostness = None;
        self.start_node = None;
        self.end_node = None;
        self.found = false;
    }
}

/// Externally measured values for [`crate::CuratorTracker::objective_found`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectiveMeasurement {
    pub min_steps: u32,
    pub total_nodes_visited: u32,
    pub unique_nodes_visited: u32,
    pub lostness: Option<f64>,
    pub start_node: Option<String>,
    pub end_node: Option<String>,
}

/// A curator task: ordered objectives plus task-scoped visit accounting.
#[derive(Debug, Clone)]
pub struct CuratorLabel {
    pub(crate) id: String,
    /// Authored minimum steps for the whole task.
    pub(crate) min_steps: u32,
    pub(crate) objectives: Vec<CuratorObjective>,
    pub(crate) objective_index: FxHashMap<String, usize>,
    pub(crate) unique_nodes_visited: FxIndexSet<Visit>,
    pub(crate) total_nodes_visited: u32,
    pub(crate) progress: f64,
    pub(crate) lostness: Option<f64>,
}

impl CuratorLabel {
    pub fn new(id: impl Into<String>, min_steps: u32) -> Self {
        Self {
            id: id.into(),
            min_steps,
            objectives: Vec::new(),
            objective_index: FxHashMap::default(),
            unique_nodes_visited: FxIndexSet::default(),
            total_nodes_visited: 0,
            progress: 0.0,
            lostness: None,
        }
    }

    /// Append an objective. Returns `false` if the id is already present.
    pub fn add_objective(&mut self, objective_id: impl Into<String>) -> bool {
        let objective_id = objective_id.into();
        if self.objective_index.contains_key(&objective_id) {
            return false;
        }
        self.objective_index
            .insert(objective_id.clone(), self.objectives.len());
        self.objectives.push(CuratorObjective::new(objective_id));
        true
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn min_steps(&self) -> u32 {
        self.min_steps
    }

    pub fn set_min_steps(&mut self, min_steps: u32) {
        self.min_steps = min_steps;
    }

    /// Objectives in authored order.
    pub fn objectives(&self) -> &[CuratorObjective] {
        &self.objectives
    }

    pub fn objective(&self, objective_id: &str) -> Option<&CuratorObjective> {
        self.objective_index
            .get(objective_id)
            .map(|&i| &self.objectives[i])
    }

    pub fn contains_objective(&self, objective_id: &str) -> bool {
        self.objective_index.contains_key(objective_id)
    }

    pub fn found_count(&self) -> usize {
        self.objectives.iter().filter(|o| o.found).count()
    }

    pub fn is_complete(&self) -> bool {
        !self.objectives.is_empty() && self.found_count() == self.objectives.len()
    }

    pub fn unique_nodes_visited(&self) -> &FxIndexSet<Visit> {
        &self.unique_nodes_visited
    }

    pub fn total_nodes_visited(&self) -> u32 {
        self.total_nodes_visited
    }

    /// Fraction of objectives found. 0 for a label without objectives.
    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// Cached lostness, `None` until computed.
    pub fn cached_lostness(&self) -> Option<f64> {
        self.lostness
    }

    pub(crate) fn recompute_progress(&mut self) -> f64 {
        self.progress = if self.objectives.is_empty() {
            0.0
        } else {
            self.found_count() as f64 / self.objectives.len() as f64
        };
        self.progress
    }

    pub(crate) fn record_visit(&mut self, object: &str, verb: &str) {
        self.unique_nodes_visited.insert(Visit::new(object, verb));
        self.total_nodes_visited += 1;
    }

    pub(crate) fn reset(&mut self) {
        self.unique_nodes_visited.clear();
        self.total_nodes_visited = 0;
        self.lostness = None;
        self.progress = 0.0;
        for objective in &mut self.objectives {
            objective.reset();
        }
    }
}
