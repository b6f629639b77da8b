//! CuratorTracker: label table, objective completion and progress roll-up.

use std::sync::Arc;

use storyline_core::errors::ContractError;
use storyline_core::events::handler::AnalyticsEventHandler;
use storyline_core::events::types::{
    LostnessCalculatedEvent, LostnessScope, ObjectiveFoundEvent, ProgressUpdatedEvent,
    ResetEvent, VisitRecordedEvent,
};
use storyline_core::events::EventDispatcher;
use storyline_core::tracing::metrics;
use storyline_core::types::FxHashMap;

use super::report::AnalyticsReport;
use super::types::{CuratorLabel, ObjectiveMeasurement};
use super::window::TraversalWindow;
use crate::graph::StoryGraph;
use crate::lostness::{lostness_for_objective, lostness_from_totals};

/// Owns every curator label of one play session.
///
/// Labels live in a `Vec` in load order, with an id index beside it.
/// Lookups by id that miss are caller bugs and come back as
/// [`ContractError`].
#[derive(Debug, Clone)]
pub struct CuratorTracker {
    labels: Vec<CuratorLabel>,
    label_index: FxHashMap<String, usize>,
    game_progress: f64,
    local_lostness: Option<f64>,
    session_id: Option<String>,
    dispatcher: EventDispatcher,
}

impl CuratorTracker {
    pub fn new() -> Self {
        Self {
            labels: Vec::new(),
            label_index: FxHashMap::default(),
            game_progress: 0.0,
            local_lostness: Some(0.0),
            session_id: None,
            dispatcher: EventDispatcher::new(),
        }
    }

    pub fn register_handler(&mut self, handler: Arc<dyn AnalyticsEventHandler>) {
        self.dispatcher.register(handler);
    }

    pub fn dispatcher(&self) -> &EventDispatcher {
        &self.dispatcher
    }

    /// Tag every event this tracker emits with `session_id`.
    pub fn set_session_id(&mut self, session_id: impl Into<String>) {
        self.session_id = Some(session_id.into());
    }

    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }

    pub(crate) fn replace_labels(&mut self, labels: Vec<CuratorLabel>) {
        self.label_index = labels
            .iter()
            .enumerate()
            .map(|(i, label)| (label.id.clone(), i))
            .collect();
        self.labels = labels;
        self.game_progress = 0.0;
        self.local_lostness = Some(0.0);
    }

    /// Append a label. Returns `false` if its id is already taken.
    pub fn add_label(&mut self, label: CuratorLabel) -> bool {
        if self.label_index.contains_key(&label.id) {
            return false;
        }
        self.label_index.insert(label.id.clone(), self.labels.len());
        self.labels.push(label);
        true
    }

    /// Labels in load order.
    pub fn labels(&self) -> &[CuratorLabel] {
        &self.labels
    }

    pub fn label(&self, curator_id: &str) -> Option<&CuratorLabel> {
        self.label_index.get(curator_id).map(|&i| &self.labels[i])
    }

    pub fn label_count(&self) -> usize {
        self.labels.len()
    }

    fn label_position(&self, curator_id: &str) -> Result<usize, ContractError> {
        self.label_index
            .get(curator_id)
            .copied()
            .ok_or_else(|| ContractError::UnknownCurator {
                curator_id: curator_id.to_string(),
            })
    }

    fn objective_position(
        &self,
        curator_id: &str,
        objective_id: &str,
    ) -> Result<(usize, usize), ContractError> {
        let li = self.label_position(curator_id)?;
        let oi = self.labels[li]
            .objective_index
            .get(objective_id)
            .copied()
            .ok_or_else(|| ContractError::UnknownObjective {
                curator_id: curator_id.to_string(),
                objective_id: objective_id.to_string(),
            })?;
        Ok((li, oi))
    }

    /// Overwrite the authored minimum steps of a task.
    pub fn set_label_min_steps(
        &mut self,
        curator_id: &str,
        min_steps: u32,
    ) -> Result<(), ContractError> {
        let li = self.label_position(curator_id)?;
        self.labels[li].set_min_steps(min_steps);
        Ok(())
    }

    /// Log a visit into the session-wide window.
    pub fn update_path(&self, window: &mut TraversalWindow, object: &str, verb: &str) -> bool {
        let inserted = window.update_path(object, verb);
        self.dispatcher.emit_visit_recorded(&VisitRecordedEvent {
            session_id: self.session_id.clone(),
            curator_id: None,
            object: object.to_string(),
            verb: verb.to_string(),
            unique_nodes: window.unique_nodes().len(),
            total_nodes: window.total_nodes(),
        });
        inserted
    }

    /// Log a visit against one task's own accounting.
    pub fn node_visited(
        &mut self,
        task_id: &str,
        object: &str,
        verb: &str,
    ) -> Result<(), ContractError> {
        let li = self.label_position(task_id)?;
        let label = &mut self.labels[li];
        label.record_visit(object, verb);
        let event = VisitRecordedEvent {
            session_id: self.session_id.clone(),
            curator_id: Some(task_id.to_string()),
            object: object.to_string(),
            verb: verb.to_string(),
            unique_nodes: label.unique_nodes_visited.len(),
            total_nodes: label.total_nodes_visited,
        };
        self.dispatcher.emit_visit_recorded(&event);
        Ok(())
    }

    /// Mark `objective_id` found if some task is still waiting on it.
    ///
    /// Scans labels in load order for the first one that owns the objective
    /// and has not found it yet. On a hit the window is snapshotted into the
    /// objective and closed, the objective's lostness is computed, and
    /// progress is rolled up. Returns `false`, leaving the window alone,
    /// when nothing matched.
    pub fn possible_objective_found(
        &mut self,
        objective_id: &str,
        window: &mut TraversalWindow,
        graph: &StoryGraph,
    ) -> bool {
        let hit = self.labels.iter().enumerate().find_map(|(li, label)| {
            label
                .objective_index
                .get(objective_id)
                .copied()
                .filter(|&oi| !label.objectives[oi].found)
                .map(|oi| (li, oi))
        });
        let Some((li, oi)) = hit else {
            return false;
        };

        let snapshot = window.close();
        let measured = lostness_for_objective(
            graph,
            snapshot.first_node.as_deref(),
            snapshot.end_node.as_deref(),
            snapshot.total_nodes,
            snapshot.unique_nodes,
        );

        let objective = &mut self.labels[li].objectives[oi];
        objective.found = true;
        objective.start_node = snapshot.first_node;
        objective.end_node = snapshot.end_node;
        objective.total_nodes_visited = snapshot.total_nodes;
        objective.unique_nodes_visited = snapshot.unique_nodes;
        objective.min_steps = measured.min_steps;
        objective.lostness = measured.lostness;

        self.after_objective_found(li, oi);
        true
    }

    /// Record an objective measured elsewhere, bypassing the window.
    pub fn objective_found(
        &mut self,
        objective_id: &str,
        curator_id: &str,
        measurement: ObjectiveMeasurement,
    ) -> Result<(), ContractError> {
        let (li, oi) = self.objective_position(curator_id, objective_id)?;
        let objective = &mut self.labels[li].objectives[oi];
        objective.min_steps = Some(measurement.min_steps);
        objective.total_nodes_visited = measurement.total_nodes_visited;
        objective.unique_nodes_visited = measurement.unique_nodes_visited;
        objective.lostness = measurement.lostness;
        objective.start_node = measurement.start_node;
        objective.end_node = measurement.end_node;
        objective.found = true;

        self.after_objective_found(li, oi);
        Ok(())
    }

    fn after_objective_found(&mut self, li: usize, oi: usize) {
        let label = &mut self.labels[li];
        let objective = &label.objectives[oi];
        tracing::info!(
            curator_id = %label.id,
            objective_id = %objective.id,
            start = objective.start_node.as_deref(),
            end = objective.end_node.as_deref(),
            { metrics::LOSTNESS } = objective.lostness,
            "objective found"
        );
        self.dispatcher.emit_objective_found(&ObjectiveFoundEvent {
            session_id: self.session_id.clone(),
            curator_id: label.id.clone(),
            objective_id: objective.id.clone(),
            start_node: objective.start_node.clone(),
            end_node: objective.end_node.clone(),
            total_nodes: objective.total_nodes_visited,
            unique_nodes: objective.unique_nodes_visited,
        });
        self.dispatcher
            .emit_lostness_calculated(&LostnessCalculatedEvent {
                session_id: self.session_id.clone(),
                scope: LostnessScope::Objective {
                    curator_id: label.id.clone(),
                    objective_id: objective.id.clone(),
                },
                lostness: objective.lostness,
            });

        let label_progress = label.recompute_progress();
        let curator_id = label.id.clone();
        let game_progress = self.update_game_progress();
        self.update_local_lostness();
        self.dispatcher.emit_progress_updated(&ProgressUpdatedEvent {
            session_id: self.session_id.clone(),
            curator_id,
            label_progress,
            game_progress,
        });
    }

    /// Whole-game progress: the mean of every label's progress.
    pub fn update_game_progress(&mut self) -> f64 {
        self.game_progress = if self.labels.is_empty() {
            0.0
        } else {
            self.labels.iter().map(CuratorLabel::progress).sum::<f64>() / self.labels.len() as f64
        };
        tracing::debug!(
            { metrics::PROGRESS } = self.game_progress,
            "game progress updated"
        );
        self.game_progress
    }

    /// Aggregate lostness over every found objective.
    ///
    /// R, S and N are summed across objectives before applying the formula
    /// once. Objectives whose R is undefined are left out of all three sums.
    pub fn update_local_lostness(&mut self) -> Option<f64> {
        let (mut r, mut s, mut n) = (0u64, 0u64, 0u64);
        for objective in self.labels.iter().flat_map(|l| l.objectives.iter()) {
            if !objective.found {
                continue;
            }
            if let Some(min_steps) = objective.min_steps {
                r += u64::from(min_steps);
                s += u64::from(objective.total_nodes_visited);
                n += u64::from(objective.unique_nodes_visited);
            }
        }
        self.local_lostness = lostness_from_totals(r, s, n);
        self.dispatcher
            .emit_lostness_calculated(&LostnessCalculatedEvent {
                session_id: self.session_id.clone(),
                scope: LostnessScope::Game,
                lostness: self.local_lostness,
            });
        self.local_lostness
    }

    /// Lostness of a whole task, computed once and cached.
    ///
    /// Measured from the start of the first found objective to the end of
    /// the last found one, over the task's own visit counts. An undefined
    /// result is not cached.
    pub fn lostness_of_label(
        &mut self,
        curator_id: &str,
        graph: &StoryGraph,
    ) -> Result<Option<f64>, ContractError> {
        let li = self.label_position(curator_id)?;
        let label = &mut self.labels[li];
        if let Some(cached) = label.lostness {
            return Ok(Some(cached));
        }

        let mut found = label.objectives.iter().filter(|o| o.found);
        let first = found.next();
        let last = found.last().or(first);
        let start = first.and_then(|o| o.start_node.as_deref());
        let end = last.and_then(|o| o.end_node.as_deref());
        let measured = lostness_for_objective(
            graph,
            start,
            end,
            label.total_nodes_visited,
            label.unique_nodes_visited.len() as u32,
        );

        if measured.lostness.is_some() {
            label.lostness = measured.lostness;
        }
        self.dispatcher
            .emit_lostness_calculated(&LostnessCalculatedEvent {
                session_id: self.session_id.clone(),
                scope: LostnessScope::Label {
                    curator_id: curator_id.to_string(),
                },
                lostness: measured.lostness,
            });
        Ok(measured.lostness)
    }

    /// Lostness of one objective over its recorded window, computed once
    /// and cached together with its R.
    pub fn lostness_of_objective(
        &mut self,
        curator_id: &str,
        objective_id: &str,
        graph: &StoryGraph,
    ) -> Result<Option<f64>, ContractError> {
        let (li, oi) = self.objective_position(curator_id, objective_id)?;
        let objective = &mut self.labels[li].objectives[oi];
        if let Some(cached) = objective.lostness {
            return Ok(Some(cached));
        }

        let measured = lostness_for_objective(
            graph,
            objective.start_node.as_deref(),
            objective.end_node.as_deref(),
            objective.total_nodes_visited,
            objective.unique_nodes_visited,
        );
        if measured.lostness.is_some() {
            objective.min_steps = measured.min_steps;
            objective.lostness = measured.lostness;
        }
        self.dispatcher
            .emit_lostness_calculated(&LostnessCalculatedEvent {
                session_id: self.session_id.clone(),
                scope: LostnessScope::Objective {
                    curator_id: curator_id.to_string(),
                    objective_id: objective_id.to_string(),
                },
                lostness: measured.lostness,
            });
        Ok(measured.lostness)
    }

    pub fn game_progress(&self) -> f64 {
        self.game_progress
    }

    /// `None` when the aggregate over found objectives is undefined.
    pub fn local_lostness(&self) -> Option<f64> {
        self.local_lostness
    }

    /// Return every label and objective to its freshly loaded state.
    pub fn reset_all(&mut self) {
        for label in &mut self.labels {
            label.reset();
        }
        self.game_progress = 0.0;
        self.local_lostness = Some(0.0);
        tracing::info!(labels = self.labels.len(), "curator tracker reset");
        self.dispatcher.emit_reset(&ResetEvent {
            session_id: self.session_id.clone(),
            labels_reset: self.labels.len(),
        });
    }

    /// Serializable snapshot for display, lostness normalized by `ceiling`.
    pub fn report(&self, ceiling: f64) -> AnalyticsReport {
        AnalyticsReport::from_tracker(self, ceiling)
    }
}

impl Default for CuratorTracker {
    fn default() -> Self {
        Self::new()
    }
}
