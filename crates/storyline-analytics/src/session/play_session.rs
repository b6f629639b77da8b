//! PlaySession: one player's window and tracker over a shared graph.

use std::sync::Arc;

use storyline_core::config::{AnalyticsConfig, StorylineConfig};
use storyline_core::errors::{ContractError, CuratorLoadError, SessionError};

use crate::curator::{AnalyticsReport, CuratorTracker, TraversalWindow};
use crate::graph::{LogicFilter, ShortestPath, StoryGraph};
use crate::telemetry::TelemetryEvent;

/// What one ingested event changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestOutcome {
    /// The (object, verb) pair was new to the current window.
    pub new_visit: bool,
    /// The object completed a pending objective.
    pub objective_found: bool,
    /// The event was a successful unlock attempt.
    pub unlock: bool,
}

/// Analytics state of a single play session.
#[derive(Debug, Clone)]
pub struct PlaySession {
    id: String,
    graph: Arc<StoryGraph>,
    tracker: CuratorTracker,
    window: TraversalWindow,
    active_task: Option<String>,
    spawn_node: Option<String>,
    analytics: AnalyticsConfig,
}

impl PlaySession {
    pub fn new(
        id: impl Into<String>,
        graph: Arc<StoryGraph>,
        mut tracker: CuratorTracker,
        config: &StorylineConfig,
    ) -> Self {
        let id = id.into();
        tracker.set_session_id(id.as_str());
        let mut window =
            TraversalWindow::with_locomotion_verb(config.analytics.effective_locomotion_verb());
        if let Some(spawn) = &config.session.spawn_node {
            window.begin_at(spawn.as_str());
        }
        Self {
            id,
            graph,
            tracker,
            window,
            active_task: None,
            spawn_node: config.session.spawn_node.clone(),
            analytics: config.analytics.clone(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn graph(&self) -> &StoryGraph {
        &self.graph
    }

    pub fn tracker(&self) -> &CuratorTracker {
        &self.tracker
    }

    pub fn window(&self) -> &TraversalWindow {
        &self.window
    }

    pub fn active_task(&self) -> Option<&str> {
        self.active_task.as_deref()
    }

    /// Scope subsequent visits to `task_id` as well as the window.
    /// `None` stops task-scoped accounting.
    pub fn set_active_task(&mut self, task_id: Option<&str>) -> Result<(), ContractError> {
        if let Some(id) = task_id {
            if self.tracker.label(id).is_none() {
                return Err(ContractError::UnknownCurator {
                    curator_id: id.to_string(),
                });
            }
        }
        self.active_task = task_id.map(str::to_string);
        Ok(())
    }

    /// Replace the label table from a JSON array.
    ///
    /// The old table stays in place on error. On success the window reopens
    /// at the spawn node and the active task is dropped if the new table no
    /// longer has it.
    pub fn load_labels(&mut self, json: &str) -> Result<usize, CuratorLoadError> {
        let count = self.tracker.load_labels_str(json)?;
        let stale = self
            .active_task
            .as_deref()
            .is_some_and(|task| self.tracker.label(task).is_none());
        if stale {
            let task = self.active_task.take();
            tracing::warn!(session = %self.id, task = ?task, "active task dropped by label reload");
        }
        self.reopen_window();
        Ok(count)
    }

    /// Feed one telemetry event through the window, the active task and
    /// objective detection.
    ///
    /// A missing active task is rejected before the window is touched.
    pub fn ingest(&mut self, event: &TelemetryEvent) -> Result<IngestOutcome, SessionError> {
        if let Some(task) = &self.active_task {
            if self.tracker.label(task).is_none() {
                return Err(ContractError::UnknownCurator {
                    curator_id: task.clone(),
                }
                .into());
            }
        }
        let new_visit = self
            .tracker
            .update_path(&mut self.window, &event.object, &event.verb);
        if let Some(task) = &self.active_task {
            self.tracker.node_visited(task, &event.object, &event.verb)?;
        }
        let objective_found =
            self.tracker
                .possible_objective_found(&event.object, &mut self.window, &self.graph);
        let unlock = event.is_unlock(&self.analytics);

        tracing::debug!(
            session = %self.id,
            object = %event.object,
            verb = %event.verb,
            objective_found,
            unlock,
            "telemetry ingested"
        );
        Ok(IngestOutcome {
            new_visit,
            objective_found,
            unlock,
        })
    }

    /// See [`CuratorTracker::lostness_of_label`].
    pub fn lostness_of_label(&mut self, curator_id: &str) -> Result<Option<f64>, ContractError> {
        self.tracker.lostness_of_label(curator_id, &self.graph)
    }

    /// See [`CuratorTracker::lostness_of_objective`].
    pub fn lostness_of_objective(
        &mut self,
        curator_id: &str,
        objective_id: &str,
    ) -> Result<Option<f64>, ContractError> {
        self.tracker
            .lostness_of_objective(curator_id, objective_id, &self.graph)
    }

    /// Fewest authored steps between two nodes, skipping logic nodes as
    /// configured by the analytics marker.
    pub fn shortest_route(&self, start: &str, end: &str) -> Option<ShortestPath> {
        let filter = LogicFilter::from_config(&self.analytics);
        self.graph.shortest_route(start, end, &filter)
    }

    /// Reset the tracker and reopen the window at the spawn node.
    pub fn reset(&mut self) {
        self.tracker.reset_all();
        self.reopen_window();
    }

    fn reopen_window(&mut self) {
        self.window.reset();
        if let Some(spawn) = &self.spawn_node {
            self.window.begin_at(spawn.as_str());
        }
    }

    pub fn report(&self) -> AnalyticsReport {
        self.tracker
            .report(self.analytics.effective_lostness_ceiling())
    }
}
