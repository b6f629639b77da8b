//! Event payload types pushed to display collaborators.
//!
//! Every payload carries the id of the play session that produced it, so
//! one handler can serve many concurrent sessions.

/// Payload for `on_visit_recorded`.
#[derive(Debug, Clone)]
pub struct VisitRecordedEvent {
    /// `None` for trackers used outside a play session.
    pub session_id: Option<String>,
    /// Curator label the visit was scoped to, `None` for the global window.
    pub curator_id: Option<String>,
    pub object: String,
    pub verb: String,
    pub unique_nodes: usize,
    pub total_nodes: u32,
}

/// Payload for `on_objective_found`.
#[derive(Debug, Clone)]
pub struct ObjectiveFoundEvent {
    pub session_id: Option<String>,
    pub curator_id: String,
    pub objective_id: String,
    pub start_node: Option<String>,
    pub end_node: Option<String>,
    pub total_nodes: u32,
    pub unique_nodes: u32,
}

/// What a lostness value was computed for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LostnessScope {
    Objective {
        curator_id: String,
        objective_id: String,
    },
    Label {
        curator_id: String,
    },
    Game,
}

/// Payload for `on_lostness_calculated`.
#[derive(Debug, Clone)]
pub struct LostnessCalculatedEvent {
    pub session_id: Option<String>,
    pub scope: LostnessScope,
    /// `None` when the inputs leave lostness undefined.
    pub lostness: Option<f64>,
}

/// Payload for `on_progress_updated`.
#[derive(Debug, Clone)]
pub struct ProgressUpdatedEvent {
    pub session_id: Option<String>,
    pub curator_id: String,
    pub label_progress: f64,
    pub game_progress: f64,
}

/// Payload for `on_reset`.
#[derive(Debug, Clone)]
pub struct ResetEvent {
    pub session_id: Option<String>,
    pub labels_reset: usize,
}
