//! AnalyticsEventHandler trait, all methods with no-op defaults.

use super::types::*;

/// Receives computed analytics values as they change.
///
/// All methods default to no-ops, so display collaborators only override
/// what they render. `Send + Sync` so one handler can observe sessions
/// driven from several threads.
pub trait AnalyticsEventHandler: Send + Sync {
    fn on_visit_recorded(&self, _event: &VisitRecordedEvent) {}
    fn on_objective_found(&self, _event: &ObjectiveFoundEvent) {}
    fn on_lostness_calculated(&self, _event: &LostnessCalculatedEvent) {}
    fn on_progress_updated(&self, _event: &ProgressUpdatedEvent) {}
    fn on_reset(&self, _event: &ResetEvent) {}
}
