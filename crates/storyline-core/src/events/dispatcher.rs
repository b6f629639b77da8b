//! EventDispatcher: synchronous event dispatch with zero overhead when empty.

use std::sync::Arc;

use super::handler::AnalyticsEventHandler;
use super::types::*;

/// Synchronous event dispatcher wrapping a list of handlers.
///
/// Cloning shares the registered handlers, so a tracker cloned from a
/// template keeps reporting to the same display collaborators.
#[derive(Clone, Default)]
pub struct EventDispatcher {
    handlers: Vec<Arc<dyn AnalyticsEventHandler>>,
}

impl EventDispatcher {
    /// Create a new empty dispatcher.
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    /// Register an event handler.
    pub fn register(&mut self, handler: Arc<dyn AnalyticsEventHandler>) {
        self.handlers.push(handler);
    }

    /// Returns the number of registered handlers.
    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    /// Emit an event to all registered handlers.
    /// A panicking handler is logged and does not stop later handlers.
    fn emit<F: Fn(&dyn AnalyticsEventHandler)>(&self, f: F) {
        for handler in &self.handlers {
            let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                f(handler.as_ref());
            }));
            if result.is_err() {
                ::tracing::warn!("analytics event handler panicked");
            }
        }
    }

    pub fn emit_visit_recorded(&self, event: &VisitRecordedEvent) {
        self.emit(|h| h.on_visit_recorded(event));
    }

    pub fn emit_objective_found(&self, event: &ObjectiveFoundEvent) {
        self.emit(|h| h.on_objective_found(event));
    }

    pub fn emit_lostness_calculated(&self, event: &LostnessCalculatedEvent) {
        self.emit(|h| h.on_lostness_calculated(event));
    }

    pub fn emit_progress_updated(&self, event: &ProgressUpdatedEvent) {
        self.emit(|h| h.on_progress_updated(event));
    }

    pub fn emit_reset(&self, event: &ResetEvent) {
        self.emit(|h| h.on_reset(event));
    }
}

impl std::fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventDispatcher")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}
