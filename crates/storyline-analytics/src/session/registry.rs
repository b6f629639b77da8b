//! SessionRegistry: concurrent per-session access via DashMap.

use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use storyline_core::config::StorylineConfig;
use storyline_core::errors::SessionError;

use super::play_session::{IngestOutcome, PlaySession};
use crate::curator::{AnalyticsReport, CuratorTracker};
use crate::graph::StoryGraph;
use crate::telemetry::TelemetryEvent;

/// Thread-safe set of play sessions sharing one story graph.
///
/// Each session is mutated under its own shard lock, so events for one
/// session are applied serially while different sessions ingest in parallel.
/// New sessions start from a clone of the template tracker.
pub struct SessionRegistry {
    sessions: DashMap<String, PlaySession>,
    graph: Arc<StoryGraph>,
    template: CuratorTracker,
    config: StorylineConfig,
}

impl SessionRegistry {
    pub fn new(graph: Arc<StoryGraph>, template: CuratorTracker, config: StorylineConfig) -> Self {
        Self {
            sessions: DashMap::new(),
            graph,
            template,
            config,
        }
    }

    pub fn graph(&self) -> &Arc<StoryGraph> {
        &self.graph
    }

    pub fn config(&self) -> &StorylineConfig {
        &self.config
    }

    /// Open a session with a fresh copy of the template tracker.
    pub fn create_session(&self, session_id: &str) -> Result<(), SessionError> {
        let max = self.config.session.effective_max_sessions();
        // len() takes every shard lock; it must run before entry() holds one.
        if self.sessions.len() >= max {
            return Err(SessionError::LimitReached { max });
        }
        match self.sessions.entry(session_id.to_string()) {
            Entry::Occupied(_) => Err(SessionError::DuplicateSession(session_id.to_string())),
            Entry::Vacant(slot) => {
                slot.insert(PlaySession::new(
                    session_id,
                    Arc::clone(&self.graph),
                    self.template.clone(),
                    &self.config,
                ));
                tracing::info!(session = session_id, "session created");
                Ok(())
            }
        }
    }

    pub fn remove_session(&self, session_id: &str) -> Option<PlaySession> {
        let removed = self.sessions.remove(session_id).map(|(_, v)| v);
        if removed.is_some() {
            tracing::info!(session = session_id, "session removed");
        }
        removed
    }

    pub fn ingest(
        &self,
        session_id: &str,
        event: &TelemetryEvent,
    ) -> Result<IngestOutcome, SessionError> {
        self.with_session(session_id, |session| session.ingest(event))?
    }

    /// Parse one telemetry message and ingest it.
    pub fn ingest_json(&self, session_id: &str, json: &str) -> Result<IngestOutcome, SessionError> {
        let event = TelemetryEvent::from_json(json)?;
        self.ingest(session_id, &event)
    }

    /// Run `f` with exclusive access to one session.
    pub fn with_session<R>(
        &self,
        session_id: &str,
        f: impl FnOnce(&mut PlaySession) -> R,
    ) -> Result<R, SessionError> {
        let mut entry = self
            .sessions
            .get_mut(session_id)
            .ok_or_else(|| SessionError::UnknownSession(session_id.to_string()))?;
        Ok(f(entry.value_mut()))
    }

    pub fn report(&self, session_id: &str) -> Result<AnalyticsReport, SessionError> {
        self.sessions
            .get(session_id)
            .map(|s| s.report())
            .ok_or_else(|| SessionError::UnknownSession(session_id.to_string()))
    }

    pub fn contains(&self, session_id: &str) -> bool {
        self.sessions.contains_key(session_id)
    }

    /// Number of active sessions.
    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    pub fn session_ids(&self) -> Vec<String> {
        self.sessions.iter().map(|r| r.key().clone()).collect()
    }
}
