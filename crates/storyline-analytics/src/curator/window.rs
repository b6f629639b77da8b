//! The traversal window: visits accumulated since the last objective.

use storyline_core::constants;
use storyline_core::types::{FxIndexSet, Visit};

/// What a window held at the moment an objective closed it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowSnapshot {
    pub first_node: Option<String>,
    pub end_node: Option<String>,
    pub total_nodes: u32,
    pub unique_nodes: u32,
}

/// Task-agnostic visitation log for one play session.
///
/// Each objective is measured over the visits since the previous one. When
/// a window closes, the next one starts at the last location the player
/// moved to, so consecutive measurements telescope.
#[derive(Debug, Clone)]
pub struct TraversalWindow {
    locomotion_verb: String,
    first_node: Option<String>,
    end_node: Option<String>,
    last_locomotion_node: Option<String>,
    total_nodes: u32,
    unique_nodes: FxIndexSet<Visit>,
}

impl TraversalWindow {
    pub fn new() -> Self {
        Self::with_locomotion_verb(constants::LOCOMOTION_VERB)
    }

    /// Window that treats `verb` as the move-to-location verb.
    pub fn with_locomotion_verb(verb: impl Into<String>) -> Self {
        Self {
            locomotion_verb: verb.into(),
            first_node: None,
            end_node: None,
            last_locomotion_node: None,
            total_nodes: 0,
            unique_nodes: FxIndexSet::default(),
        }
    }

    /// Start the current window at `node`, e.g. the spawn point of a session.
    pub fn begin_at(&mut self, node: impl Into<String>) {
        self.first_node = Some(node.into());
    }

    /// Log one visit. Returns `true` when the (object, verb) pair is new to
    /// this window.
    pub fn update_path(&mut self, object: &str, verb: &str) -> bool {
        let inserted = self.unique_nodes.insert(Visit::new(object, verb));
        self.total_nodes += 1;
        self.end_node = Some(object.to_string());
        if verb == self.locomotion_verb {
            self.last_locomotion_node = Some(object.to_string());
        }
        inserted
    }

    /// Snapshot the window and open the next one at the last locomotion node.
    pub fn close(&mut self) -> WindowSnapshot {
        let snapshot = WindowSnapshot {
            first_node: self.first_node.take(),
            end_node: self.end_node.take(),
            total_nodes: self.total_nodes,
            unique_nodes: self.unique_nodes.len() as u32,
        };
        self.first_node = self.last_locomotion_node.take();
        self.total_nodes = 0;
        self.unique_nodes.clear();
        snapshot
    }

    /// Forget everything, including where the window started.
    pub fn reset(&mut self) {
        self.first_node = None;
        self.end_node = None;
        self.last_locomotion_node = None;
        self.total_nodes = 0;
        self.unique_nodes.clear();
    }

    pub fn first_node(&self) -> Option<&str> {
        self.first_node.as_deref()
    }

    pub fn end_node(&self) -> Option<&str> {
        self.end_node.as_deref()
    }

    pub fn last_locomotion_node(&self) -> Option<&str> {
        self.last_locomotion_node.as_deref()
    }

    pub fn total_nodes(&self) -> u32 {
        self.total_nodes
    }

    pub fn unique_nodes(&self) -> &FxIndexSet<Visit> {
        &self.unique_nodes
    }

    pub fn locomotion_verb(&self) -> &str {
        &self.locomotion_verb
    }
}

impl Default for TraversalWindow {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn close_without_locomotion_leaves_next_window_unanchored() {
        let mut window = TraversalWindow::new();
        window.begin_at("Spawn");
        window.update_path("Lever", "attempted");
        let snapshot = window.close();
        assert_eq!(snapshot.first_node.as_deref(), Some("Spawn"));
        assert_eq!(snapshot.end_node.as_deref(), Some("Lever"));
        assert_eq!(window.first_node(), None);
    }

    #[test]
    fn unique_nodes_keep_first_visit_order() {
        let mut window = TraversalWindow::new();
        window.update_path("B", "jumped to");
        window.update_path("A", "jumped to");
        window.update_path("B", "jumped to");
        let order: Vec<&str> = window
            .unique_nodes()
            .iter()
            .map(|v| v.object.as_str())
            .collect();
        assert_eq!(order, vec!["B", "A"]);
    }
}
