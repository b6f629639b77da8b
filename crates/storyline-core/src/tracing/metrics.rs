//! Structured span field names.
//!
//! Shared so log queries can rely on one spelling per measurement.

/// Path Finder: hop count of the shortest path found.
pub const PATH_LENGTH: &str = "path_length";

/// Path Finder: frontier records expanded before termination.
pub const FRONTIER_EXPANDED: &str = "frontier_expanded";

/// Lostness Calculator: computed score.
pub const LOSTNESS: &str = "lostness";

/// Tracker: per-task or whole-game progress (0.0 - 1.0).
pub const PROGRESS: &str = "progress";

/// Graph Store: edges added by a load.
pub const EDGES_LOADED: &str = "edges_loaded";

/// Graph Store: node kinds recorded by a load.
pub const NODES_LOADED: &str = "nodes_loaded";

/// Tracker: curator labels loaded.
pub const LABELS_LOADED: &str = "labels_loaded";
