//! Graph Store and Path Finder.
//!
//! Directed multigraph of named story nodes on a petgraph `StableGraph`,
//! loaded atomically from JSON, searched with frontier-record BFS.

pub mod loader;
pub mod path_finding;
pub mod types;

pub use path_finding::{shortest_path, shortest_route, LogicFilter, ShortestPath};
pub use types::{NodeKind, StoryGraph};
