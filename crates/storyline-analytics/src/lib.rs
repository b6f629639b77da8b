//! # storyline-analytics
//!
//! Player-analytics engine for authored story graphs: a directed graph store
//! loaded from JSON edge and node lists, breadth-first shortest paths, the
//! two-term lostness score, curator objective tracking over telescoping
//! traversal windows, and per-session telemetry ingest.

pub mod curator;
pub mod graph;
pub mod lostness;
pub mod session;
pub mod telemetry;

pub use curator::{CuratorLabel, CuratorObjective, CuratorTracker, TraversalWindow};
pub use graph::{NodeKind, StoryGraph};
pub use session::{PlaySession, SessionRegistry};
pub use telemetry::TelemetryEvent;
