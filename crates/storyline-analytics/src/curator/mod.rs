//! Objective/Curator Tracker.
//!
//! Curator labels (tasks) own ordered objectives. Visits are logged into a
//! telescoping [`TraversalWindow`]; when an objective is reached the window
//! is snapshotted into it, lostness is computed against the story graph,
//! and task and game progress are rolled up.

pub mod loader;
pub mod report;
pub mod tracker;
pub mod types;
pub mod window;

pub use report::{AnalyticsReport, ObjectiveReport, TaskReport};
pub use tracker::CuratorTracker;
pub use types::{CuratorLabel, CuratorObjective, ObjectiveMeasurement};
pub use window::{TraversalWindow, WindowSnapshot};
