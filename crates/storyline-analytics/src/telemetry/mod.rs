//! Telemetry envelope: one JSON object per player action.

pub mod event;

pub use event::{parse_lines, TelemetryBatch, TelemetryEvent};
