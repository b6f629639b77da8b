//! Observability system for Storyline.
//! `tracing` crate with `EnvFilter`, per-subsystem log levels.

pub mod metrics;
pub mod setup;

pub use setup::{init_tracing, log_filter};
