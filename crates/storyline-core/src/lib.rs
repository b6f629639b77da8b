//! # storyline-core
//!
//! Shared foundation for the Storyline analytics engine: one error enum per
//! subsystem, layered TOML configuration, `tracing` setup, the synchronous
//! event system used to push computed values to display collaborators, and
//! the collection types the analytics crate builds on.

pub mod config;
pub mod constants;
pub mod errors;
pub mod events;
pub mod tracing;
pub mod types;
