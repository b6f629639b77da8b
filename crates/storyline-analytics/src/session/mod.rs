//! Play sessions: per-player analytics state and a concurrent registry.

pub mod play_session;
pub mod registry;

pub use play_session::{IngestOutcome, PlaySession};
pub use registry::SessionRegistry;
