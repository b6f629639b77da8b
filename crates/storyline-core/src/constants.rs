//! Compiled defaults shared across subsystems.

/// Verb a telemetry event carries when the player moves to a location node.
pub const LOCOMOTION_VERB: &str = "jumped to";

/// Verb of an attempted interaction (paired with [`UNLOCK_RESULT`] for unlocks).
pub const UNLOCK_VERB: &str = "attempted";

/// Result string marking a successful unlock.
pub const UNLOCK_RESULT: &str = "unlocked";

/// Name fragment identifying logic nodes that carry no recorded kind.
pub const LOGIC_MARKER: &str = "Logic";

/// Upper reference value for lostness on well-formed inputs, used to
/// normalize scores into `[0, 1]`.
pub const LOSTNESS_CEILING: f64 = std::f64::consts::SQRT_2;

/// Default cap on concurrently tracked play sessions.
pub const DEFAULT_MAX_SESSIONS: usize = 64;

/// Node-kind strings accepted in node-list files.
pub const NODE_KIND_LOCOMOTION: &str = "locomotion";
pub const NODE_KIND_TRIGGER: &str = "trigger";
pub const NODE_KIND_ARTIFACT: &str = "artifact";
pub const NODE_KIND_LOGIC: &str = "logic";

/// Project-level config file name.
pub const CONFIG_FILE_NAME: &str = "storyline.toml";

/// Environment variable read by [`crate::tracing::init_tracing`].
pub const LOG_ENV_VAR: &str = "STORYLINE_LOG";
