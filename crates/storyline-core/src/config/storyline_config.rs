//! Top-level Storyline configuration with layered resolution.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{AnalyticsConfig, GraphConfig, SessionConfig};
use crate::constants;
use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Environment variables (`STORYLINE_*`)
/// 2. Project config (`storyline.toml` in the project root)
/// 3. User config (`~/.storyline/config.toml`)
/// 4. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct StorylineConfig {
    pub analytics: AnalyticsConfig,
    pub graph: GraphConfig,
    pub session: SessionConfig,
}

impl StorylineConfig {
    /// Load configuration with layered resolution rooted at `root`.
    pub fn load(root: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(user_config_path) = Self::user_config_path() {
            if user_config_path.exists() {
                match Self::merge_toml_file(&mut config, &user_config_path) {
                    Ok(()) => {}
                    Err(e @ ConfigError::ParseError { .. }) => return Err(e),
                    Err(e) => {
                        ::tracing::warn!(error = %e, "ignoring unreadable user config");
                    }
                }
            }
        }

        let project_config_path = root.join(constants::CONFIG_FILE_NAME);
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        Self::apply_env_overrides(&mut config);
        Self::validate(&config)?;

        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate the configuration values.
    pub fn validate(config: &StorylineConfig) -> Result<(), ConfigError> {
        if let Some(ceiling) = config.analytics.lostness_ceiling {
            if !(ceiling.is_finite() && ceiling > 0.0) {
                return Err(ConfigError::ValidationFailed {
                    field: "analytics.lostness_ceiling".to_string(),
                    message: "must be a positive finite number".to_string(),
                });
            }
        }
        for (field, value) in [
            ("analytics.locomotion_verb", &config.analytics.locomotion_verb),
            ("analytics.unlock_verb", &config.analytics.unlock_verb),
            ("analytics.unlock_result", &config.analytics.unlock_result),
        ] {
            if matches!(value.as_deref(), Some(v) if v.trim().is_empty()) {
                return Err(ConfigError::ValidationFailed {
                    field: field.to_string(),
                    message: "must not be empty".to_string(),
                });
            }
        }
        if config.session.max_sessions == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "session.max_sessions".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        Ok(())
    }

    /// Returns the user config path: `~/.storyline/config.toml`.
    fn user_config_path() -> Option<PathBuf> {
        home_dir().map(|h| h.join(".storyline").join("config.toml"))
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored.
    fn merge_toml_file(config: &mut StorylineConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: StorylineConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, file_config);
        Ok(())
    }

    /// Merge `other` into `base`; `other` wins wherever it has a value.
    fn merge(base: &mut StorylineConfig, other: StorylineConfig) {
        let analytics = other.analytics;
        if analytics.locomotion_verb.is_some() {
            base.analytics.locomotion_verb = analytics.locomotion_verb;
        }
        if analytics.unlock_verb.is_some() {
            base.analytics.unlock_verb = analytics.unlock_verb;
        }
        if analytics.unlock_result.is_some() {
            base.analytics.unlock_result = analytics.unlock_result;
        }
        if analytics.logic_marker.is_some() {
            base.analytics.logic_marker = analytics.logic_marker;
        }
        if analytics.lostness_ceiling.is_some() {
            base.analytics.lostness_ceiling = analytics.lostness_ceiling;
        }

        let graph = other.graph;
        if graph.edges_path.is_some() {
            base.graph.edges_path = graph.edges_path;
        }
        if graph.nodes_path.is_some() {
            base.graph.nodes_path = graph.nodes_path;
        }
        if graph.curators_path.is_some() {
            base.graph.curators_path = graph.curators_path;
        }

        let session = other.session;
        if session.max_sessions.is_some() {
            base.session.max_sessions = session.max_sessions;
        }
        if session.spawn_node.is_some() {
            base.session.spawn_node = session.spawn_node;
        }
    }

    /// Apply environment variable overrides.
    /// Pattern: `STORYLINE_LOCOMOTION_VERB`, `STORYLINE_MAX_SESSIONS`, etc.
    fn apply_env_overrides(config: &mut StorylineConfig) {
        if let Ok(val) = std::env::var("STORYLINE_LOCOMOTION_VERB") {
            config.analytics.locomotion_verb = Some(val);
        }
        if let Ok(val) = std::env::var("STORYLINE_UNLOCK_VERB") {
            config.analytics.unlock_verb = Some(val);
        }
        if let Ok(val) = std::env::var("STORYLINE_UNLOCK_RESULT") {
            config.analytics.unlock_result = Some(val);
        }
        if let Ok(val) = std::env::var("STORYLINE_LOGIC_MARKER") {
            config.analytics.logic_marker = Some(val);
        }
        if let Ok(val) = std::env::var("STORYLINE_LOSTNESS_CEILING") {
            if let Ok(v) = val.parse::<f64>() {
                config.analytics.lostness_ceiling = Some(v);
            }
        }
        if let Ok(val) = std::env::var("STORYLINE_EDGES_PATH") {
            config.graph.edges_path = Some(PathBuf::from(val));
        }
        if let Ok(val) = std::env::var("STORYLINE_NODES_PATH") {
            config.graph.nodes_path = Some(PathBuf::from(val));
        }
        if let Ok(val) = std::env::var("STORYLINE_CURATORS_PATH") {
            config.graph.curators_path = Some(PathBuf::from(val));
        }
        if let Ok(val) = std::env::var("STORYLINE_MAX_SESSIONS") {
            if let Ok(v) = val.parse::<usize>() {
                config.session.max_sessions = Some(v);
            }
        }
        if let Ok(val) = std::env::var("STORYLINE_SPAWN_NODE") {
            config.session.spawn_node = Some(val);
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}

/// Cross-platform home directory resolution.
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}
