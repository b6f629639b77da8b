//! Tests for the Storyline configuration system.

use std::sync::Mutex;

use storyline_core::config::StorylineConfig;
use storyline_core::constants;
use storyline_core::errors::ConfigError;

/// Serializes tests that touch environment variables.
static ENV_MUTEX: Mutex<()> = Mutex::new(());

fn tempdir() -> tempfile::TempDir {
    tempfile::TempDir::new().unwrap()
}

fn clear_storyline_env_vars() {
    for key in [
        "STORYLINE_LOCOMOTION_VERB",
        "STORYLINE_LOGIC_MARKER",
        "STORYLINE_LOSTNESS_CEILING",
        "STORYLINE_EDGES_PATH",
        "STORYLINE_NODES_PATH",
        "STORYLINE_CURATORS_PATH",
        "STORYLINE_MAX_SESSIONS",
        "STORYLINE_UNLOCK_VERB",
        "STORYLINE_UNLOCK_RESULT",
        "STORYLINE_SPAWN_NODE",
    ] {
        std::env::remove_var(key);
    }
}

#[test]
fn test_env_overrides_project_file() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_storyline_env_vars();

    let dir = tempdir();
    std::fs::write(
        dir.path().join("storyline.toml"),
        r#"
[analytics]
locomotion_verb = "walked to"
lostness_ceiling = 2.0

[session]
max_sessions = 8
"#,
    )
    .unwrap();

    std::env::set_var("STORYLINE_MAX_SESSIONS", "16");

    let config = StorylineConfig::load(dir.path()).unwrap();
    assert_eq!(config.analytics.effective_locomotion_verb(), "walked to");
    assert_eq!(config.analytics.effective_lostness_ceiling(), 2.0);
    assert_eq!(config.session.effective_max_sessions(), 16);

    clear_storyline_env_vars();
}

#[test]
fn test_env_overrides_unlock_vocabulary_and_spawn() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_storyline_env_vars();

    let dir = tempdir();
    std::fs::write(
        dir.path().join("storyline.toml"),
        r#"
[analytics]
unlock_verb = "tried"
unlock_result = "opened"

[session]
spawn_node = "Lobby"
"#,
    )
    .unwrap();

    std::env::set_var("STORYLINE_UNLOCK_VERB", "used");
    std::env::set_var("STORYLINE_UNLOCK_RESULT", "unsealed");
    std::env::set_var("STORYLINE_SPAWN_NODE", "Spawn");

    let config = StorylineConfig::load(dir.path()).unwrap();
    assert_eq!(config.analytics.effective_unlock_verb(), "used");
    assert_eq!(config.analytics.effective_unlock_result(), "unsealed");
    assert_eq!(config.session.spawn_node.as_deref(), Some("Spawn"));

    clear_storyline_env_vars();
}

#[test]
fn test_missing_project_file_uses_defaults() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_storyline_env_vars();

    let dir = tempdir();
    let config = StorylineConfig::load(dir.path()).unwrap();

    assert_eq!(
        config.analytics.effective_locomotion_verb(),
        constants::LOCOMOTION_VERB
    );
    assert_eq!(config.analytics.effective_unlock_verb(), "attempted");
    assert_eq!(config.analytics.effective_unlock_result(), "unlocked");
    assert_eq!(config.analytics.effective_logic_marker(), "Logic");
    assert!(
        (config.analytics.effective_lostness_ceiling() - std::f64::consts::SQRT_2).abs() < 1e-12
    );
}

#[test]
fn test_invalid_project_toml_is_parse_error() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_storyline_env_vars();

    let dir = tempdir();
    std::fs::write(dir.path().join("storyline.toml"), "[analytics\nbroken").unwrap();

    let err = StorylineConfig::load(dir.path()).unwrap_err();
    assert!(matches!(err, ConfigError::ParseError { .. }));
}

#[test]
fn test_validation_rejects_non_positive_ceiling() {
    let err = StorylineConfig::from_toml("[analytics]\nlostness_ceiling = 0.0\n").unwrap_err();
    match err {
        ConfigError::ValidationFailed { field, .. } => {
            assert_eq!(field, "analytics.lostness_ceiling");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_validation_rejects_empty_verb() {
    let err = StorylineConfig::from_toml("[analytics]\nlocomotion_verb = \"  \"\n").unwrap_err();
    assert!(matches!(err, ConfigError::ValidationFailed { .. }));
}

#[test]
fn test_validation_rejects_zero_sessions() {
    let err = StorylineConfig::from_toml("[session]\nmax_sessions = 0\n").unwrap_err();
    assert!(matches!(err, ConfigError::ValidationFailed { .. }));
}

#[test]
fn test_unknown_keys_ignored() {
    let config = StorylineConfig::from_toml(
        r#"
[analytics]
logic_marker = "Gate"
colour = "blue"

[renderer]
fps = 60
"#,
    )
    .unwrap();
    assert_eq!(config.analytics.effective_logic_marker(), "Gate");
}

#[test]
fn test_toml_round_trip_preserves_paths() {
    let config = StorylineConfig::from_toml(
        r#"
[graph]
edges_path = "data/edges.json"
curators_path = "data/curators.json"

[session]
spawn_node = "Entrance"
"#,
    )
    .unwrap();

    let serialized = config.to_toml().unwrap();
    let reparsed = StorylineConfig::from_toml(&serialized).unwrap();
    assert_eq!(
        reparsed.graph.edges_path.as_deref(),
        Some(std::path::Path::new("data/edges.json"))
    );
    assert!(reparsed.graph.nodes_path.is_none());
    assert_eq!(reparsed.session.spawn_node.as_deref(), Some("Entrance"));
}
