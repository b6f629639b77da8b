//! Tests for the Storyline error handling system.

use std::collections::HashSet;

use storyline_core::errors::*;

#[test]
fn test_all_errors_have_error_code() {
    let errors: Vec<Box<dyn Fn() -> &'static str>> = vec![
        Box::new(|| GraphLoadError::MissingEdges.error_code()),
        Box::new(|| CuratorLoadError::NotArray.error_code()),
        Box::new(|| {
            ContractError::UnknownCurator {
                curator_id: "t".into(),
            }
            .error_code()
        }),
        Box::new(|| TelemetryError::MissingField("verb").error_code()),
        Box::new(|| {
            ConfigError::FileNotFound {
                path: "/tmp".into(),
            }
            .error_code()
        }),
        Box::new(|| SessionError::UnknownSession("s".into()).error_code()),
    ];
    for code in errors.iter().map(|f| f()) {
        assert!(!code.is_empty());
    }
}

#[test]
fn test_subsystem_codes_are_distinct() {
    let codes: HashSet<&'static str> = [
        GraphLoadError::MissingEdges.error_code(),
        CuratorLoadError::NotArray.error_code(),
        ContractError::UnknownCurator {
            curator_id: "t".into(),
        }
        .error_code(),
        TelemetryError::MissingField("verb").error_code(),
        ConfigError::FileNotFound { path: "p".into() }.error_code(),
        SessionError::UnknownSession("s".into()).error_code(),
    ]
    .into_iter()
    .collect();
    assert_eq!(codes.len(), 6);
}

#[test]
fn test_session_error_delegates_code() {
    let contract = ContractError::UnknownObjective {
        curator_id: "task".into(),
        objective_id: "obj".into(),
    };
    let expected = contract.error_code();
    let session: SessionError = contract.into();
    assert!(matches!(session, SessionError::Contract(_)));
    assert_eq!(session.error_code(), expected);

    let telemetry: SessionError = TelemetryError::MissingField("object").into();
    assert_eq!(telemetry.error_code(), error_code::TELEMETRY_ERROR);
}

#[test]
fn test_tagged_string_format() {
    let err = GraphLoadError::MalformedEdge {
        index: 4,
        reason: "links must have exactly 2 elements".into(),
    };
    let tagged = err.tagged_string();
    assert!(tagged.starts_with("[GRAPH_LOAD_ERROR] "));
    assert!(tagged.contains("entry 4"));
}

#[test]
fn test_json_error_converts() {
    let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    let err: GraphLoadError = json_err.into();
    assert!(matches!(err, GraphLoadError::Json(_)));
}
