use std::sync::{Arc, Mutex};

use chrono::{TimeZone, Utc};
use storyline_analytics::curator::CuratorTracker;
use storyline_analytics::graph::StoryGraph;
use storyline_analytics::session::{PlaySession, SessionRegistry};
use storyline_analytics::telemetry::TelemetryEvent;
use storyline_core::config::{AnalyticsConfig, SessionConfig, StorylineConfig};
use storyline_core::errors::{ContractError, SessionError, StorylineErrorCode};
use storyline_core::events::{AnalyticsEventHandler, ProgressUpdatedEvent, VisitRecordedEvent};

const LABELS: &str = r#"[
    {"text_id": "Escape", "min_steps": 3, "narrative_deps": [
        {"begin_dep": "Door1", "narr_id": "Vault"}
    ]}
]"#;

fn story_graph() -> Arc<StoryGraph> {
    let mut graph = StoryGraph::new();
    graph.add_edge("Spawn", "Hall");
    graph.add_edge("Hall", "Door1");
    graph.add_edge("Door1", "Vault");
    Arc::new(graph)
}

fn template() -> CuratorTracker {
    let mut tracker = CuratorTracker::new();
    tracker.load_labels_str(LABELS).unwrap();
    tracker
}

fn config(max_sessions: usize) -> StorylineConfig {
    StorylineConfig {
        session: SessionConfig {
            max_sessions: Some(max_sessions),
            spawn_node: Some("Spawn".to_string()),
        },
        ..Default::default()
    }
}

fn event(verb: &str, object: &str) -> TelemetryEvent {
    let ts = Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap();
    TelemetryEvent::new("player", verb, object, ts)
}

/// Records which session each progress and visit event came from.
#[derive(Default)]
struct SessionRecorder {
    progress: Mutex<Vec<(Option<String>, f64)>>,
    visits: Mutex<Vec<Option<String>>>,
}

impl AnalyticsEventHandler for SessionRecorder {
    fn on_progress_updated(&self, event: &ProgressUpdatedEvent) {
        self.progress
            .lock()
            .unwrap()
            .push((event.session_id.clone(), event.game_progress));
    }

    fn on_visit_recorded(&self, event: &VisitRecordedEvent) {
        self.visits.lock().unwrap().push(event.session_id.clone());
    }
}

// ── PlaySession ───────────────────────────────────────────────────────────

#[test]
fn new_session_starts_at_spawn() {
    let session = PlaySession::new("s1", story_graph(), template(), &config(4));
    assert_eq!(session.window().first_node(), Some("Spawn"));
    assert_eq!(session.active_task(), None);
}

#[test]
fn ingest_detects_objectives_and_unlocks() {
    let mut session = PlaySession::new("s1", story_graph(), template(), &config(4));
    session.set_active_task(Some("Escape")).unwrap();

    let hall = session.ingest(&event("jumped to", "Hall")).unwrap();
    assert!(hall.new_visit);
    assert!(!hall.objective_found);

    let unlock = session
        .ingest(&event("attempted", "Door1").with_result("unlocked"))
        .unwrap();
    assert!(unlock.unlock);
    assert!(unlock.objective_found);

    let door = session
        .tracker()
        .label("Escape")
        .unwrap()
        .objective("Door1")
        .unwrap();
    assert_eq!(door.start_node.as_deref(), Some("Spawn"));
    assert_eq!(door.end_node.as_deref(), Some("Door1"));
    assert_eq!(door.min_steps, Some(2));
    // The unlock was not a move, so the next window starts at Hall.
    assert_eq!(session.window().first_node(), Some("Hall"));

    assert_eq!(session.tracker().label("Escape").unwrap().total_nodes_visited(), 2);
    assert!((session.tracker().game_progress() - 0.5).abs() < 1e-9);
}

#[test]
fn locomotion_anchors_the_next_window() {
    let mut session = PlaySession::new("s1", story_graph(), template(), &config(4));
    session.ingest(&event("jumped to", "Hall")).unwrap();
    session.ingest(&event("jumped to", "Door1")).unwrap();

    assert_eq!(session.window().first_node(), Some("Door1"));

    let vault = session.ingest(&event("jumped to", "Vault")).unwrap();
    assert!(vault.objective_found);
    assert_eq!(
        session.lostness_of_objective("Escape", "Vault").unwrap(),
        Some(0.0)
    );
}

#[test]
fn unknown_active_task_is_rejected() {
    let mut session = PlaySession::new("s1", story_graph(), template(), &config(4));
    assert_eq!(
        session.set_active_task(Some("Nope")),
        Err(ContractError::UnknownCurator {
            curator_id: "Nope".to_string()
        })
    );
    assert_eq!(session.active_task(), None);
}

#[test]
fn reset_reopens_window_at_spawn() {
    let mut session = PlaySession::new("s1", story_graph(), template(), &config(4));
    session.ingest(&event("jumped to", "Hall")).unwrap();
    session.ingest(&event("jumped to", "Door1")).unwrap();

    session.reset();

    assert_eq!(session.window().first_node(), Some("Spawn"));
    assert_eq!(session.window().total_nodes(), 0);
    assert_eq!(session.tracker().game_progress(), 0.0);
    assert!(session
        .tracker()
        .labels()
        .iter()
        .all(|l| l.found_count() == 0));
}

#[test]
fn label_reload_drops_missing_active_task() {
    let mut session = PlaySession::new("s1", story_graph(), template(), &config(4));
    session.set_active_task(Some("Escape")).unwrap();
    session.ingest(&event("jumped to", "Hall")).unwrap();

    let loaded = session
        .load_labels(
            r#"[{"text_id": "Explore", "min_steps": 1, "narrative_deps": [{"narr_id": "Door1"}]}]"#,
        )
        .unwrap();

    assert_eq!(loaded, 1);
    assert_eq!(session.active_task(), None);
    assert_eq!(session.window().first_node(), Some("Spawn"));
    assert_eq!(session.window().total_nodes(), 0);

    let hall = session.ingest(&event("jumped to", "Hall")).unwrap();
    assert!(hall.new_visit);
    assert_eq!(session.window().total_nodes(), 1);
    let door = session.ingest(&event("jumped to", "Door1")).unwrap();
    assert!(door.objective_found);
    assert!(session.tracker().label("Explore").unwrap().is_complete());
}

#[test]
fn label_reload_keeps_surviving_active_task() {
    let mut session = PlaySession::new("s1", story_graph(), template(), &config(4));
    session.set_active_task(Some("Escape")).unwrap();

    session.load_labels(LABELS).unwrap();
    assert_eq!(session.active_task(), Some("Escape"));

    session.ingest(&event("jumped to", "Hall")).unwrap();
    assert_eq!(
        session.tracker().label("Escape").unwrap().total_nodes_visited(),
        1
    );
}

#[test]
fn failed_label_reload_leaves_session_untouched() {
    let mut session = PlaySession::new("s1", story_graph(), template(), &config(4));
    session.set_active_task(Some("Escape")).unwrap();
    session.ingest(&event("jumped to", "Hall")).unwrap();

    assert!(session.load_labels("not json").is_err());

    assert_eq!(session.active_task(), Some("Escape"));
    assert_eq!(session.window().total_nodes(), 1);
    assert!(session.tracker().label("Escape").is_some());
}

#[test]
fn route_hides_nodes_matching_configured_marker() {
    let mut graph = StoryGraph::new();
    graph.add_edge("Spawn", "Hall");
    graph.add_edge("Hall", "Gate_Switch");
    graph.add_edge("Gate_Switch", "Door1");
    let graph = Arc::new(graph);

    let mut custom = config(4);
    custom.analytics = AnalyticsConfig {
        logic_marker: Some("Switch".to_string()),
        ..Default::default()
    };
    let session = PlaySession::new("s1", Arc::clone(&graph), template(), &custom);
    let route = session.shortest_route("Spawn", "Door1").unwrap();
    assert_eq!(route.length, 3);
    assert_eq!(route.first_hop, "Hall");
    assert_eq!(route.nodes, vec!["Hall", "Door1"]);

    let plain = PlaySession::new("s2", graph, template(), &config(4));
    let route = plain.shortest_route("Spawn", "Door1").unwrap();
    assert_eq!(route.nodes, vec!["Hall", "Gate_Switch", "Door1"]);

    assert!(session.shortest_route("Door1", "Spawn").is_none());
}

// ── SessionRegistry ───────────────────────────────────────────────────────

#[test]
fn ingest_on_unknown_session_fails() {
    let registry = SessionRegistry::new(story_graph(), template(), config(4));

    let err = registry
        .ingest("ghost", &event("jumped to", "Hall"))
        .unwrap_err();

    assert!(matches!(err, SessionError::UnknownSession(ref id) if id == "ghost"));
    assert_eq!(err.error_code(), "SESSION_ERROR");
}

#[test]
fn duplicate_session_is_rejected() {
    let registry = SessionRegistry::new(story_graph(), template(), config(4));
    registry.create_session("s1").unwrap();

    assert!(matches!(
        registry.create_session("s1"),
        Err(SessionError::DuplicateSession(_))
    ));
    assert_eq!(registry.session_count(), 1);
}

#[test]
fn session_limit_is_enforced() {
    let registry = SessionRegistry::new(story_graph(), template(), config(2));
    registry.create_session("a").unwrap();
    registry.create_session("b").unwrap();

    assert!(matches!(
        registry.create_session("c"),
        Err(SessionError::LimitReached { max: 2 })
    ));

    assert!(registry.remove_session("a").is_some());
    registry.create_session("c").unwrap();
    let mut ids = registry.session_ids();
    ids.sort();
    assert_eq!(ids, vec!["b", "c"]);
}

#[test]
fn sessions_do_not_share_progress() {
    let registry = SessionRegistry::new(story_graph(), template(), config(4));
    registry.create_session("a").unwrap();
    registry.create_session("b").unwrap();

    registry.ingest("a", &event("jumped to", "Door1")).unwrap();

    let a = registry.report("a").unwrap();
    let b = registry.report("b").unwrap();
    assert!((a.game_progress - 0.5).abs() < 1e-9);
    assert_eq!(b.game_progress, 0.0);
}

#[test]
fn shared_handler_sees_which_session_emitted() {
    let recorder = Arc::new(SessionRecorder::default());
    let mut tracker = template();
    tracker.register_handler(recorder.clone());
    let registry = SessionRegistry::new(story_graph(), tracker, config(4));
    registry.create_session("alice").unwrap();
    registry.create_session("bob").unwrap();

    registry.ingest("alice", &event("jumped to", "Hall")).unwrap();
    registry.ingest("alice", &event("jumped to", "Door1")).unwrap();
    registry.ingest("bob", &event("jumped to", "Hall")).unwrap();

    let progress = recorder.progress.lock().unwrap().clone();
    assert_eq!(progress.len(), 1);
    assert_eq!(progress[0].0.as_deref(), Some("alice"));
    assert!((progress[0].1 - 0.5).abs() < 1e-9);

    let visits = recorder.visits.lock().unwrap();
    let from = |id: &str| visits.iter().filter(|s| s.as_deref() == Some(id)).count();
    assert_eq!(from("alice"), 2);
    assert_eq!(from("bob"), 1);
    assert!(visits.iter().all(Option::is_some));
}

#[test]
fn ingest_json_surfaces_telemetry_errors() {
    let registry = SessionRegistry::new(story_graph(), template(), config(4));
    registry.create_session("s1").unwrap();

    let err = registry
        .ingest_json("s1", r#"{"actor": "p", "object": "Hall", "timestamp": "2024-05-01T10:00:00Z"}"#)
        .unwrap_err();

    assert!(matches!(err, SessionError::Telemetry(_)));
    assert_eq!(err.error_code(), "TELEMETRY_ERROR");

    let ok = registry
        .ingest_json(
            "s1",
            r#"{"actor": "p", "verb": "jumped to", "object": "Hall", "timestamp": "2024-05-01T10:00:00"}"#,
        )
        .unwrap();
    assert!(ok.new_visit);
}

#[test]
fn with_session_gives_exclusive_access() {
    let registry = SessionRegistry::new(story_graph(), template(), config(4));
    registry.create_session("s1").unwrap();

    registry
        .with_session("s1", |s| s.set_active_task(Some("Escape")))
        .unwrap()
        .unwrap();
    registry.ingest("s1", &event("jumped to", "Hall")).unwrap();

    let visited = registry
        .with_session("s1", |s| {
            s.tracker().label("Escape").unwrap().total_nodes_visited()
        })
        .unwrap();
    assert_eq!(visited, 1);
}

#[test]
fn concurrent_ingest_across_sessions() {
    let registry = SessionRegistry::new(story_graph(), template(), config(16));
    let ids: Vec<String> = (0..8).map(|i| format!("player{i}")).collect();
    for id in &ids {
        registry.create_session(id).unwrap();
    }

    std::thread::scope(|scope| {
        for id in &ids {
            let registry = &registry;
            scope.spawn(move || {
                for object in ["Hall", "Door1", "Vault"] {
                    registry.ingest(id, &event("jumped to", object)).unwrap();
                }
            });
        }
    });

    for id in &ids {
        let report = registry.report(id).unwrap();
        assert_eq!(report.game_progress, 1.0);
        assert!(report.tasks[0].objectives.iter().all(|o| o.found));
    }
}
