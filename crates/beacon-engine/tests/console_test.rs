//! Operator commands end to end.

use std::sync::Arc;

use beacon_core::commands::{CommandOutcome, OperatorCommand};
use beacon_core::config::EngineConfig;
use beacon_core::errors::{BeaconError, CommandError};
use beacon_core::models::{ComponentStatus, IncidentStatus, LifecycleState, MonitorSpec};
use beacon_engine::{BeaconEngine, NotificationDispatcher, Stores};
use beacon_storage::MemoryStore;
use test_fixtures::ComponentBuilder;

fn engine() -> BeaconEngine {
    let store = Arc::new(MemoryStore::new());
    BeaconEngine::new(Stores::shared(store), EngineConfig::default(), NotificationDispatcher::new())
}

#[tokio::test]
async fn pause_and_resume_commands() {
    let engine = engine();
    let monitor = engine
        .catalog
        .create_monitor(MonitorSpec::new("https://example.com", 60, 10))
        .unwrap();
    let console = engine.console();

    let outcome = console
        .execute(OperatorCommand::PauseMonitor {
            monitor_id: monitor.id.clone(),
        })
        .await
        .unwrap();
    match outcome {
        CommandOutcome::MonitorUpdated { monitor } => assert!(monitor.is_paused()),
        other => panic!("unexpected outcome: {other:?}"),
    }

    let raw = format!(r#"{{"kind":"resume_monitor","monitor_id":"{}"}}"#, monitor.id);
    match console.execute_json(&raw).await.unwrap() {
        CommandOutcome::MonitorUpdated { monitor } => {
            assert_eq!(monitor.state.lifecycle, LifecycleState::Unknown)
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
}

#[tokio::test]
async fn incident_commands_from_json() {
    let engine = engine();
    engine
        .catalog
        .create_component(ComponentBuilder::new("API").id("api").spec())
        .unwrap();
    let console = engine.console();

    let raw = r#"{
        "kind": "create_incident",
        "title": "API errors",
        "description": "Elevated 5xx",
        "impact": "critical",
        "component_id": "api"
    }"#;
    let incident = match console.execute_json(raw).await.unwrap() {
        CommandOutcome::IncidentCreated { incident } => incident,
        other => panic!("unexpected outcome: {other:?}"),
    };
    assert_eq!(incident.status, IncidentStatus::Investigating);
    let page = engine.status_page().build(&incident.project_id).unwrap();
    assert_eq!(page.overall, ComponentStatus::Down);

    let update = OperatorCommand::AddIncidentUpdate {
        incident_id: incident.id.clone(),
        message: "Rolled back".into(),
        status: IncidentStatus::Resolved,
    };
    match console.execute(update).await.unwrap() {
        CommandOutcome::IncidentUpdated { incident, update } => {
            assert!(incident.resolved_at.is_some());
            assert_eq!(update.message, "Rolled back");
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
    let page = engine.status_page().build(&incident.project_id).unwrap();
    assert_eq!(page.overall, ComponentStatus::Operational);
}

#[tokio::test]
async fn set_component_status_command() {
    let engine = engine();
    engine
        .catalog
        .create_component(ComponentBuilder::new("API").id("api").spec())
        .unwrap();
    let outcome = engine
        .console()
        .execute_json(r#"{"kind":"set_component_status","component_id":"api","status":"maintenance"}"#)
        .await
        .unwrap();
    match outcome {
        CommandOutcome::ComponentUpdated { component } => {
            assert_eq!(component.status, ComponentStatus::Maintenance)
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
}

#[tokio::test]
async fn invalid_commands_are_rejected_before_applying() {
    let engine = engine();
    let console = engine.console();

    let err = console
        .execute_json(r#"{"kind":"create_incident","title":"  ","description":"x"}"#)
        .await
        .unwrap_err();
    match err {
        BeaconError::Command(CommandError::Invalid { field, .. }) => assert_eq!(field, "title"),
        other => panic!("unexpected error: {other}"),
    }

    let err = console.execute_json(r#"{"kind":"reboot_everything"}"#).await.unwrap_err();
    assert!(matches!(err, BeaconError::Command(_)));

    let err = console
        .execute(OperatorCommand::PauseMonitor {
            monitor_id: "missing".into(),
        })
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}
