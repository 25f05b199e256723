//! Components, monitors, pause/resume.

use std::sync::Arc;

use chrono::Utc;

use beacon_core::config::EngineConfig;
use beacon_core::errors::{BeaconError, ConfigError};
use beacon_core::ids::{ComponentId, MonitorId, ProjectId};
use beacon_core::models::{
    CheckResult, ComponentPatch, ComponentStatus, LifecycleState, MonitorPatch, MonitorSpec,
};
use beacon_core::traits::IMonitorStore;
use beacon_engine::{BeaconEngine, NotificationDispatcher, Stores};
use beacon_storage::MemoryStore;
use test_fixtures::{ComponentBuilder, MonitorBuilder};

fn engine(config: EngineConfig) -> (Arc<MemoryStore>, BeaconEngine) {
    let store = Arc::new(MemoryStore::new());
    let engine = BeaconEngine::new(Stores::shared(store.clone()), config, NotificationDispatcher::new());
    (store, engine)
}

#[test]
fn components_append_in_order() {
    let (_, engine) = engine(EngineConfig::default());
    let api = engine.catalog.create_component(ComponentBuilder::new("API").spec()).unwrap();
    let web = engine.catalog.create_component(ComponentBuilder::new("Web").spec()).unwrap();
    let db = engine.catalog.create_component(ComponentBuilder::new("DB").spec()).unwrap();
    assert_eq!((api.order, web.order, db.order), (0, 1, 2));
    assert_eq!(api.status, ComponentStatus::Operational);
}

#[test]
fn blank_component_name_is_rejected() {
    let (_, engine) = engine(EngineConfig::default());
    let err = engine
        .catalog
        .create_component(ComponentBuilder::new("   ").spec())
        .unwrap_err();
    assert!(matches!(err, BeaconError::Config(ConfigError::InvalidValue { .. })));
}

#[test]
fn reorder_puts_listed_first() {
    let (_, engine) = engine(EngineConfig::default());
    for id in ["api", "web", "db", "cdn"] {
        engine
            .catalog
            .create_component(ComponentBuilder::new(id).id(id).spec())
            .unwrap();
    }

    let ordered = engine
        .catalog
        .reorder_components(&ProjectId::default(), &["db".into(), "api".into()])
        .unwrap();
    let ids: Vec<&str> = ordered.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, ["db", "api", "web", "cdn"]);
    assert_eq!(ordered.iter().map(|c| c.order).collect::<Vec<_>>(), [0, 1, 2, 3]);

    let err = engine
        .catalog
        .reorder_components(&ProjectId::default(), &["nope".into()])
        .unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn component_manual_status_edit() {
    let (_, engine) = engine(EngineConfig::default());
    let api = engine
        .catalog
        .create_component(ComponentBuilder::new("API").id("api").spec())
        .unwrap();
    let patch = ComponentPatch {
        status: Some(ComponentStatus::Maintenance),
        description: Some("Planned upgrade".into()),
        ..Default::default()
    };
    let updated = engine.catalog.update_component(&api.id, patch).unwrap();
    assert_eq!(updated.status, ComponentStatus::Maintenance);
    assert_eq!(updated.description.as_deref(), Some("Planned upgrade"));
    assert_eq!(updated.name, "API");

    let err = engine
        .catalog
        .update_component(&ComponentId::from("ghost"), ComponentPatch::default())
        .unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn monitor_defaults_come_from_config() {
    let config = EngineConfig {
        default_alert_after: 5,
        ..Default::default()
    };
    let (_, engine) = engine(config);
    let monitor = engine
        .catalog
        .create_monitor(MonitorSpec::new("https://example.com", 60, 10))
        .unwrap();
    assert_eq!(monitor.alert_after, 5);
    assert_eq!(monitor.expected_status, vec![200, 201, 204]);
    assert_eq!(monitor.state.lifecycle, LifecycleState::Unknown);
}

#[test]
fn invalid_monitors_are_rejected_at_creation() {
    let (_, engine) = engine(EngineConfig::default());
    let cases = [
        MonitorSpec::new("ftp://example.com", 60, 10),
        MonitorSpec::new("not a url", 60, 10),
        MonitorSpec::new("https://example.com", 0, 10),
        MonitorSpec::new("https://example.com", 60, 0),
        MonitorSpec::new("https://example.com", 10, 30),
        MonitorSpec::new("https://example.com", 9_000_000_000_000_000, 1),
        MonitorSpec::new("https://example.com", u64::MAX, 1),
        MonitorSpec {
            expected_status: Some(vec![]),
            ..MonitorSpec::new("https://example.com", 60, 10)
        },
        MonitorSpec {
            expected_status: Some(vec![200, 700]),
            ..MonitorSpec::new("https://example.com", 60, 10)
        },
        MonitorSpec {
            alert_after: Some(0),
            ..MonitorSpec::new("https://example.com", 60, 10)
        },
    ];
    for spec in cases {
        let url = spec.url.clone();
        let err = engine.catalog.create_monitor(spec).unwrap_err();
        assert!(matches!(err, BeaconError::Config(_)), "{url}: {err}");
    }
}

#[test]
fn monitor_for_unknown_component_is_not_found() {
    let (_, engine) = engine(EngineConfig::default());
    let spec = MonitorBuilder::new("https://example.com")
        .component(&ComponentId::from("ghost"))
        .spec();
    assert!(engine.catalog.create_monitor(spec).unwrap_err().is_not_found());
}

#[tokio::test]
async fn update_monitor_validates_and_keeps_state() {
    let (store, engine) = engine(EngineConfig::default());
    let monitor = engine
        .catalog
        .create_monitor(MonitorSpec::new("https://example.com", 60, 10))
        .unwrap();
    let result = CheckResult::from_response(&monitor, 500, 3, Utc::now());
    engine.evaluator.apply(&result).await.unwrap();

    let patch = MonitorPatch {
        interval_secs: Some(300),
        ..Default::default()
    };
    let updated = engine.catalog.update_monitor(&monitor.id, patch).await.unwrap();
    assert_eq!(updated.interval_secs, 300);
    assert_eq!(updated.state.consecutive_failures, 1);
    assert_eq!(store.get_monitor(&monitor.id).unwrap().unwrap(), updated);

    let bad = MonitorPatch {
        timeout_secs: Some(900),
        ..Default::default()
    };
    assert!(engine.catalog.update_monitor(&monitor.id, bad).await.is_err());
    let huge = MonitorPatch {
        interval_secs: Some(u64::MAX),
        ..Default::default()
    };
    assert!(matches!(
        engine.catalog.update_monitor(&monitor.id, huge).await,
        Err(BeaconError::Config(_))
    ));
    assert_eq!(store.get_monitor(&monitor.id).unwrap().unwrap().interval_secs, 300);
    assert!(engine
        .catalog
        .update_monitor(&MonitorId::from("missing"), MonitorPatch::default())
        .await
        .unwrap_err()
        .is_not_found());
}

#[tokio::test]
async fn pause_excludes_from_due_and_resume_resets() {
    let (store, engine) = engine(EngineConfig::default());
    let monitor = engine
        .catalog
        .create_monitor(MonitorSpec::new("https://example.com", 60, 10))
        .unwrap();
    for _ in 0..2 {
        let result = CheckResult::from_response(&monitor, 500, 3, Utc::now());
        engine.evaluator.apply(&result).await.unwrap();
    }

    let paused = engine.catalog.pause_monitor(&monitor.id).await.unwrap();
    assert!(paused.is_paused());
    assert!(store.list_due_monitors(Utc::now() + chrono::Duration::hours(1)).unwrap().is_empty());

    let resumed = engine.catalog.resume_monitor(&monitor.id).await.unwrap();
    assert_eq!(resumed.state.lifecycle, LifecycleState::Unknown);
    assert_eq!(resumed.state.consecutive_failures, 0);
    assert_eq!(
        store.list_due_monitors(Utc::now() + chrono::Duration::hours(1)).unwrap().len(),
        1
    );
}

#[tokio::test]
async fn resume_can_keep_failure_count() {
    let config = EngineConfig {
        resume_resets_failures: false,
        ..Default::default()
    };
    let (_, engine) = engine(config);
    let monitor = engine
        .catalog
        .create_monitor(MonitorSpec::new("https://example.com", 60, 10))
        .unwrap();
    let result = CheckResult::from_response(&monitor, 500, 3, Utc::now());
    engine.evaluator.apply(&result).await.unwrap();

    engine.catalog.pause_monitor(&monitor.id).await.unwrap();
    let resumed = engine.catalog.resume_monitor(&monitor.id).await.unwrap();
    assert_eq!(resumed.state.lifecycle, LifecycleState::Unknown);
    assert_eq!(resumed.state.consecutive_failures, 1);
}

#[tokio::test]
async fn resume_of_running_monitor_is_a_no_op() {
    let (_, engine) = engine(EngineConfig::default());
    let monitor = engine
        .catalog
        .create_monitor(MonitorSpec::new("https://example.com", 60, 10))
        .unwrap();
    let result = CheckResult::from_response(&monitor, 200, 3, Utc::now());
    engine.evaluator.apply(&result).await.unwrap();

    let resumed = engine.catalog.resume_monitor(&monitor.id).await.unwrap();
    assert_eq!(resumed.state.lifecycle, LifecycleState::Up);
}
