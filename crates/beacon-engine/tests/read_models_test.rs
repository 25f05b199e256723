//! Status page and uptime.

use std::sync::Arc;

use chrono::{Duration, Utc};

use beacon_core::config::EngineConfig;
use beacon_core::ids::ProjectId;
use beacon_core::models::{CheckResult, ComponentStatus, Impact, IncidentStatus, NewIncident};
use beacon_core::traits::{IComponentStore, IIncidentStore, IMonitorStore};
use beacon_engine::{BeaconEngine, NotificationDispatcher, StatusPageBuilder, Stores};
use beacon_storage::MemoryStore;
use test_fixtures::{ComponentBuilder, MonitorBuilder};

fn engine() -> (Arc<MemoryStore>, BeaconEngine) {
    let store = Arc::new(MemoryStore::new());
    let engine = BeaconEngine::new(
        Stores::shared(store.clone()),
        EngineConfig::default(),
        NotificationDispatcher::new(),
    );
    (store, engine)
}

#[test]
fn overall_status_is_most_severe() {
    let (store, engine) = engine();
    let project = ProjectId::default();

    let page = engine.status_page().build(&project).unwrap();
    assert_eq!(page.overall, ComponentStatus::Operational);
    assert!(page.components.is_empty());

    for (id, status) in [
        ("api", ComponentStatus::Operational),
        ("web", ComponentStatus::Maintenance),
    ] {
        store
            .insert_component(&ComponentBuilder::new(id).id(id).status(status).build())
            .unwrap();
    }
    assert_eq!(
        engine.status_page().build(&project).unwrap().overall,
        ComponentStatus::Maintenance
    );

    store.set_status(&"api".into(), ComponentStatus::Degraded).unwrap();
    assert_eq!(
        engine.status_page().build(&project).unwrap().overall,
        ComponentStatus::Degraded
    );

    store.set_status(&"web".into(), ComponentStatus::Down).unwrap();
    assert_eq!(engine.status_page().build(&project).unwrap().overall, ComponentStatus::Down);
}

fn incident_at(store: &MemoryStore, title: &str, started_days_ago: i64, resolved_days_ago: Option<i64>) {
    let now = Utc::now();
    let new = NewIncident {
        project_id: ProjectId::default(),
        title: title.into(),
        description: "details".into(),
        status: IncidentStatus::Investigating,
        impact: Impact::Minor,
        component_id: None,
    };
    let (mut incident, seed) = new.into_incident(now - Duration::days(started_days_ago));
    if let Some(days) = resolved_days_ago {
        incident.apply_status(IncidentStatus::Resolved, now - Duration::days(days));
    }
    store.create_incident(&incident, &seed).unwrap();
}

#[test]
fn incidents_split_into_active_and_recent() {
    let (store, engine) = engine();
    incident_at(&store, "ongoing", 1, None);
    incident_at(&store, "yesterday", 3, Some(1));
    incident_at(&store, "last week", 6, Some(5));
    incident_at(&store, "long ago", 30, Some(20));

    let page = engine.status_page().build(&ProjectId::default()).unwrap();
    let active: Vec<&str> = page.active_incidents.iter().map(|i| i.incident.title.as_str()).collect();
    let recent: Vec<&str> = page.recent_incidents.iter().map(|i| i.incident.title.as_str()).collect();
    assert_eq!(active, ["ongoing"]);
    assert_eq!(recent, ["yesterday", "last week"]);
}

#[test]
fn unbounded_recent_window_keeps_every_resolved_incident() {
    let (store, _) = engine();
    incident_at(&store, "ongoing", 1, None);
    incident_at(&store, "long ago", 3000, Some(2900));

    for days in [i64::MAX, i64::MAX / 86_400, 200_000_000] {
        let page = StatusPageBuilder::new(Stores::shared(store.clone()), days)
            .build(&ProjectId::default())
            .unwrap();
        assert_eq!(page.active_incidents.len(), 1);
        let recent: Vec<&str> = page.recent_incidents.iter().map(|i| i.incident.title.as_str()).collect();
        assert_eq!(recent, ["long ago"], "{days}");
    }
}

#[tokio::test]
async fn timeline_is_newest_first() {
    let (_, engine) = engine();
    let new = NewIncident {
        project_id: ProjectId::default(),
        title: "Slow checkout".into(),
        description: "Investigating latency".into(),
        status: IncidentStatus::Investigating,
        impact: Impact::Minor,
        component_id: None,
    };
    let incident = engine.incidents.create_incident(new).await.unwrap();
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    engine
        .incidents
        .add_update(&incident.id, "Cause identified", IncidentStatus::Identified)
        .await
        .unwrap();

    let page = engine.status_page().build(&ProjectId::default()).unwrap();
    let messages: Vec<&str> = page.active_incidents[0]
        .updates
        .iter()
        .map(|u| u.message.as_str())
        .collect();
    assert_eq!(messages, ["Cause identified", "Investigating latency"]);

    let json = serde_json::to_value(&page).unwrap();
    assert_eq!(json["active_incidents"][0]["title"], "Slow checkout");
    assert_eq!(json["overall"], "operational");
}

#[test]
fn uptime_from_history() {
    let (store, engine) = engine();
    let monitor = MonitorBuilder::new("https://example.com").build();
    store.insert_monitor(&monitor).unwrap();

    let empty = engine.uptime().over_last(&monitor.id, Duration::days(1)).unwrap();
    assert_eq!(empty.total_checks, 0);
    assert_eq!(empty.uptime_percent, None);

    let now = Utc::now();
    let history = [(200, 100), (200, 200), (500, 300), (204, 400)];
    for (i, (status, ms)) in history.into_iter().enumerate() {
        let at = now - Duration::minutes(10 - i as i64);
        store
            .record_check(&CheckResult::from_response(&monitor, status, ms, at))
            .unwrap();
    }
    let old = CheckResult::from_response(&monitor, 500, 9_000, now - Duration::days(3));
    store.record_check(&old).unwrap();

    let report = engine.uptime().over_last(&monitor.id, Duration::days(1)).unwrap();
    assert_eq!(report.total_checks, 4);
    assert_eq!(report.successful_checks, 3);
    assert_eq!(report.uptime_percent, Some(75.0));
    assert_eq!(report.mean_response_time_ms, Some(250.0));
}
