//! Catalog loading, config layering, and a single tick over real HTTP.

use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use beacon_core::config::{BeaconConfig, CliOverrides};
use beacon_core::ids::{ComponentId, ProjectId};
use beacon_core::models::{CheckClassification, ComponentStatus, HttpMethod};
use beacon_core::traits::{IComponentStore, IMonitorStore};
use beacon_daemon::{CatalogFile, Daemon};
use beacon_scheduler::MonitorOutcome;
use test_fixtures::{fixture_path, ScriptedProbe};

#[test]
fn basic_catalog_parses() {
    let catalog = CatalogFile::load(&fixture_path("catalogs/basic.toml")).unwrap();
    assert_eq!(catalog.components.len(), 2);
    assert_eq!(catalog.monitors.len(), 2);
    assert_eq!(catalog.monitors[1].method, HttpMethod::Head);
    assert_eq!(catalog.monitors[1].expected_status, Some(vec![200, 301]));
    assert_eq!(catalog.monitors[0].component_id, Some(ComponentId::new("api")));
}

#[test]
fn catalog_with_unknown_component_is_rejected() {
    let catalog = CatalogFile::from_toml(
        r#"
[[monitors]]
url = "https://api.example.com"
interval_secs = 60
timeout_secs = 10
component_id = "missing"
"#,
    )
    .unwrap();
    let result = Daemon::with_probe(BeaconConfig::default(), &catalog, Arc::new(ScriptedProbe::new()));
    assert!(result.is_err());
}

#[test]
fn config_file_then_env_then_cli() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        "[scheduler]\ntick_interval_secs = 30\nmax_concurrent_checks = 4\n\n[observability]\nlog_level = \"warn\""
    )
    .unwrap();

    let mut config = BeaconConfig::from_file(file.path()).unwrap();
    config
        .apply_env_overrides(|key| (key == "BEACON_TICK_INTERVAL_SECS").then(|| "45".to_string()))
        .unwrap();
    config.apply_cli_overrides(&CliOverrides {
        max_concurrent_checks: Some(8),
        ..CliOverrides::default()
    });
    config.validate().unwrap();

    assert_eq!(config.scheduler.tick_interval_secs, 45);
    assert_eq!(config.scheduler.max_concurrent_checks, 8);
    assert_eq!(config.observability.log_level, "warn");
}

#[test]
fn missing_catalog_file_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.toml");
    let err = CatalogFile::load(&path).unwrap_err();
    assert!(format!("{err:#}").contains("absent.toml"));
}

#[tokio::test]
async fn single_tick_over_http() {
    let mut server = mockito::Server::new_async().await;
    let up = server.mock("GET", "/health").with_status(200).create_async().await;
    let down = server.mock("GET", "/broken").with_status(503).create_async().await;

    let catalog = CatalogFile::from_toml(&format!(
        r#"
[[components]]
id = "api"
name = "API"

[[monitors]]
url = "{base}/health"
interval_secs = 60
timeout_secs = 5
component_id = "api"

[[monitors]]
url = "{base}/broken"
interval_secs = 60
timeout_secs = 5
alert_after = 1
component_id = "api"
"#,
        base = server.url()
    ))
    .unwrap();

    let daemon = Daemon::build(BeaconConfig::default(), &catalog).unwrap();
    let report = daemon.run_once().await.unwrap();
    up.assert_async().await;
    down.assert_async().await;

    assert_eq!(report.checked, 2);
    let classifications: Vec<_> = report
        .results
        .iter()
        .map(|r| match &r.outcome {
            MonitorOutcome::Checked { classification, .. } => *classification,
            other => panic!("unexpected outcome {other:?}"),
        })
        .collect();
    assert!(classifications.contains(&CheckClassification::Up));
    assert!(classifications.contains(&CheckClassification::Down));

    let stores = &daemon.engine.stores;
    let api = stores.components.get_component(&ComponentId::new("api")).unwrap().unwrap();
    assert_eq!(api.status, ComponentStatus::Down);
    assert_eq!(stores.monitors.list_active_monitors().unwrap().len(), 2);

    let page = daemon.status_page_json().unwrap();
    let page: serde_json::Value = serde_json::from_str(&page).unwrap();
    assert_eq!(page["project_id"], ProjectId::default().as_str());
    assert_eq!(page["active_incidents"].as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn run_until_stops_on_cancel() {
    let catalog = CatalogFile::load(&fixture_path("catalogs/basic.toml")).unwrap();
    let daemon = Daemon::with_probe(BeaconConfig::default(), &catalog, Arc::new(ScriptedProbe::new())).unwrap();

    let shutdown = CancellationToken::new();
    let trigger = shutdown.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(100)).await;
        trigger.cancel();
    });

    let ticks = daemon.run_until(shutdown, false).await;
    assert_eq!(ticks, 1);
}
