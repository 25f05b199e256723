use std::collections::HashMap;
use std::io::Write;

use beacon_core::config::*;
use beacon_core::errors::ConfigError;
use beacon_core::models::Impact;

#[test]
fn config_loads_from_empty_toml_with_all_defaults() {
    let config = BeaconConfig::from_toml("").unwrap();

    // Scheduler defaults
    assert_eq!(config.scheduler.tick_interval_secs, 60);
    assert_eq!(config.scheduler.max_monitors_per_tick, 20);
    assert_eq!(config.scheduler.max_concurrent_checks, 8);

    // Probe defaults
    assert_eq!(config.probe.user_agent, "Beacon-Monitor/1.0");
    assert_eq!(config.probe.max_redirects, 5);

    // Engine defaults
    assert_eq!(config.engine.default_alert_after, 3);
    assert_eq!(config.engine.auto_incident_impact, Impact::Major);
    assert_eq!(
        config.engine.component_aggregation,
        ComponentAggregation::MostSevereWins
    );
    assert!(config.engine.resume_resets_failures);
    assert_eq!(config.engine.recent_incident_days, 7);

    // Observability defaults
    assert_eq!(config.observability.log_level, "info");
    assert!(config.observability.json_logs);
}

#[test]
fn config_loads_partial_toml_with_overrides() {
    let toml = r#"
[scheduler]
max_concurrent_checks = 2

[engine]
component_aggregation = "last_event_wins"
resume_resets_failures = false
"#;
    let config = BeaconConfig::from_toml(toml).unwrap();
    assert_eq!(config.scheduler.max_concurrent_checks, 2);
    // Non-overridden fields keep defaults
    assert_eq!(config.scheduler.max_monitors_per_tick, 20);
    assert_eq!(
        config.engine.component_aggregation,
        ComponentAggregation::LastEventWins
    );
    assert!(!config.engine.resume_resets_failures);
}

#[test]
fn config_rejects_malformed_toml() {
    let err = BeaconConfig::from_toml("[scheduler\nmax = ").unwrap_err();
    assert!(matches!(err, ConfigError::ParseError { .. }));
}

#[test]
fn validate_bounds_recent_incident_days() {
    let mut config = BeaconConfig::default();
    for days in [-1, 3651, i64::MAX] {
        config.engine.recent_incident_days = days;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("engine.recent_incident_days"), "{days}: {err}");
    }
    config.engine.recent_incident_days = 3650;
    assert!(config.validate().is_ok());
}

#[test]
fn validate_rejects_zero_concurrency() {
    let mut config = BeaconConfig::default();
    config.scheduler.max_concurrent_checks = 0;
    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("scheduler.max_concurrent_checks"));
}

#[test]
fn env_overrides_take_precedence_over_file() {
    let mut config = BeaconConfig::from_toml("[scheduler]\ntick_interval_secs = 30").unwrap();
    let env: HashMap<&str, &str> = [
        ("BEACON_TICK_INTERVAL_SECS", "15"),
        ("BEACON_LOG_LEVEL", "debug"),
        ("BEACON_JSON_LOGS", "false"),
    ]
    .into_iter()
    .collect();

    config
        .apply_env_overrides(|k| env.get(k).map(|v| v.to_string()))
        .unwrap();

    assert_eq!(config.scheduler.tick_interval_secs, 15);
    assert_eq!(config.observability.log_level, "debug");
    assert!(!config.observability.json_logs);
}

#[test]
fn env_override_with_garbage_is_rejected() {
    let mut config = BeaconConfig::default();
    let err = config
        .apply_env_overrides(|k| (k == "BEACON_MAX_CONCURRENT_CHECKS").then(|| "lots".to_string()))
        .unwrap_err();
    assert!(matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "BEACON_MAX_CONCURRENT_CHECKS"));
}

#[test]
fn cli_overrides_win() {
    let mut config = BeaconConfig::default();
    config.apply_cli_overrides(&CliOverrides {
        tick_interval_secs: Some(5),
        max_concurrent_checks: None,
        log_level: Some("warn".into()),
    });
    assert_eq!(config.scheduler.tick_interval_secs, 5);
    assert_eq!(config.scheduler.max_concurrent_checks, 8);
    assert_eq!(config.observability.log_level, "warn");
}

#[test]
fn from_file_reads_toml_and_reports_missing_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[probe]\nuser_agent = \"status-bot\"").unwrap();
    let config = BeaconConfig::from_file(file.path()).unwrap();
    assert_eq!(config.probe.user_agent, "status-bot");

    let err = BeaconConfig::from_file(std::path::Path::new("/nonexistent/beacon.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::FileNotFound { .. }));
}

#[test]
fn config_roundtrips_through_toml() {
    let config = BeaconConfig::default();
    let rendered = toml::to_string(&config).unwrap();
    assert_eq!(BeaconConfig::from_toml(&rendered).unwrap(), config);
}
