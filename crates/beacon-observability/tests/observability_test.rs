use chrono::Utc;

use beacon_observability::metrics::{CheckMetrics, MetricsCollector};
use beacon_observability::tracing_setup::spans::names;

#[test]
fn check_metrics_split_failures_by_kind() {
    let mut m = CheckMetrics::default();
    m.record(true, Some(200), 40);
    m.record(false, Some(503), 60);
    m.record(false, None, 5000);

    assert_eq!(m.total, 3);
    assert_eq!(m.succeeded, 1);
    assert_eq!(m.failed_status, 1);
    assert_eq!(m.failed_transport, 1);
    assert_eq!(m.max_response_time_ms, 5000);
    assert!((m.success_rate() - 1.0 / 3.0).abs() < 1e-9);
    assert!((m.mean_response_time_ms() - 1700.0).abs() < 1e-9);
}

#[test]
fn empty_check_metrics_report_zero_rates() {
    let m = CheckMetrics::default();
    assert_eq!(m.success_rate(), 0.0);
    assert_eq!(m.mean_response_time_ms(), 0.0);
}

#[test]
fn tick_metrics_accumulate_and_track_max_duration() {
    let mut collector = MetricsCollector::new();
    let now = Utc::now();
    collector.ticks.record(now, 3, 2, 0, 120);
    collector.ticks.record(now, 1, 4, 1, 80);

    assert_eq!(collector.ticks.ticks, 2);
    assert_eq!(collector.ticks.checked, 4);
    assert_eq!(collector.ticks.skipped, 6);
    assert_eq!(collector.ticks.failed, 1);
    assert_eq!(collector.ticks.last_tick_duration_ms, 80);
    assert_eq!(collector.ticks.max_tick_duration_ms, 120);

    collector.reset();
    assert_eq!(collector.ticks.ticks, 0);
}

#[test]
fn metrics_collector_serializes() {
    let mut collector = MetricsCollector::new();
    collector.incidents.record_opened();
    let json = serde_json::to_value(&collector).unwrap();
    assert_eq!(json["incidents"]["opened"], 1);
    assert_eq!(json["checks"]["total"], 0);
}

#[test]
fn span_macros_use_named_spans() {
    let span = beacon_observability::tick_span!(4);
    // Without a subscriber spans are disabled, but the metadata name is still set.
    if let Some(meta) = span.metadata() {
        assert_eq!(meta.name(), names::TICK);
    }
}
