//! Structured log events for key engine operations.
//!
//! Each function emits a `tracing` event with structured fields.

use beacon_core::models::{CheckResult, Incident, StatusEvent};

/// Log a completed check.
pub fn monitor_checked(result: &CheckResult) {
    tracing::debug!(
        event = "monitor_checked",
        monitor_id = %result.monitor_id,
        success = result.success,
        http_status = ?result.http_status,
        response_time_ms = result.response_time_ms,
        error = ?result.error_message,
        "monitor checked"
    );
}

/// Log a monitor crossing its failure threshold.
pub fn monitor_degraded(event: &StatusEvent, consecutive_failures: u32) {
    tracing::warn!(
        event = "monitor_degraded",
        monitor_id = %event.monitor_id,
        component_id = ?event.component_id,
        target = %event.target,
        consecutive_failures = consecutive_failures,
        "monitor degraded"
    );
}

/// Log a monitor recovering after being down.
pub fn monitor_recovered(event: &StatusEvent) {
    tracing::info!(
        event = "monitor_recovered",
        monitor_id = %event.monitor_id,
        component_id = ?event.component_id,
        target = %event.target,
        "monitor recovered"
    );
}

pub fn incident_opened(incident: &Incident) {
    tracing::warn!(
        event = "incident_opened",
        incident_id = %incident.id,
        component_id = ?incident.component_id,
        impact = ?incident.impact,
        title = %incident.title,
        "incident opened"
    );
}

pub fn incident_updated(incident: &Incident) {
    tracing::info!(
        event = "incident_updated",
        incident_id = %incident.id,
        status = ?incident.status,
        "incident updated"
    );
}

pub fn incident_resolved(incident: &Incident) {
    tracing::info!(
        event = "incident_resolved",
        incident_id = %incident.id,
        component_id = ?incident.component_id,
        "incident resolved"
    );
}

/// Log a notifier that failed or panicked. Never fatal.
pub fn notification_failed(notifier: &str, event_kind: &str, reason: &str) {
    tracing::warn!(
        event = "notification_failed",
        notifier = %notifier,
        event_kind = %event_kind,
        reason = %reason,
        "notification failed"
    );
}

/// Log contention on a keyed lock. `scope` is `component` or `monitor`.
pub fn lock_contended(scope: &str, key: &str, attempt: u32) {
    tracing::debug!(
        event = "lock_contended",
        scope = %scope,
        key = %key,
        attempt = attempt,
        "lock contended"
    );
}

pub fn tick_completed(checked: usize, skipped: usize, failed: usize, duration_ms: u64) {
    tracing::info!(
        event = "tick_completed",
        checked = checked,
        skipped = skipped,
        failed = failed,
        duration_ms = duration_ms,
        "scheduler tick completed"
    );
}
