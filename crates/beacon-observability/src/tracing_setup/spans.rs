//! Span definitions per operation: tick, check, incident critical section.

/// Create a scheduler tick span.
#[macro_export]
macro_rules! tick_span {
    ($candidates:expr) => {
        tracing::info_span!("beacon.tick", candidates = $candidates)
    };
}

/// Create a span around one monitor check.
#[macro_export]
macro_rules! check_span {
    ($monitor_id:expr, $url:expr) => {
        tracing::info_span!("beacon.check", monitor_id = %$monitor_id, url = %$url)
    };
}

/// Create a span around a component's incident critical section.
#[macro_export]
macro_rules! incident_span {
    ($component_id:expr, $signal:expr) => {
        tracing::info_span!("beacon.incident", component_id = %$component_id, signal = ?$signal)
    };
}

/// Span names as constants for programmatic use.
pub mod names {
    pub const TICK: &str = "beacon.tick";
    pub const CHECK: &str = "beacon.check";
    pub const INCIDENT: &str = "beacon.incident";
}
