//! Central metrics registry.
//!
//! [`MetricsCollector`] owns the check, tick, and incident collectors.

pub mod check_metrics;
pub mod incident_metrics;
pub mod tick_metrics;

pub use check_metrics::CheckMetrics;
pub use incident_metrics::IncidentMetrics;
pub use tick_metrics::TickMetrics;

/// Central metrics registry that owns all domain-specific collectors.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct MetricsCollector {
    pub checks: CheckMetrics,
    pub ticks: TickMetrics,
    pub incidents: IncidentMetrics,
}

impl MetricsCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset all metrics (useful for testing or periodic rotation).
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
