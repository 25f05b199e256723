//! Probe once, append the result to history.

use std::sync::Arc;

use beacon_core::errors::BeaconResult;
use beacon_core::models::{CheckResult, Monitor};
use beacon_core::traits::{IMonitorStore, IProbe};
use beacon_observability::tracing_setup::events;

/// Runs a probe and persists its `CheckResult`.
///
/// Lifecycle decisions are not made here; the caller folds the result into
/// the monitor's run state.
pub struct CheckExecutor {
    probe: Arc<dyn IProbe>,
    monitors: Arc<dyn IMonitorStore>,
}

impl CheckExecutor {
    pub fn new(probe: Arc<dyn IProbe>, monitors: Arc<dyn IMonitorStore>) -> Self {
        Self { probe, monitors }
    }

    pub async fn execute(&self, monitor: &Monitor) -> BeaconResult<CheckResult> {
        let result = self.probe.probe(monitor).await;
        events::monitor_checked(&result);
        self.monitors.record_check(&result)?;
        Ok(result)
    }
}
