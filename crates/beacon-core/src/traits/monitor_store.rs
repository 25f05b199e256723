use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::errors::BeaconResult;
use crate::ids::{ComponentId, MonitorId};
use crate::models::{CheckResult, Monitor, MonitorRunState};

/// Monitor configuration, run state, and check history.
pub trait IMonitorStore: Send + Sync {
    // --- Configuration ---
    fn insert_monitor(&self, monitor: &Monitor) -> BeaconResult<()>;
    fn get_monitor(&self, id: &MonitorId) -> BeaconResult<Option<Monitor>>;
    /// Replace a monitor's configuration and state. Not-found if absent.
    fn save_monitor(&self, monitor: &Monitor) -> BeaconResult<()>;

    // --- Scheduling ---
    /// Every non-paused monitor, oldest first.
    fn list_active_monitors(&self) -> BeaconResult<Vec<Monitor>>;
    /// Non-paused monitors due for a check at `now`.
    fn list_due_monitors(&self, now: DateTime<Utc>) -> BeaconResult<Vec<Monitor>> {
        Ok(self
            .list_active_monitors()?
            .into_iter()
            .filter(|m| m.is_due(now))
            .collect())
    }
    fn monitors_for_component(&self, component_id: &ComponentId) -> BeaconResult<Vec<Monitor>>;

    // --- Run state ---
    fn update_monitor_state(&self, id: &MonitorId, state: &MonitorRunState) -> BeaconResult<()>;

    // --- History ---
    fn record_check(&self, result: &CheckResult) -> BeaconResult<()>;
    /// Checks at or after `since`, oldest first.
    fn list_checks(&self, monitor_id: &MonitorId, since: DateTime<Utc>) -> BeaconResult<Vec<CheckResult>>;
}

/// Blanket impl: `Arc<T>` implements `IMonitorStore` by delegating to the inner `T`.
impl<T: IMonitorStore> IMonitorStore for Arc<T> {
    fn insert_monitor(&self, monitor: &Monitor) -> BeaconResult<()> { (**self).insert_monitor(monitor) }
    fn get_monitor(&self, id: &MonitorId) -> BeaconResult<Option<Monitor>> { (**self).get_monitor(id) }
    fn save_monitor(&self, monitor: &Monitor) -> BeaconResult<()> { (**self).save_monitor(monitor) }
    fn list_active_monitors(&self) -> BeaconResult<Vec<Monitor>> { (**self).list_active_monitors() }
    fn list_due_monitors(&self, now: DateTime<Utc>) -> BeaconResult<Vec<Monitor>> { (**self).list_due_monitors(now) }
    fn monitors_for_component(&self, component_id: &ComponentId) -> BeaconResult<Vec<Monitor>> { (**self).monitors_for_component(component_id) }
    fn update_monitor_state(&self, id: &MonitorId, state: &MonitorRunState) -> BeaconResult<()> { (**self).update_monitor_state(id, state) }
    fn record_check(&self, result: &CheckResult) -> BeaconResult<()> { (**self).record_check(result) }
    fn list_checks(&self, monitor_id: &MonitorId, since: DateTime<Utc>) -> BeaconResult<Vec<CheckResult>> { (**self).list_checks(monitor_id, since) }
}
