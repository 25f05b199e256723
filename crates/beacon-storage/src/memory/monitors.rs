use chrono::{DateTime, Utc};

use beacon_core::errors::{BeaconResult, EntityKind, StoreError};
use beacon_core::ids::{ComponentId, MonitorId};
use beacon_core::models::{CheckResult, Monitor, MonitorRunState};
use beacon_core::traits::IMonitorStore;
use beacon_core::BeaconError;

use super::MemoryStore;

impl IMonitorStore for MemoryStore {
    fn insert_monitor(&self, monitor: &Monitor) -> BeaconResult<()> {
        if self.monitors.contains_key(&monitor.id) {
            return Err(StoreError::Duplicate {
                entity: EntityKind::Monitor.to_string(),
                id: monitor.id.to_string(),
            }
            .into());
        }
        self.monitors.insert(monitor.id.clone(), monitor.clone());
        Ok(())
    }

    fn get_monitor(&self, id: &MonitorId) -> BeaconResult<Option<Monitor>> {
        Ok(self.monitors.get(id).map(|m| m.clone()))
    }

    fn save_monitor(&self, monitor: &Monitor) -> BeaconResult<()> {
        match self.monitors.get_mut(&monitor.id) {
            Some(mut entry) => {
                *entry = monitor.clone();
                Ok(())
            }
            None => Err(BeaconError::not_found(EntityKind::Monitor, &monitor.id)),
        }
    }

    fn list_active_monitors(&self) -> BeaconResult<Vec<Monitor>> {
        let mut active: Vec<Monitor> = self
            .monitors
            .iter()
            .filter(|m| !m.is_paused())
            .map(|m| m.clone())
            .collect();
        active.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(active)
    }

    fn monitors_for_component(&self, component_id: &ComponentId) -> BeaconResult<Vec<Monitor>> {
        let mut linked: Vec<Monitor> = self
            .monitors
            .iter()
            .filter(|m| m.component_id.as_ref() == Some(component_id))
            .map(|m| m.clone())
            .collect();
        linked.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(linked)
    }

    fn update_monitor_state(&self, id: &MonitorId, state: &MonitorRunState) -> BeaconResult<()> {
        let mut entry = self
            .monitors
            .get_mut(id)
            .ok_or_else(|| BeaconError::not_found(EntityKind::Monitor, id))?;
        entry.state = state.clone();
        tracing::trace!(monitor_id = %id, lifecycle = ?state.lifecycle, "monitor state written");
        Ok(())
    }

    fn record_check(&self, result: &CheckResult) -> BeaconResult<()> {
        if !self.monitors.contains_key(&result.monitor_id) {
            return Err(BeaconError::not_found(EntityKind::Monitor, &result.monitor_id));
        }
        self.checks
            .entry(result.monitor_id.clone())
            .or_default()
            .push(result.clone());
        Ok(())
    }

    fn list_checks(&self, monitor_id: &MonitorId, since: DateTime<Utc>) -> BeaconResult<Vec<CheckResult>> {
        let mut checks: Vec<CheckResult> = self
            .checks
            .get(monitor_id)
            .map(|history| {
                history
                    .iter()
                    .filter(|c| c.timestamp >= since)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        checks.sort_by_key(|c| c.timestamp);
        Ok(checks)
    }
}
