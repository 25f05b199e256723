//! Applies a finished check to its monitor.
//!
//! The monitor's run state is committed under the monitor lock before any
//! signal reaches the incident manager. Incident failures are reported on the
//! result and never roll the state back.

use std::sync::Arc;

use beacon_core::errors::{BeaconResult, EntityKind};
use beacon_core::ids::MonitorId;
use beacon_core::models::{CheckResult, IncidentEvent, MonitorRunState, MonitorSignal, StatusEvent};
use beacon_core::traits::IMonitorStore;
use beacon_core::BeaconError;
use beacon_observability::tracing_setup::events;

use crate::engine::SharedMetrics;
use crate::incidents::IncidentManager;
use crate::locks::KeyedLocks;
use crate::transition::evaluate;

/// What a check did to its monitor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedCheck {
    pub state: MonitorRunState,
    pub signal: Option<MonitorSignal>,
    pub incident: Option<IncidentEvent>,
    pub incident_error: Option<String>,
}

pub struct StatusEvaluator {
    monitors: Arc<dyn IMonitorStore>,
    incidents: Arc<IncidentManager>,
    monitor_locks: Arc<KeyedLocks<MonitorId>>,
    metrics: SharedMetrics,
}

impl StatusEvaluator {
    pub fn new(
        monitors: Arc<dyn IMonitorStore>,
        incidents: Arc<IncidentManager>,
        monitor_locks: Arc<KeyedLocks<MonitorId>>,
        metrics: SharedMetrics,
    ) -> Self {
        Self {
            monitors,
            incidents,
            monitor_locks,
            metrics,
        }
    }

    /// Fold `result` into the stored monitor and handle any signal.
    ///
    /// The stored state is re-read under the lock, so an operator pause that
    /// landed while the probe was in flight is respected.
    pub async fn apply(&self, result: &CheckResult) -> BeaconResult<AppliedCheck> {
        let monitor_id = &result.monitor_id;
        let (monitor, transition) = {
            let _guard = self.monitor_locks.acquire(monitor_id).await;
            let monitor = self
                .monitors
                .get_monitor(monitor_id)?
                .ok_or_else(|| BeaconError::not_found(EntityKind::Monitor, monitor_id))?;
            let transition = evaluate(&monitor.state, monitor.alert_after, result);
            self.monitors.update_monitor_state(monitor_id, &transition.state)?;
            (monitor, transition)
        };

        let mut applied = AppliedCheck {
            state: transition.state,
            signal: transition.signal,
            incident: None,
            incident_error: None,
        };
        let Some(signal) = transition.signal else {
            return Ok(applied);
        };

        let event = StatusEvent {
            monitor_id: monitor_id.clone(),
            component_id: monitor.component_id.clone(),
            signal,
            target: monitor.url.clone(),
            at: result.timestamp,
        };
        match signal {
            MonitorSignal::Degradation => {
                events::monitor_degraded(&event, applied.state.consecutive_failures);
                if let Ok(mut m) = self.metrics.lock() {
                    m.incidents.record_degradation();
                }
            }
            MonitorSignal::Recovery => {
                events::monitor_recovered(&event);
                if let Ok(mut m) = self.metrics.lock() {
                    m.incidents.record_recovery();
                }
            }
        }

        match self.incidents.on_signal(&event).await {
            Ok(incident) => applied.incident = incident,
            Err(e) => {
                tracing::warn!(
                    monitor_id = %monitor_id,
                    component_id = ?event.component_id,
                    error = %e,
                    "incident handling failed; monitor state kept"
                );
                applied.incident_error = Some(e.to_string());
            }
        }
        Ok(applied)
    }
}
