//! Availability over a window, from the check history.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use beacon_core::errors::BeaconResult;
use beacon_core::ids::MonitorId;
use beacon_core::traits::IMonitorStore;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UptimeReport {
    pub monitor_id: MonitorId,
    pub since: DateTime<Utc>,
    pub total_checks: usize,
    pub successful_checks: usize,
    /// `None` when there are no checks in the window.
    pub uptime_percent: Option<f64>,
    pub mean_response_time_ms: Option<f64>,
}

pub struct UptimeCalculator {
    monitors: Arc<dyn IMonitorStore>,
}

impl UptimeCalculator {
    pub fn new(monitors: Arc<dyn IMonitorStore>) -> Self {
        Self { monitors }
    }

    pub fn over_last(&self, monitor_id: &MonitorId, window: Duration) -> BeaconResult<UptimeReport> {
        self.since(monitor_id, Utc::now() - window)
    }

    pub fn since(&self, monitor_id: &MonitorId, since: DateTime<Utc>) -> BeaconResult<UptimeReport> {
        let checks = self.monitors.list_checks(monitor_id, since)?;
        let total_checks = checks.len();
        let successful_checks = checks.iter().filter(|c| c.success).count();
        let (uptime_percent, mean_response_time_ms) = if total_checks == 0 {
            (None, None)
        } else {
            let total_ms: u64 = checks.iter().map(|c| c.response_time_ms).sum();
            (
                Some(successful_checks as f64 * 100.0 / total_checks as f64),
                Some(total_ms as f64 / total_checks as f64),
            )
        };
        Ok(UptimeReport {
            monitor_id: monitor_id.clone(),
            since,
            total_checks,
            successful_checks,
            uptime_percent,
            mean_response_time_ms,
        })
    }
}
