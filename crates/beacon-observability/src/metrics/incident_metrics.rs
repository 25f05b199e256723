use serde::{Deserialize, Serialize};

/// Incident lifecycle and notification counters.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IncidentMetrics {
    pub degradations: u64,
    pub recoveries: u64,
    pub opened: u64,
    pub resolved: u64,
    pub notification_failures: u64,
    pub lock_contentions: u64,
}

impl IncidentMetrics {
    pub fn record_degradation(&mut self) {
        self.degradations += 1;
    }

    pub fn record_recovery(&mut self) {
        self.recoveries += 1;
    }

    pub fn record_opened(&mut self) {
        self.opened += 1;
    }

    pub fn record_resolved(&mut self) {
        self.resolved += 1;
    }

    pub fn record_notification_failure(&mut self) {
        self.notification_failures += 1;
    }

    pub fn record_lock_contention(&mut self) {
        self.lock_contentions += 1;
    }
}
