//! Probe outcome counts and response-time statistics.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CheckMetrics {
    pub total: u64,
    pub succeeded: u64,
    /// Failures with an unexpected HTTP status.
    pub failed_status: u64,
    /// Failures without any response (timeout, DNS, refused).
    pub failed_transport: u64,
    pub total_response_time_ms: u64,
    pub max_response_time_ms: u64,
}

impl CheckMetrics {
    pub fn record(&mut self, success: bool, http_status: Option<u16>, response_time_ms: u64) {
        self.total += 1;
        match (success, http_status) {
            (true, _) => self.succeeded += 1,
            (false, Some(_)) => self.failed_status += 1,
            (false, None) => self.failed_transport += 1,
        }
        self.total_response_time_ms += response_time_ms;
        self.max_response_time_ms = self.max_response_time_ms.max(response_time_ms);
    }

    pub fn success_rate(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.succeeded as f64 / self.total as f64
    }

    pub fn mean_response_time_ms(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.total_response_time_ms as f64 / self.total as f64
    }
}
