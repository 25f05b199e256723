use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::ProbeError;
use crate::ids::MonitorId;

use super::monitor::Monitor;

/// Append-only record of one probe. Immutable once written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResult {
    pub monitor_id: MonitorId,
    pub timestamp: DateTime<Utc>,
    /// `None` when the request never produced a response.
    pub http_status: Option<u16>,
    pub response_time_ms: u64,
    pub success: bool,
    pub error_message: Option<String>,
}

/// How a check is reported: the target answered as expected, answered with
/// an unexpected status, or never answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckClassification {
    Up,
    Down,
    Error,
}

impl CheckResult {
    /// Any HTTP response is a valid outcome; success means the status is expected.
    pub fn from_response(
        monitor: &Monitor,
        status: u16,
        response_time_ms: u64,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            monitor_id: monitor.id.clone(),
            timestamp,
            http_status: Some(status),
            response_time_ms,
            success: monitor.accepts_status(status),
            error_message: None,
        }
    }

    pub fn from_transport_error(
        monitor: &Monitor,
        error: &ProbeError,
        response_time_ms: u64,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            monitor_id: monitor.id.clone(),
            timestamp,
            http_status: None,
            response_time_ms,
            success: false,
            error_message: Some(error.to_string()),
        }
    }

    pub fn classification(&self) -> CheckClassification {
        match (self.success, self.http_status) {
            (true, _) => CheckClassification::Up,
            (false, Some(_)) => CheckClassification::Down,
            (false, None) => CheckClassification::Error,
        }
    }
}
