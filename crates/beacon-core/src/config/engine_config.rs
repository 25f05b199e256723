use serde::{Deserialize, Serialize};

use crate::models::Impact;

use super::defaults;

/// How events from several monitors linked to one component combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentAggregation {
    /// Every degradation/recovery event overwrites the component status.
    LastEventWins,
    /// A recovery only restores the component when no other linked monitor is down.
    #[default]
    MostSevereWins,
}

/// Status transition and incident lifecycle configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Failure threshold for monitors created without one.
    pub default_alert_after: u32,
    /// Impact recorded on automatically opened incidents.
    pub auto_incident_impact: Impact,
    pub component_aggregation: ComponentAggregation,
    /// Clear the failure counter when a paused monitor is resumed.
    pub resume_resets_failures: bool,
    /// Non-blocking attempts on a contended component lock before waiting on it.
    pub lock_retry_attempts: u32,
    /// Initial backoff between lock attempts; doubles each retry.
    pub lock_retry_backoff_ms: u64,
    /// Resolved incidents younger than this are listed on the status page.
    pub recent_incident_days: i64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_alert_after: defaults::DEFAULT_ALERT_AFTER,
            auto_incident_impact: Impact::Major,
            component_aggregation: ComponentAggregation::default(),
            resume_resets_failures: defaults::DEFAULT_RESUME_RESETS_FAILURES,
            lock_retry_attempts: defaults::DEFAULT_LOCK_RETRY_ATTEMPTS,
            lock_retry_backoff_ms: defaults::DEFAULT_LOCK_RETRY_BACKOFF_MS,
            recent_incident_days: defaults::DEFAULT_RECENT_INCIDENT_DAYS,
        }
    }
}
