use serde::{Deserialize, Serialize};

use super::defaults;

/// Scheduling tick configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Seconds between ticks when run by the periodic driver.
    pub tick_interval_secs: u64,
    /// Upper bound on monitors checked in a single tick.
    pub max_monitors_per_tick: usize,
    /// Upper bound on checks in flight at once.
    pub max_concurrent_checks: usize,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            tick_interval_secs: defaults::DEFAULT_TICK_INTERVAL_SECS,
            max_monitors_per_tick: defaults::DEFAULT_MAX_MONITORS_PER_TICK,
            max_concurrent_checks: defaults::DEFAULT_MAX_CONCURRENT_CHECKS,
        }
    }
}
