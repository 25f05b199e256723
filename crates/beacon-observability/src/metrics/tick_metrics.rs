use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Per-tick counters.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TickMetrics {
    pub ticks: u64,
    pub checked: u64,
    pub skipped: u64,
    pub failed: u64,
    pub last_tick_at: Option<DateTime<Utc>>,
    pub last_tick_duration_ms: u64,
    pub max_tick_duration_ms: u64,
}

impl TickMetrics {
    pub fn record(
        &mut self,
        at: DateTime<Utc>,
        checked: usize,
        skipped: usize,
        failed: usize,
        duration_ms: u64,
    ) {
        self.ticks += 1;
        self.checked += checked as u64;
        self.skipped += skipped as u64;
        self.failed += failed as u64;
        self.last_tick_at = Some(at);
        self.last_tick_duration_ms = duration_ms;
        self.max_tick_duration_ms = self.max_tick_duration_ms.max(duration_ms);
    }
}
