// Single source of truth for all default values.

// --- Scheduler ---
pub const DEFAULT_TICK_INTERVAL_SECS: u64 = 60;
pub const DEFAULT_MAX_MONITORS_PER_TICK: usize = 20;
pub const DEFAULT_MAX_CONCURRENT_CHECKS: usize = 8;

// --- Probe ---
pub const DEFAULT_USER_AGENT: &str = "Beacon-Monitor/1.0";
pub const DEFAULT_MAX_REDIRECTS: usize = 5;

// --- Engine ---
pub const DEFAULT_ALERT_AFTER: u32 = 3;
pub const DEFAULT_RESUME_RESETS_FAILURES: bool = true;
pub const DEFAULT_LOCK_RETRY_ATTEMPTS: u32 = 5;
pub const DEFAULT_LOCK_RETRY_BACKOFF_MS: u64 = 10;
pub const DEFAULT_RECENT_INCIDENT_DAYS: i64 = 7;
pub const MAX_RECENT_INCIDENT_DAYS: i64 = 3650;

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_JSON_LOGS: bool = true;
