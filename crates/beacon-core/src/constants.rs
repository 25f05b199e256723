/// Beacon version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Status codes a new monitor accepts when none are given.
pub const DEFAULT_EXPECTED_STATUS: [u16; 3] = [200, 201, 204];

/// Longest check interval a monitor may use (30 days).
pub const MAX_INTERVAL_SECS: u64 = 30 * 24 * 60 * 60;

/// Lowest and highest HTTP status codes a monitor may expect.
pub const MIN_HTTP_STATUS: u16 = 100;
pub const MAX_HTTP_STATUS: u16 = 599;

/// Timeline message seeded on an automatically opened incident.
pub fn degradation_message(url: &str) -> String {
    format!("Monitor detected that {url} is not responding correctly.")
}

/// Title of an automatically opened incident.
pub fn degradation_title(subject: &str) -> String {
    format!("{subject} is down")
}

/// Timeline message appended when a monitor recovery resolves an incident.
pub const RECOVERY_MESSAGE: &str = "Service has been restored and is operating normally.";

/// Length of a subscriber verification token.
pub const VERIFY_TOKEN_LEN: usize = 32;
