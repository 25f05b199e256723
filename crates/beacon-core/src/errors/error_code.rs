//! Stable error codes for callers outside the engine.

/// Every error enum implements this to expose a machine-readable code.
pub trait BeaconErrorCode {
    /// Returns the code string (e.g., "NOT_FOUND").
    fn error_code(&self) -> &'static str;

    /// Returns `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const NOT_FOUND: &str = "NOT_FOUND";
pub const TRANSPORT_ERROR: &str = "TRANSPORT_ERROR";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const STORE_ERROR: &str = "STORE_ERROR";
pub const ACTIVE_INCIDENT_EXISTS: &str = "ACTIVE_INCIDENT_EXISTS";
pub const INVALID_EMAIL: &str = "INVALID_EMAIL";
pub const ALREADY_SUBSCRIBED: &str = "ALREADY_SUBSCRIBED";
pub const INVALID_COMMAND: &str = "INVALID_COMMAND";
pub const CONCURRENCY_CONFLICT: &str = "CONCURRENCY_CONFLICT";
