use super::error_code::{self, BeaconErrorCode};

/// Transport-level failures while probing a monitor target.
/// Always folded into a failed `CheckResult`, never surfaced as an engine fault.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProbeError {
    #[error("request timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("connection failed: {reason}")]
    Connect { reason: String },

    #[error("request failed: {reason}")]
    Request { reason: String },
}

impl BeaconErrorCode for ProbeError {
    fn error_code(&self) -> &'static str {
        error_code::TRANSPORT_ERROR
    }
}
