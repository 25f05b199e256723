use super::error_code::{self, BeaconErrorCode};

/// Contention on a keyed critical section (component incidents, monitor state).
/// Retried internally with backoff; only surfaces from the raw lock API.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LockError {
    #[error("{scope} {key} lock contended after {attempts} attempts")]
    Contended {
        scope: String,
        key: String,
        attempts: u32,
    },
}

impl BeaconErrorCode for LockError {
    fn error_code(&self) -> &'static str {
        error_code::CONCURRENCY_CONFLICT
    }
}
