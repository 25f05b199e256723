use super::error_code::{self, BeaconErrorCode};

/// Failures reported by a store backend.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("store unavailable: {reason}")]
    Unavailable { reason: String },

    #[error("duplicate {entity}: {id}")]
    Duplicate { entity: String, id: String },

    #[error("write rejected: {reason}")]
    WriteRejected { reason: String },
}

impl BeaconErrorCode for StoreError {
    fn error_code(&self) -> &'static str {
        error_code::STORE_ERROR
    }
}
