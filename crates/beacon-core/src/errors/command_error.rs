use super::error_code::{self, BeaconErrorCode};

/// An operator command failed validation at the boundary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("invalid {kind} command: {field} {message}")]
    Invalid {
        kind: String,
        field: String,
        message: String,
    },
}

impl BeaconErrorCode for CommandError {
    fn error_code(&self) -> &'static str {
        error_code::INVALID_COMMAND
    }
}
