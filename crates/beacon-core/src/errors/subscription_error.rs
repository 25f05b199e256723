use super::error_code::{self, BeaconErrorCode};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubscriptionError {
    #[error("invalid email address: {email}")]
    InvalidEmail { email: String },

    #[error("{email} is already subscribed")]
    AlreadySubscribed { email: String },
}

impl BeaconErrorCode for SubscriptionError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidEmail { .. } => error_code::INVALID_EMAIL,
            Self::AlreadySubscribed { .. } => error_code::ALREADY_SUBSCRIBED,
        }
    }
}
