//! Error handling for Beacon.
//! One error enum per subsystem, `thiserror` only, aggregated by `BeaconError`.

pub mod command_error;
pub mod config_error;
pub mod error_code;
pub mod incident_error;
pub mod lock_error;
pub mod probe_error;
pub mod store_error;
pub mod subscription_error;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use command_error::CommandError;
pub use config_error::ConfigError;
pub use error_code::BeaconErrorCode;
pub use incident_error::IncidentError;
pub use lock_error::LockError;
pub use probe_error::ProbeError;
pub use store_error::StoreError;
pub use subscription_error::SubscriptionError;

/// Kind of entity named in a not-found error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Monitor,
    Component,
    Incident,
    Subscriber,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Monitor => "monitor",
            Self::Component => "component",
            Self::Incident => "incident",
            Self::Subscriber => "subscriber",
        };
        f.write_str(s)
    }
}

/// Top-level error. Subsystem errors convert in via `From`.
#[derive(Debug, thiserror::Error)]
pub enum BeaconError {
    #[error("{kind} not found: {id}")]
    NotFound { kind: EntityKind, id: String },

    #[error("probe error: {0}")]
    Probe(#[from] ProbeError),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("incident error: {0}")]
    Incident(#[from] IncidentError),

    #[error("subscription error: {0}")]
    Subscription(#[from] SubscriptionError),

    #[error("command error: {0}")]
    Command(#[from] CommandError),

    #[error("lock error: {0}")]
    Lock(#[from] LockError),
}

impl BeaconError {
    pub fn not_found(kind: EntityKind, id: impl fmt::Display) -> Self {
        Self::NotFound {
            kind,
            id: id.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::Store(StoreError::Duplicate { .. }))
    }
}

impl BeaconErrorCode for BeaconError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => error_code::NOT_FOUND,
            Self::Probe(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
            Self::Store(e) => e.error_code(),
            Self::Incident(e) => e.error_code(),
            Self::Subscription(e) => e.error_code(),
            Self::Command(e) => e.error_code(),
            Self::Lock(e) => e.error_code(),
        }
    }
}

pub type BeaconResult<T> = Result<T, BeaconError>;
