use super::error_code::{self, BeaconErrorCode};

/// Incident lifecycle rule violations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IncidentError {
    #[error("component {component_id} already has active incident {incident_id}")]
    ActiveIncidentExists {
        component_id: String,
        incident_id: String,
    },
}

impl BeaconErrorCode for IncidentError {
    fn error_code(&self) -> &'static str {
        error_code::ACTIVE_INCIDENT_EXISTS
    }
}
