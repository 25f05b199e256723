//! Tagged event payloads crossing the engine boundary.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{ComponentId, MonitorId};

use super::incident::{Incident, IncidentUpdate};

/// Edge-triggered signal emitted when a monitor crosses a lifecycle boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MonitorSignal {
    /// Failure threshold reached; monitor went down.
    Degradation,
    /// First success after being down.
    Recovery,
}

/// A signal with the context the incident manager needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusEvent {
    pub monitor_id: MonitorId,
    pub component_id: Option<ComponentId>,
    pub signal: MonitorSignal,
    pub target: String,
    pub at: DateTime<Utc>,
}

/// Incident lifecycle notifications handed to the notification dispatcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IncidentEvent {
    Opened { incident: Incident },
    Updated { incident: Incident, update: IncidentUpdate },
    /// Carries the closing timeline entry.
    Resolved { incident: Incident, update: IncidentUpdate },
}

impl IncidentEvent {
    pub fn incident(&self) -> &Incident {
        match self {
            Self::Opened { incident }
            | Self::Updated { incident, .. }
            | Self::Resolved { incident, .. } => incident,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Opened { .. } => "opened",
            Self::Updated { .. } => "updated",
            Self::Resolved { .. } => "resolved",
        }
    }
}
