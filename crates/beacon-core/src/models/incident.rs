//! Incidents and their append-only timeline.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{ComponentId, IncidentId, IncidentUpdateId, ProjectId};

use super::component::ComponentStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IncidentStatus {
    #[default]
    Investigating,
    Identified,
    Monitoring,
    Resolved,
}

impl IncidentStatus {
    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Investigating => "investigating",
            Self::Identified => "identified",
            Self::Monitoring => "monitoring",
            Self::Resolved => "resolved",
        }
    }
}

/// Set at creation; the engine never changes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    None,
    Minor,
    #[default]
    Major,
    Critical,
}

impl Impact {
    /// Component status implied by a manually declared incident.
    pub fn component_status(&self) -> ComponentStatus {
        match self {
            Self::Critical => ComponentStatus::Down,
            Self::Major | Self::Minor => ComponentStatus::Degraded,
            Self::None => ComponentStatus::Operational,
        }
    }
}

/// A tracked service disruption.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Incident {
    pub id: IncidentId,
    pub project_id: ProjectId,
    pub title: String,
    pub description: String,
    pub status: IncidentStatus,
    pub impact: Impact,
    pub component_id: Option<ComponentId>,
    pub started_at: DateTime<Utc>,
    pub resolved_at: Option<DateTime<Utc>>,
}

impl Incident {
    pub fn is_active(&self) -> bool {
        !self.status.is_resolved()
    }

    /// Move to `status`. Resolving stamps `resolved_at`; any other status clears it.
    pub fn apply_status(&mut self, status: IncidentStatus, now: DateTime<Utc>) {
        self.status = status;
        self.resolved_at = if status.is_resolved() { Some(now) } else { None };
    }
}

/// Immutable timeline entry, one per lifecycle transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncidentUpdate {
    pub id: IncidentUpdateId,
    pub incident_id: IncidentId,
    pub message: String,
    pub status: IncidentStatus,
    pub created_at: DateTime<Utc>,
}

impl IncidentUpdate {
    pub fn new(
        incident_id: IncidentId,
        message: impl Into<String>,
        status: IncidentStatus,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: IncidentUpdateId::generate(),
            incident_id,
            message: message.into(),
            status,
            created_at,
        }
    }
}

/// Operator-declared incident.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewIncident {
    #[serde(default)]
    pub project_id: ProjectId,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub status: IncidentStatus,
    #[serde(default)]
    pub impact: Impact,
    #[serde(default)]
    pub component_id: Option<ComponentId>,
}

impl NewIncident {
    /// Materialize the incident and its seed timeline entry.
    pub fn into_incident(self, now: DateTime<Utc>) -> (Incident, IncidentUpdate) {
        let mut incident = Incident {
            id: IncidentId::generate(),
            project_id: self.project_id,
            title: self.title,
            description: self.description,
            status: self.status,
            impact: self.impact,
            component_id: self.component_id,
            started_at: now,
            resolved_at: None,
        };
        incident.apply_status(self.status, now);
        let seed = IncidentUpdate::new(
            incident.id.clone(),
            incident.description.clone(),
            incident.status,
            now,
        );
        (incident, seed)
    }
}
