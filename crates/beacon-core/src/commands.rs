//! Operator commands: the typed boundary for dashboard and webhook payloads.
//!
//! Every action is its own tagged variant and is validated before it reaches
//! the engine.

use serde::{Deserialize, Serialize};

use crate::errors::CommandError;
use crate::ids::{ComponentId, IncidentId, MonitorId};
use crate::models::{Component, ComponentStatus, Incident, IncidentStatus, IncidentUpdate, Monitor, NewIncident};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OperatorCommand {
    PauseMonitor {
        monitor_id: MonitorId,
    },
    ResumeMonitor {
        monitor_id: MonitorId,
    },
    SetComponentStatus {
        component_id: ComponentId,
        status: ComponentStatus,
    },
    CreateIncident(NewIncident),
    AddIncidentUpdate {
        incident_id: IncidentId,
        message: String,
        status: IncidentStatus,
    },
}

impl OperatorCommand {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::PauseMonitor { .. } => "pause_monitor",
            Self::ResumeMonitor { .. } => "resume_monitor",
            Self::SetComponentStatus { .. } => "set_component_status",
            Self::CreateIncident(_) => "create_incident",
            Self::AddIncidentUpdate { .. } => "add_incident_update",
        }
    }

    /// Parse and validate a JSON payload in one step.
    pub fn from_json(raw: &str) -> Result<Self, CommandError> {
        let cmd: Self = serde_json::from_str(raw).map_err(|e| CommandError::Invalid {
            kind: "unknown".to_string(),
            field: "payload".to_string(),
            message: e.to_string(),
        })?;
        cmd.validate()?;
        Ok(cmd)
    }

    pub fn validate(&self) -> Result<(), CommandError> {
        let invalid = |field: &str, message: &str| CommandError::Invalid {
            kind: self.kind().to_string(),
            field: field.to_string(),
            message: message.to_string(),
        };
        match self {
            Self::PauseMonitor { monitor_id } | Self::ResumeMonitor { monitor_id } => {
                if monitor_id.as_str().trim().is_empty() {
                    return Err(invalid("monitor_id", "must not be empty"));
                }
            }
            Self::SetComponentStatus { component_id, .. } => {
                if component_id.as_str().trim().is_empty() {
                    return Err(invalid("component_id", "must not be empty"));
                }
            }
            Self::CreateIncident(new) => {
                if new.title.trim().is_empty() {
                    return Err(invalid("title", "must not be empty"));
                }
                if new.description.trim().is_empty() {
                    return Err(invalid("description", "must not be empty"));
                }
            }
            Self::AddIncidentUpdate {
                incident_id,
                message,
                ..
            } => {
                if incident_id.as_str().trim().is_empty() {
                    return Err(invalid("incident_id", "must not be empty"));
                }
                if message.trim().is_empty() {
                    return Err(invalid("message", "must not be empty"));
                }
            }
        }
        Ok(())
    }
}

/// Result of an applied operator command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CommandOutcome {
    MonitorUpdated {
        monitor: Monitor,
    },
    ComponentUpdated {
        component: Component,
    },
    IncidentCreated {
        incident: Incident,
    },
    IncidentUpdated {
        incident: Incident,
        update: IncidentUpdate,
    },
}
