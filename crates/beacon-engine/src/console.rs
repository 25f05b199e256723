//! Applies validated operator commands.

use std::sync::Arc;

use beacon_core::commands::{CommandOutcome, OperatorCommand};
use beacon_core::errors::BeaconResult;
use beacon_core::models::ComponentPatch;

use crate::catalog::Catalog;
use crate::incidents::IncidentManager;

pub struct OperatorConsole {
    catalog: Arc<Catalog>,
    incidents: Arc<IncidentManager>,
}

impl OperatorConsole {
    pub fn new(catalog: Arc<Catalog>, incidents: Arc<IncidentManager>) -> Self {
        Self { catalog, incidents }
    }

    pub async fn execute(&self, command: OperatorCommand) -> BeaconResult<CommandOutcome> {
        command.validate()?;
        tracing::info!(command = command.kind(), "operator command");
        match command {
            OperatorCommand::PauseMonitor { monitor_id } => Ok(CommandOutcome::MonitorUpdated {
                monitor: self.catalog.pause_monitor(&monitor_id).await?,
            }),
            OperatorCommand::ResumeMonitor { monitor_id } => Ok(CommandOutcome::MonitorUpdated {
                monitor: self.catalog.resume_monitor(&monitor_id).await?,
            }),
            OperatorCommand::SetComponentStatus { component_id, status } => {
                let patch = ComponentPatch {
                    status: Some(status),
                    ..Default::default()
                };
                Ok(CommandOutcome::ComponentUpdated {
                    component: self.catalog.update_component(&component_id, patch)?,
                })
            }
            OperatorCommand::CreateIncident(new) => Ok(CommandOutcome::IncidentCreated {
                incident: self.incidents.create_incident(new).await?,
            }),
            OperatorCommand::AddIncidentUpdate {
                incident_id,
                message,
                status,
            } => {
                let (incident, update) = self.incidents.add_update(&incident_id, &message, status).await?;
                Ok(CommandOutcome::IncidentUpdated { incident, update })
            }
        }
    }

    /// Parse, validate, and apply a JSON payload.
    pub async fn execute_json(&self, raw: &str) -> BeaconResult<CommandOutcome> {
        let command = OperatorCommand::from_json(raw)?;
        self.execute(command).await
    }
}
