use std::sync::Arc;

use crate::errors::BeaconResult;
use crate::ids::{ComponentId, IncidentId, ProjectId};
use crate::models::{Incident, IncidentStatus, IncidentUpdate};

/// Incidents and their timelines. Each method is atomic on its own.
pub trait IIncidentStore: Send + Sync {
    /// Store an incident together with its seed timeline entry.
    fn create_incident(&self, incident: &Incident, seed: &IncidentUpdate) -> BeaconResult<()>;
    fn get_incident(&self, id: &IncidentId) -> BeaconResult<Option<Incident>>;
    /// The non-resolved incident of a component, if any.
    fn find_active_incident(&self, component_id: &ComponentId) -> BeaconResult<Option<Incident>>;
    /// Append a timeline entry and move the incident to `status`
    /// (stamping or clearing `resolved_at`). Returns the updated incident.
    fn append_update(
        &self,
        id: &IncidentId,
        message: &str,
        status: IncidentStatus,
    ) -> BeaconResult<(Incident, IncidentUpdate)>;
    /// Resolve with a closing timeline entry.
    fn resolve_incident(&self, id: &IncidentId, message: &str) -> BeaconResult<(Incident, IncidentUpdate)> {
        self.append_update(id, message, IncidentStatus::Resolved)
    }
    /// Incidents of a project, newest first.
    fn list_incidents(&self, project_id: &ProjectId) -> BeaconResult<Vec<Incident>>;
    /// Timeline of an incident, oldest first.
    fn list_updates(&self, id: &IncidentId) -> BeaconResult<Vec<IncidentUpdate>>;
}

impl<T: IIncidentStore> IIncidentStore for Arc<T> {
    fn create_incident(&self, incident: &Incident, seed: &IncidentUpdate) -> BeaconResult<()> { (**self).create_incident(incident, seed) }
    fn get_incident(&self, id: &IncidentId) -> BeaconResult<Option<Incident>> { (**self).get_incident(id) }
    fn find_active_incident(&self, component_id: &ComponentId) -> BeaconResult<Option<Incident>> { (**self).find_active_incident(component_id) }
    fn append_update(&self, id: &IncidentId, message: &str, status: IncidentStatus) -> BeaconResult<(Incident, IncidentUpdate)> { (**self).append_update(id, message, status) }
    fn resolve_incident(&self, id: &IncidentId, message: &str) -> BeaconResult<(Incident, IncidentUpdate)> { (**self).resolve_incident(id, message) }
    fn list_incidents(&self, project_id: &ProjectId) -> BeaconResult<Vec<Incident>> { (**self).list_incidents(project_id) }
    fn list_updates(&self, id: &IncidentId) -> BeaconResult<Vec<IncidentUpdate>> { (**self).list_updates(id) }
}
