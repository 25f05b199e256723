use chrono::Utc;

use beacon_core::errors::{BeaconResult, EntityKind, StoreError};
use beacon_core::ids::{ComponentId, IncidentId, ProjectId};
use beacon_core::models::{Incident, IncidentStatus, IncidentUpdate};
use beacon_core::traits::IIncidentStore;
use beacon_core::BeaconError;

use super::MemoryStore;

impl IIncidentStore for MemoryStore {
    fn create_incident(&self, incident: &Incident, seed: &IncidentUpdate) -> BeaconResult<()> {
        if seed.incident_id != incident.id {
            return Err(StoreError::WriteRejected {
                reason: format!("seed update belongs to {}, not {}", seed.incident_id, incident.id),
            }
            .into());
        }
        if self.incidents.contains_key(&incident.id) {
            return Err(StoreError::Duplicate {
                entity: EntityKind::Incident.to_string(),
                id: incident.id.to_string(),
            }
            .into());
        }
        // Timeline first so a reader that sees the incident also sees its seed.
        self.updates.insert(incident.id.clone(), vec![seed.clone()]);
        self.incidents.insert(incident.id.clone(), incident.clone());
        Ok(())
    }

    fn get_incident(&self, id: &IncidentId) -> BeaconResult<Option<Incident>> {
        Ok(self.incidents.get(id).map(|i| i.clone()))
    }

    fn find_active_incident(&self, component_id: &ComponentId) -> BeaconResult<Option<Incident>> {
        Ok(self
            .incidents
            .iter()
            .filter(|i| i.is_active() && i.component_id.as_ref() == Some(component_id))
            .max_by_key(|i| i.started_at)
            .map(|i| i.clone()))
    }

    fn append_update(
        &self,
        id: &IncidentId,
        message: &str,
        status: IncidentStatus,
    ) -> BeaconResult<(Incident, IncidentUpdate)> {
        // The incident entry guard is held across both writes.
        let mut incident = self
            .incidents
            .get_mut(id)
            .ok_or_else(|| BeaconError::not_found(EntityKind::Incident, id))?;
        let now = Utc::now();
        let update = IncidentUpdate::new(id.clone(), message, status, now);
        incident.apply_status(status, now);
        self.updates.entry(id.clone()).or_default().push(update.clone());
        Ok((incident.clone(), update))
    }

    fn list_incidents(&self, project_id: &ProjectId) -> BeaconResult<Vec<Incident>> {
        let mut incidents: Vec<Incident> = self
            .incidents
            .iter()
            .filter(|i| &i.project_id == project_id)
            .map(|i| i.clone())
            .collect();
        incidents.sort_by(|a, b| b.started_at.cmp(&a.started_at));
        Ok(incidents)
    }

    fn list_updates(&self, id: &IncidentId) -> BeaconResult<Vec<IncidentUpdate>> {
        if !self.incidents.contains_key(id) {
            return Err(BeaconError::not_found(EntityKind::Incident, id));
        }
        let mut updates = self.updates.get(id).map(|u| u.clone()).unwrap_or_default();
        updates.sort_by_key(|u| u.created_at);
        Ok(updates)
    }
}
