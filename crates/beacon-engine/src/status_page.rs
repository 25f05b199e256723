//! Public status page read model, rebuilt from the stores on every request.

use chrono::{DateTime, TimeDelta, Utc};
use serde::Serialize;

use beacon_core::errors::BeaconResult;
use beacon_core::ids::ProjectId;
use beacon_core::models::{Component, ComponentStatus, Incident, IncidentUpdate};

use crate::stores::Stores;

/// An incident with its timeline, newest entry first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IncidentTimeline {
    #[serde(flatten)]
    pub incident: Incident,
    pub updates: Vec<IncidentUpdate>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusPage {
    pub project_id: ProjectId,
    pub generated_at: DateTime<Utc>,
    pub overall: ComponentStatus,
    pub components: Vec<Component>,
    pub active_incidents: Vec<IncidentTimeline>,
    pub recent_incidents: Vec<IncidentTimeline>,
}

pub struct StatusPageBuilder {
    stores: Stores,
    recent_days: i64,
}

impl StatusPageBuilder {
    pub fn new(stores: Stores, recent_days: i64) -> Self {
        Self { stores, recent_days }
    }

    pub fn build(&self, project_id: &ProjectId) -> BeaconResult<StatusPage> {
        self.build_at(project_id, Utc::now())
    }

    pub fn build_at(&self, project_id: &ProjectId, now: DateTime<Utc>) -> BeaconResult<StatusPage> {
        let components = self.stores.components.list_components(project_id)?;
        let overall = ComponentStatus::worst(components.iter().map(|c| c.status));

        let cutoff = TimeDelta::try_days(self.recent_days)
            .and_then(|window| now.checked_sub_signed(window))
            .unwrap_or(DateTime::<Utc>::MIN_UTC);
        let mut active_incidents = Vec::new();
        let mut recent_incidents = Vec::new();
        // list_incidents is newest first already.
        for incident in self.stores.incidents.list_incidents(project_id)? {
            if incident.is_active() {
                active_incidents.push(self.with_timeline(incident)?);
            } else if incident.resolved_at.is_some_and(|at| at >= cutoff) {
                recent_incidents.push(self.with_timeline(incident)?);
            }
        }

        Ok(StatusPage {
            project_id: project_id.clone(),
            generated_at: now,
            overall,
            components,
            active_incidents,
            recent_incidents,
        })
    }

    fn with_timeline(&self, incident: Incident) -> BeaconResult<IncidentTimeline> {
        let mut updates = self.stores.incidents.list_updates(&incident.id)?;
        updates.reverse();
        Ok(IncidentTimeline { incident, updates })
    }
}
