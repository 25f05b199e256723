//! Concurrent in-memory backend.
//!
//! Each trait method touches one map entry at a time, so every call is atomic
//! on its own. Cross-entity consistency is the engine's job.

mod components;
mod incidents;
mod monitors;
mod subscribers;

use dashmap::DashMap;

use beacon_core::ids::{ComponentId, IncidentId, MonitorId, ProjectId, SubscriberId};
use beacon_core::models::{CheckResult, Component, Incident, IncidentUpdate, Monitor, Subscriber};

#[derive(Debug, Default)]
pub struct MemoryStore {
    monitors: DashMap<MonitorId, Monitor>,
    checks: DashMap<MonitorId, Vec<CheckResult>>,
    components: DashMap<ComponentId, Component>,
    incidents: DashMap<IncidentId, Incident>,
    updates: DashMap<IncidentId, Vec<IncidentUpdate>>,
    subscribers: DashMap<SubscriberId, Subscriber>,
    /// `(project, lowercased email)` to subscriber; guards uniqueness.
    subscriber_emails: DashMap<(ProjectId, String), SubscriberId>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn monitor_count(&self) -> usize {
        self.monitors.len()
    }

    pub fn incident_count(&self) -> usize {
        self.incidents.len()
    }
}
