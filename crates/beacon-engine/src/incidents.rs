//! Incident lifecycle under per-component locks.
//!
//! Every read-check-write on a component's incidents runs inside that
//! component's critical section. Notifications go out after the section ends.
//! Write order inside a section: component status, then incident records.

use std::sync::Arc;

use chrono::Utc;

use beacon_core::config::{ComponentAggregation, EngineConfig};
use beacon_core::constants::{degradation_message, degradation_title, RECOVERY_MESSAGE};
use beacon_core::errors::{BeaconResult, CommandError, EntityKind, IncidentError};
use beacon_core::ids::{ComponentId, IncidentId};
use beacon_core::models::{
    Component, ComponentStatus, Incident, IncidentEvent, IncidentStatus, IncidentUpdate, MonitorSignal,
    NewIncident, StatusEvent,
};
use beacon_core::BeaconError;
use beacon_observability::incident_span;
use beacon_observability::tracing_setup::events;

use crate::engine::SharedMetrics;
use crate::locks::KeyedLocks;
use crate::notify::NotificationDispatcher;
use crate::stores::Stores;

pub struct IncidentManager {
    stores: Stores,
    config: EngineConfig,
    locks: KeyedLocks<ComponentId>,
    dispatcher: Arc<NotificationDispatcher>,
    metrics: SharedMetrics,
}

impl IncidentManager {
    pub fn new(
        stores: Stores,
        config: EngineConfig,
        dispatcher: Arc<NotificationDispatcher>,
        metrics: SharedMetrics,
    ) -> Self {
        let locks = KeyedLocks::new("component", config.lock_retry_attempts, config.lock_retry_backoff_ms);
        Self {
            stores,
            config,
            locks,
            dispatcher,
            metrics,
        }
    }

    /// React to a degradation or recovery signal.
    ///
    /// Monitors without a component raise signals but never incidents.
    pub async fn on_signal(&self, event: &StatusEvent) -> BeaconResult<Option<IncidentEvent>> {
        let Some(component_id) = event.component_id.as_ref() else {
            return Ok(None);
        };

        let outcome = {
            let guard = self.locks.acquire(component_id).await;
            self.record_contention(guard.contentions);
            incident_span!(component_id, event.signal).in_scope(|| match event.signal {
                MonitorSignal::Degradation => self.open_for_degradation(component_id, event),
                MonitorSignal::Recovery => self.resolve_for_recovery(component_id, event),
            })
        }?;

        if let Some(ref incident_event) = outcome {
            self.dispatcher.dispatch(incident_event);
        }
        Ok(outcome)
    }

    fn open_for_degradation(
        &self,
        component_id: &ComponentId,
        event: &StatusEvent,
    ) -> BeaconResult<Option<IncidentEvent>> {
        let component = self.component(component_id)?;
        self.stores.components.set_status(component_id, ComponentStatus::Down)?;

        if let Some(active) = self.stores.incidents.find_active_incident(component_id)? {
            tracing::debug!(
                component_id = %component_id,
                incident_id = %active.id,
                "active incident already open"
            );
            return Ok(None);
        }

        let new = NewIncident {
            project_id: component.project_id,
            title: degradation_title(&component.name),
            description: degradation_message(&event.target),
            status: IncidentStatus::Investigating,
            impact: self.config.auto_incident_impact,
            component_id: Some(component_id.clone()),
        };
        let (incident, seed) = new.into_incident(event.at);
        self.stores.incidents.create_incident(&incident, &seed)?;

        events::incident_opened(&incident);
        self.with_metrics(|m| m.incidents.record_opened());
        Ok(Some(IncidentEvent::Opened { incident }))
    }

    fn resolve_for_recovery(
        &self,
        component_id: &ComponentId,
        event: &StatusEvent,
    ) -> BeaconResult<Option<IncidentEvent>> {
        if self.config.component_aggregation == ComponentAggregation::MostSevereWins {
            let still_down = self
                .stores
                .monitors
                .monitors_for_component(component_id)?
                .into_iter()
                .filter(|m| m.id != event.monitor_id && m.is_down())
                .count();
            if still_down > 0 {
                tracing::debug!(
                    component_id = %component_id,
                    still_down,
                    "component kept down by other monitors"
                );
                return Ok(None);
            }
        }

        let component = self.component(component_id)?;
        let active = self.stores.incidents.find_active_incident(component_id)?;
        // Leave manual statuses alone when there is nothing to recover from.
        if active.is_none() && component.status != ComponentStatus::Down {
            return Ok(None);
        }
        self.stores
            .components
            .set_status(component_id, ComponentStatus::Operational)?;

        let Some(active) = active else {
            return Ok(None);
        };
        let (incident, update) = self.stores.incidents.resolve_incident(&active.id, RECOVERY_MESSAGE)?;

        events::incident_resolved(&incident);
        self.with_metrics(|m| m.incidents.record_resolved());
        Ok(Some(IncidentEvent::Resolved { incident, update }))
    }

    /// Operator-declared incident. The component, if any, takes the status
    /// implied by the impact.
    pub async fn create_incident(&self, new: NewIncident) -> BeaconResult<Incident> {
        if new.title.trim().is_empty() {
            return Err(CommandError::Invalid {
                kind: "create_incident".to_string(),
                field: "title".to_string(),
                message: "must not be empty".to_string(),
            }
            .into());
        }
        let now = Utc::now();

        let incident = match new.component_id.clone() {
            None => {
                let (incident, seed) = new.into_incident(now);
                self.stores.incidents.create_incident(&incident, &seed)?;
                incident
            }
            Some(component_id) => {
                let guard = self.locks.acquire(&component_id).await;
                self.record_contention(guard.contentions);
                self.component(&component_id)?;

                let resolved = new.status.is_resolved();
                if !resolved {
                    self.reject_if_active(&component_id, None)?;
                }
                let implied = new.impact.component_status();
                let (incident, seed) = new.into_incident(now);
                if !resolved {
                    self.stores.components.set_status(&component_id, implied)?;
                }
                self.stores.incidents.create_incident(&incident, &seed)?;
                incident
            }
        };

        events::incident_opened(&incident);
        self.with_metrics(|m| m.incidents.record_opened());
        self.dispatcher.dispatch(&IncidentEvent::Opened {
            incident: incident.clone(),
        });
        Ok(incident)
    }

    /// Append an operator update. `resolved` closes the incident and restores
    /// the component; any other status re-opens a resolved incident.
    pub async fn add_update(
        &self,
        incident_id: &IncidentId,
        message: &str,
        status: IncidentStatus,
    ) -> BeaconResult<(Incident, IncidentUpdate)> {
        if message.trim().is_empty() {
            return Err(CommandError::Invalid {
                kind: "add_incident_update".to_string(),
                field: "message".to_string(),
                message: "must not be empty".to_string(),
            }
            .into());
        }
        let current = self.incident(incident_id)?;

        let (incident, update) = match current.component_id {
            None => self.stores.incidents.append_update(incident_id, message, status)?,
            Some(component_id) => {
                let guard = self.locks.acquire(&component_id).await;
                self.record_contention(guard.contentions);

                let current = self.incident(incident_id)?;
                if !status.is_resolved() && !current.is_active() {
                    self.reject_if_active(&component_id, Some(incident_id))?;
                }
                let applied = self.stores.incidents.append_update(incident_id, message, status)?;
                if status.is_resolved() {
                    self.stores
                        .components
                        .set_status(&component_id, ComponentStatus::Operational)?;
                }
                applied
            }
        };

        let event = if status.is_resolved() {
            events::incident_resolved(&incident);
            self.with_metrics(|m| m.incidents.record_resolved());
            IncidentEvent::Resolved {
                incident: incident.clone(),
                update: update.clone(),
            }
        } else {
            events::incident_updated(&incident);
            IncidentEvent::Updated {
                incident: incident.clone(),
                update: update.clone(),
            }
        };
        self.dispatcher.dispatch(&event);
        Ok((incident, update))
    }

    fn reject_if_active(&self, component_id: &ComponentId, except: Option<&IncidentId>) -> BeaconResult<()> {
        match self.stores.incidents.find_active_incident(component_id)? {
            Some(active) if Some(&active.id) != except => Err(IncidentError::ActiveIncidentExists {
                component_id: component_id.to_string(),
                incident_id: active.id.to_string(),
            }
            .into()),
            _ => Ok(()),
        }
    }

    fn component(&self, id: &ComponentId) -> BeaconResult<Component> {
        self.stores
            .components
            .get_component(id)?
            .ok_or_else(|| BeaconError::not_found(EntityKind::Component, id))
    }

    fn incident(&self, id: &IncidentId) -> BeaconResult<Incident> {
        self.stores
            .incidents
            .get_incident(id)?
            .ok_or_else(|| BeaconError::not_found(EntityKind::Incident, id))
    }

    fn record_contention(&self, contentions: u32) {
        if contentions > 0 {
            self.with_metrics(|m| {
                for _ in 0..contentions {
                    m.incidents.record_lock_contention();
                }
            });
        }
    }

    fn with_metrics(&self, f: impl FnOnce(&mut beacon_observability::metrics::MetricsCollector)) {
        if let Ok(mut m) = self.metrics.lock() {
            f(&mut m);
        }
    }
}
