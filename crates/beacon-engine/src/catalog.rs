//! Operator-facing configuration of components and monitors.

use std::sync::Arc;

use chrono::Utc;

use beacon_core::config::EngineConfig;
use beacon_core::errors::{BeaconResult, ConfigError, EntityKind};
use beacon_core::ids::{ComponentId, MonitorId, ProjectId};
use beacon_core::models::{
    Component, ComponentPatch, ComponentSpec, LifecycleState, Monitor, MonitorPatch, MonitorSpec,
};
use beacon_core::BeaconError;

use crate::locks::KeyedLocks;
use crate::stores::Stores;

pub struct Catalog {
    stores: Stores,
    config: EngineConfig,
    monitor_locks: Arc<KeyedLocks<MonitorId>>,
}

impl Catalog {
    pub fn new(stores: Stores, config: EngineConfig, monitor_locks: Arc<KeyedLocks<MonitorId>>) -> Self {
        Self {
            stores,
            config,
            monitor_locks,
        }
    }

    // --- Components ---

    /// New component, placed after every existing one of its project.
    pub fn create_component(&self, spec: ComponentSpec) -> BeaconResult<Component> {
        validate_name(&spec.name)?;
        let order = self
            .stores
            .components
            .list_components(&spec.project_id)?
            .iter()
            .map(|c| c.order + 1)
            .max()
            .unwrap_or(0);
        let now = Utc::now();
        let component = Component {
            id: spec.id.unwrap_or_else(ComponentId::generate),
            project_id: spec.project_id,
            name: spec.name.trim().to_string(),
            description: spec.description,
            status: spec.status,
            order,
            created_at: now,
            updated_at: now,
        };
        self.stores.components.insert_component(&component)?;
        tracing::info!(component_id = %component.id, name = %component.name, "component created");
        Ok(component)
    }

    pub fn update_component(&self, id: &ComponentId, patch: ComponentPatch) -> BeaconResult<Component> {
        let mut component = self.component(id)?;
        if let Some(name) = patch.name {
            validate_name(&name)?;
            component.name = name.trim().to_string();
        }
        if let Some(description) = patch.description {
            component.description = Some(description);
        }
        if let Some(status) = patch.status {
            component.status = status;
        }
        component.updated_at = Utc::now();
        self.stores.components.save_component(&component)?;
        Ok(component)
    }

    /// Listed ids first in the given order, the rest after them in their
    /// previous order.
    pub fn reorder_components(&self, project_id: &ProjectId, ordered: &[ComponentId]) -> BeaconResult<Vec<Component>> {
        let current = self.stores.components.list_components(project_id)?;
        for id in ordered {
            if !current.iter().any(|c| &c.id == id) {
                return Err(BeaconError::not_found(EntityKind::Component, id));
            }
        }
        let (mut listed, rest): (Vec<Component>, Vec<Component>) =
            current.into_iter().partition(|c| ordered.contains(&c.id));
        listed.sort_by_key(|c| ordered.iter().position(|id| id == &c.id));

        let now = Utc::now();
        for (position, mut component) in listed.into_iter().chain(rest).enumerate() {
            let position = position as u32;
            if component.order != position {
                component.order = position;
                component.updated_at = now;
                self.stores.components.save_component(&component)?;
            }
        }
        self.stores.components.list_components(project_id)
    }

    pub fn list_components(&self, project_id: &ProjectId) -> BeaconResult<Vec<Component>> {
        self.stores.components.list_components(project_id)
    }

    // --- Monitors ---

    pub fn create_monitor(&self, spec: MonitorSpec) -> BeaconResult<Monitor> {
        if let Some(ref component_id) = spec.component_id {
            self.component(component_id)?;
        }
        let monitor = spec.build(self.config.default_alert_after, Utc::now())?;
        self.stores.monitors.insert_monitor(&monitor)?;
        tracing::info!(monitor_id = %monitor.id, url = %monitor.url, "monitor created");
        Ok(monitor)
    }

    pub async fn update_monitor(&self, id: &MonitorId, patch: MonitorPatch) -> BeaconResult<Monitor> {
        if let Some(Some(ref component_id)) = patch.component_id {
            self.component(component_id)?;
        }
        let _guard = self.monitor_locks.acquire(id).await;
        let updated = patch.apply(&self.monitor(id)?)?;
        self.stores.monitors.save_monitor(&updated)?;
        Ok(updated)
    }

    /// Remove a monitor from scheduling. Component and incidents are untouched.
    pub async fn pause_monitor(&self, id: &MonitorId) -> BeaconResult<Monitor> {
        let _guard = self.monitor_locks.acquire(id).await;
        let mut monitor = self.monitor(id)?;
        monitor.state.lifecycle = LifecycleState::Paused;
        self.stores.monitors.update_monitor_state(id, &monitor.state)?;
        tracing::info!(monitor_id = %id, "monitor paused");
        Ok(monitor)
    }

    /// Back to `unknown`. A monitor that is not paused is returned unchanged.
    pub async fn resume_monitor(&self, id: &MonitorId) -> BeaconResult<Monitor> {
        let _guard = self.monitor_locks.acquire(id).await;
        let mut monitor = self.monitor(id)?;
        if !monitor.is_paused() {
            return Ok(monitor);
        }
        monitor.state.lifecycle = LifecycleState::Unknown;
        if self.config.resume_resets_failures {
            monitor.state.consecutive_failures = 0;
        }
        self.stores.monitors.update_monitor_state(id, &monitor.state)?;
        tracing::info!(
            monitor_id = %id,
            consecutive_failures = monitor.state.consecutive_failures,
            "monitor resumed"
        );
        Ok(monitor)
    }

    pub fn get_monitor(&self, id: &MonitorId) -> BeaconResult<Monitor> {
        self.monitor(id)
    }

    fn monitor(&self, id: &MonitorId) -> BeaconResult<Monitor> {
        self.stores
            .monitors
            .get_monitor(id)?
            .ok_or_else(|| BeaconError::not_found(EntityKind::Monitor, id))
    }

    fn component(&self, id: &ComponentId) -> BeaconResult<Component> {
        self.stores
            .components
            .get_component(id)?
            .ok_or_else(|| BeaconError::not_found(EntityKind::Component, id))
    }
}

fn validate_name(name: &str) -> Result<(), ConfigError> {
    if name.trim().is_empty() {
        return Err(ConfigError::invalid("name", "must not be empty"));
    }
    Ok(())
}
