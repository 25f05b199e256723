use chrono::Utc;

use beacon_core::errors::{BeaconResult, EntityKind, StoreError};
use beacon_core::ids::{ComponentId, ProjectId};
use beacon_core::models::{Component, ComponentStatus};
use beacon_core::traits::IComponentStore;
use beacon_core::BeaconError;

use super::MemoryStore;

impl IComponentStore for MemoryStore {
    fn insert_component(&self, component: &Component) -> BeaconResult<()> {
        if self.components.contains_key(&component.id) {
            return Err(StoreError::Duplicate {
                entity: EntityKind::Component.to_string(),
                id: component.id.to_string(),
            }
            .into());
        }
        self.components.insert(component.id.clone(), component.clone());
        Ok(())
    }

    fn get_component(&self, id: &ComponentId) -> BeaconResult<Option<Component>> {
        Ok(self.components.get(id).map(|c| c.clone()))
    }

    fn save_component(&self, component: &Component) -> BeaconResult<()> {
        match self.components.get_mut(&component.id) {
            Some(mut entry) => {
                *entry = component.clone();
                Ok(())
            }
            None => Err(BeaconError::not_found(EntityKind::Component, &component.id)),
        }
    }

    fn list_components(&self, project_id: &ProjectId) -> BeaconResult<Vec<Component>> {
        let mut components: Vec<Component> = self
            .components
            .iter()
            .filter(|c| &c.project_id == project_id)
            .map(|c| c.clone())
            .collect();
        components.sort_by(|a, b| a.order.cmp(&b.order).then_with(|| a.created_at.cmp(&b.created_at)));
        Ok(components)
    }

    fn set_status(&self, id: &ComponentId, status: ComponentStatus) -> BeaconResult<()> {
        let mut entry = self
            .components
            .get_mut(id)
            .ok_or_else(|| BeaconError::not_found(EntityKind::Component, id))?;
        if entry.status != status {
            entry.status = status;
            entry.updated_at = Utc::now();
        }
        Ok(())
    }
}
