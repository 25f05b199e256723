use std::sync::Arc;

use crate::errors::BeaconResult;
use crate::ids::{ComponentId, ProjectId};
use crate::models::{Component, ComponentStatus};

/// Component records.
pub trait IComponentStore: Send + Sync {
    fn insert_component(&self, component: &Component) -> BeaconResult<()>;
    fn get_component(&self, id: &ComponentId) -> BeaconResult<Option<Component>>;
    /// Replace a component. Not-found if absent.
    fn save_component(&self, component: &Component) -> BeaconResult<()>;
    /// Components of a project ordered by display order.
    fn list_components(&self, project_id: &ProjectId) -> BeaconResult<Vec<Component>>;
    /// Set status only. Not-found if absent.
    fn set_status(&self, id: &ComponentId, status: ComponentStatus) -> BeaconResult<()>;
}

impl<T: IComponentStore> IComponentStore for Arc<T> {
    fn insert_component(&self, component: &Component) -> BeaconResult<()> { (**self).insert_component(component) }
    fn get_component(&self, id: &ComponentId) -> BeaconResult<Option<Component>> { (**self).get_component(id) }
    fn save_component(&self, component: &Component) -> BeaconResult<()> { (**self).save_component(component) }
    fn list_components(&self, project_id: &ProjectId) -> BeaconResult<Vec<Component>> { (**self).list_components(project_id) }
    fn set_status(&self, id: &ComponentId, status: ComponentStatus) -> BeaconResult<()> { (**self).set_status(id, status) }
}
