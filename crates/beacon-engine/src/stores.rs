//! Bundle of store handles shared by the engine services.

use std::sync::Arc;

use beacon_core::traits::{IComponentStore, IIncidentStore, IMonitorStore, ISubscriberStore};

#[derive(Clone)]
pub struct Stores {
    pub monitors: Arc<dyn IMonitorStore>,
    pub components: Arc<dyn IComponentStore>,
    pub incidents: Arc<dyn IIncidentStore>,
    pub subscribers: Arc<dyn ISubscriberStore>,
}

impl Stores {
    /// One backend serving every store trait.
    pub fn shared<S>(backend: Arc<S>) -> Self
    where
        S: IMonitorStore + IComponentStore + IIncidentStore + ISubscriberStore + 'static,
    {
        Self {
            monitors: backend.clone(),
            components: backend.clone(),
            incidents: backend.clone(),
            subscribers: backend,
        }
    }
}

impl std::fmt::Debug for Stores {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stores").finish_non_exhaustive()
    }
}
