//! Builders for valid models with sensible test defaults.

use chrono::Utc;

use beacon_core::ids::{ComponentId, ProjectId};
use beacon_core::models::{Component, ComponentSpec, ComponentStatus, HttpMethod, Monitor, MonitorSpec};

/// Monitor with a 60s interval, 10s timeout and `alert_after = 3`.
pub struct MonitorBuilder {
    spec: MonitorSpec,
}

impl MonitorBuilder {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            spec: MonitorSpec::new(url, 60, 10),
        }
    }

    pub fn method(mut self, method: HttpMethod) -> Self {
        self.spec.method = method;
        self
    }

    /// Also shrinks the timeout if it would exceed the interval.
    pub fn interval_secs(mut self, secs: u64) -> Self {
        self.spec.interval_secs = secs;
        self.spec.timeout_secs = self.spec.timeout_secs.min(secs);
        self
    }

    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.spec.timeout_secs = secs;
        self
    }

    pub fn expected_status(mut self, codes: &[u16]) -> Self {
        self.spec.expected_status = Some(codes.to_vec());
        self
    }

    pub fn alert_after(mut self, n: u32) -> Self {
        self.spec.alert_after = Some(n);
        self
    }

    pub fn component(mut self, id: &ComponentId) -> Self {
        self.spec.component_id = Some(id.clone());
        self
    }

    pub fn project(mut self, id: &ProjectId) -> Self {
        self.spec.project_id = id.clone();
        self
    }

    pub fn spec(self) -> MonitorSpec {
        self.spec
    }

    /// # Panics
    /// Panics if the configured values are invalid.
    pub fn build(self) -> Monitor {
        self.spec
            .build(3, Utc::now())
            .unwrap_or_else(|e| panic!("invalid monitor fixture: {e}"))
    }
}

pub struct ComponentBuilder {
    id: ComponentId,
    spec: ComponentSpec,
    order: u32,
}

impl ComponentBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            id: ComponentId::generate(),
            spec: ComponentSpec::new(name),
            order: 0,
        }
    }

    pub fn id(mut self, id: &str) -> Self {
        self.id = ComponentId::from(id);
        self
    }

    pub fn status(mut self, status: ComponentStatus) -> Self {
        self.spec.status = status;
        self
    }

    pub fn order(mut self, order: u32) -> Self {
        self.order = order;
        self
    }

    pub fn project(mut self, id: &ProjectId) -> Self {
        self.spec.project_id = id.clone();
        self
    }

    /// Spec with the builder's id pinned, for `Catalog::create_component`.
    pub fn spec(self) -> ComponentSpec {
        ComponentSpec {
            id: Some(self.id),
            ..self.spec
        }
    }

    pub fn build(self) -> Component {
        let now = Utc::now();
        Component {
            id: self.id,
            project_id: self.spec.project_id,
            name: self.spec.name,
            description: self.spec.description,
            status: self.spec.status,
            order: self.order,
            created_at: now,
            updated_at: now,
        }
    }
}
