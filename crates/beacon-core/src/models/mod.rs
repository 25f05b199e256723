pub mod check_result;
pub mod component;
pub mod events;
pub mod incident;
pub mod monitor;
pub mod subscriber;

pub use check_result::{CheckClassification, CheckResult};
pub use component::{Component, ComponentPatch, ComponentSpec, ComponentStatus};
pub use events::{IncidentEvent, MonitorSignal, StatusEvent};
pub use incident::{Impact, Incident, IncidentStatus, IncidentUpdate, NewIncident};
pub use monitor::{HttpMethod, LifecycleState, Monitor, MonitorPatch, MonitorRunState, MonitorSpec};
pub use subscriber::Subscriber;
