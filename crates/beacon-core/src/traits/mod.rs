pub mod component_store;
pub mod incident_store;
pub mod monitor_store;
pub mod notifier;
pub mod probe;
pub mod subscriber_store;

pub use component_store::IComponentStore;
pub use incident_store::IIncidentStore;
pub use monitor_store::IMonitorStore;
pub use notifier::{IIncidentNotifier, INoticeSink, OutboundNotice};
pub use probe::IProbe;
pub use subscriber_store::ISubscriberStore;
