//! # beacon-core
//!
//! Foundation crate for the Beacon status engine.
//! Defines the models, ids, traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod commands;
pub mod config;
pub mod constants;
pub mod errors;
pub mod ids;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::BeaconConfig;
pub use errors::{BeaconError, BeaconResult};
pub use ids::{ComponentId, IncidentId, IncidentUpdateId, MonitorId, ProjectId, SubscriberId};
pub use models::{
    CheckResult, Component, ComponentStatus, Impact, Incident, IncidentStatus, IncidentUpdate,
    LifecycleState, Monitor, MonitorRunState, MonitorSignal,
};
