//! Configuration system for Beacon.
//! TOML-based, layered resolution: CLI > env > file > defaults.

pub mod beacon_config;
pub mod defaults;
pub mod engine_config;
pub mod observability_config;
pub mod probe_config;
pub mod scheduler_config;

pub use beacon_config::{BeaconConfig, CliOverrides};
pub use engine_config::{ComponentAggregation, EngineConfig};
pub use observability_config::ObservabilityConfig;
pub use probe_config::ProbeConfig;
pub use scheduler_config::SchedulerConfig;
