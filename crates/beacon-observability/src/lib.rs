//! # beacon-observability
//!
//! Structured tracing with span definitions and event helpers, plus the
//! metrics collector fed by the scheduler and the incident manager.

pub mod metrics;
pub mod tracing_setup;

pub use metrics::MetricsCollector;
pub use tracing_setup::{init_tracing, init_tracing_with_filter};
