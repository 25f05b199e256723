//! # beacon-engine
//!
//! Everything between a finished check and the public status page:
//! lifecycle transitions, incident management under per-component locks,
//! notification fan-out, the operator catalog, subscriptions, and read models.

pub mod catalog;
pub mod console;
pub mod engine;
pub mod evaluator;
pub mod incidents;
pub mod locks;
pub mod notify;
pub mod status_page;
pub mod stores;
pub mod subscribers;
pub mod transition;
pub mod uptime;

pub use catalog::Catalog;
pub use console::OperatorConsole;
pub use engine::{BeaconEngine, SharedMetrics};
pub use evaluator::{AppliedCheck, StatusEvaluator};
pub use incidents::IncidentManager;
pub use locks::KeyedLocks;
pub use notify::{LogSink, NotificationDispatcher, SubscriberFanout};
pub use status_page::{StatusPage, StatusPageBuilder};
pub use stores::Stores;
pub use subscribers::SubscriptionService;
pub use transition::{evaluate, Transition};
pub use uptime::{UptimeCalculator, UptimeReport};
