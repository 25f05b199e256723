//! # beacon-scheduler
//!
//! One `run_tick` selects due monitors, checks them concurrently under a
//! semaphore, folds each result into the engine, and reports per monitor.
//! [`SchedulerDriver`] repeats ticks on an interval until cancelled.

pub mod driver;
pub mod report;
pub mod scheduler;

pub use driver::SchedulerDriver;
pub use report::{MonitorOutcome, MonitorReport, SkipReason, TickReport};
pub use scheduler::Scheduler;
