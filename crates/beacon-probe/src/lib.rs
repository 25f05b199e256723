//! # beacon-probe
//!
//! The check executor. [`HttpProbe`] issues exactly one request per monitor
//! and never treats a status code as a transport error; [`CheckExecutor`]
//! runs a probe and appends the result to the monitor's history.

pub mod executor;
pub mod http_probe;

pub use executor::CheckExecutor;
pub use http_probe::HttpProbe;
