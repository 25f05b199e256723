//! # beacon-storage
//!
//! Store backends for Beacon. `MemoryStore` implements every store trait
//! from `beacon_core::traits` over concurrent maps.

pub mod memory;

pub use memory::MemoryStore;
