//! FleetSim Runtime
//!
//! Exposes runtime components for integration testing.

pub mod config;
pub mod emitters;
pub mod fleet;
pub mod ota;
pub mod vehicle;
