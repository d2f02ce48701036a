//! FleetSim Core Library
//!
//! This crate provides the vehicle state model, the telemetry message shape
//! and the trait seams (scenarios, emitters, OTA requests) shared by the
//! scenario implementations and the simulation runtime.

pub mod emitter;
pub mod message;
pub mod ota;
pub mod scenario;
pub mod state;

pub use emitter::TelemetryEmitter;
pub use message::{build_message, TelemetryMessage};
pub use ota::OtaPhase;
pub use scenario::{OtaRequester, Scenario, ScenarioContext};
pub use state::VehicleState;
