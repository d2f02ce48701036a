//! FleetSim Behavioral Scenarios
//!
//! Concrete implementations of the `Scenario` trait: gradual driving
//! dynamics, time-proportional battery drain, stochastic network dropout
//! and probabilistic OTA trigger. Each stochastic scenario owns its own
//! seeded RNG so simulation runs are reproducible.

pub mod battery_drain;
pub mod bounds;
pub mod network_dropout;
pub mod normal_drive;
pub mod ota_trigger;

pub use battery_drain::{BatteryDrain, DrainParams};
pub use bounds::Bounds;
pub use network_dropout::{DropoutParams, NetworkDropout};
pub use normal_drive::{DriveParams, NormalDrive};
pub use ota_trigger::OtaTrigger;
