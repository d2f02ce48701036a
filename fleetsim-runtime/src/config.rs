//! Fleet configuration
//!
//! TOML-backed configuration for the whole simulation. Every section is
//! optional and falls back to documented defaults, so an empty file is a
//! valid (if vehicle-less) configuration. Validation runs once at startup
//! and fails fast; nothing is re-validated mid-simulation.

use crate::emitters::EmitterConfig;
use crate::ota::OtaSettings;
use anyhow::{Context, Result};
use fleetsim_core::VehicleState;
use fleetsim_scenarios::{Bounds, DrainParams, DriveParams, DropoutParams};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;

/// A configuration value rejected at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} must be within [0, 1], got {value}")]
    ProbabilityOutOfRange { name: &'static str, value: f64 },

    #[error("{name} must be non-negative, got {value}")]
    NegativeValue { name: &'static str, value: f64 },

    #[error("tick interval must be positive and finite, got {0}")]
    InvalidTickInterval(f64),

    #[error("{name} has min {min} greater than max {max}")]
    UnorderedRange {
        name: &'static str,
        min: f64,
        max: f64,
    },

    #[error("http emitter timeout must be positive, got {0}")]
    InvalidEmitterTimeout(f64),

    #[error("vehicle at index {0} has an empty vehicle_id")]
    EmptyVehicleId(usize),

    #[error("duplicate vehicle_id {0:?}")]
    DuplicateVehicleId(String),
}

/// Which scenarios run, and in which order, on every vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioKind {
    Drive,
    Battery,
    Ota,
    Dropout,
}

/// Named initial-condition presets for a vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum VehiclePreset {
    #[default]
    Standard,
    LowBattery,
    ColdClimate,
    HotClimate,
    /// Both temperature sensors report no reading
    DegradedSensors,
}

/// One `[[vehicles]]` entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VehicleConfig {
    pub vehicle_id: String,

    #[serde(default = "default_vendor")]
    pub vendor: String,

    #[serde(default)]
    pub preset: VehiclePreset,

    /// Odometer reading at simulation start, in km
    #[serde(default)]
    pub odometer_km: f64,
}

impl VehicleConfig {
    /// Build the initial state for this vehicle, applying its preset.
    pub fn initial_state(&self) -> VehicleState {
        let mut state = VehicleState::new(&self.vehicle_id, &self.vendor);
        state.odometer_km = self.odometer_km.max(0.0);

        let (soc, battery_temp, motor_temp) = match self.preset {
            VehiclePreset::Standard => (90.0, Some(30.0), Some(35.0)),
            VehiclePreset::LowBattery => (15.0, Some(30.0), Some(35.0)),
            VehiclePreset::ColdClimate => (80.0, Some(-5.0), Some(5.0)),
            VehiclePreset::HotClimate => (90.0, Some(45.0), Some(55.0)),
            VehiclePreset::DegradedSensors => (90.0, None, None),
        };
        state.set_battery_soc(soc);
        state.battery_temp_c = battery_temp;
        state.motor_temp_c = motor_temp;
        state
    }
}

/// The `[simulation]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Seconds between ticks
    #[serde(default = "default_tick_interval_secs")]
    pub tick_interval_secs: f64,

    /// Base RNG seed; absent means OS entropy (the chosen seed is logged)
    #[serde(default)]
    pub seed: Option<u64>,

    /// Per-vehicle scenario sequence; order is significant
    #[serde(default = "default_scenario_order")]
    pub scenarios: Vec<ScenarioKind>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            tick_interval_secs: default_tick_interval_secs(),
            seed: None,
            scenarios: default_scenario_order(),
        }
    }
}

fn default_tick_interval_secs() -> f64 {
    1.0
}

fn default_scenario_order() -> Vec<ScenarioKind> {
    vec![
        ScenarioKind::Drive,
        ScenarioKind::Battery,
        ScenarioKind::Ota,
        ScenarioKind::Dropout,
    ]
}

fn default_vendor() -> String {
    "SIMULATED".to_string()
}

/// Complete fleet configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FleetConfig {
    #[serde(default)]
    pub simulation: SimulationConfig,

    #[serde(default)]
    pub drive: DriveParams,

    #[serde(default)]
    pub battery: DrainParams,

    #[serde(default)]
    pub dropout: DropoutParams,

    #[serde(default)]
    pub ota: OtaSettings,

    #[serde(default)]
    pub emitter: EmitterConfig,

    #[serde(default)]
    pub vehicles: Vec<VehicleConfig>,
}

impl FleetConfig {
    /// Load and validate a fleet configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("unable to read fleet config {}", path.display()))?;
        let config: FleetConfig = toml::from_str(&raw)
            .with_context(|| format!("invalid fleet config {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// The built-in demo fleet: `count` standard vehicles against the
    /// stdout emitter.
    pub fn default_fleet(count: usize) -> Self {
        let vehicles = (0..count)
            .map(|i| VehicleConfig {
                vehicle_id: format!("EV-{}", i),
                vendor: default_vendor(),
                preset: VehiclePreset::Standard,
                odometer_km: 1000.0,
            })
            .collect();
        Self {
            vehicles,
            ..Self::default()
        }
    }

    /// Reject out-of-range values before any vehicle starts ticking.
    ///
    /// An empty vehicle list is deliberately NOT an error; the fleet
    /// runner reports it and does nothing.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let tick = self.simulation.tick_interval_secs;
        if !(tick.is_finite() && tick > 0.0) {
            return Err(ConfigError::InvalidTickInterval(tick));
        }

        check_probability("dropout.probability", self.dropout.probability)?;
        check_probability("ota.trigger_probability", self.ota.trigger_probability)?;
        check_probability("ota.failure_rate", self.ota.failure_rate)?;

        check_non_negative(
            "battery.drain_rate_pct_per_sec",
            self.battery.drain_rate_pct_per_sec,
        )?;
        check_non_negative(
            "drive.speed_increment_kmph",
            self.drive.speed_increment_kmph,
        )?;
        check_non_negative("drive.max_speed_kmph", self.drive.max_speed_kmph)?;
        check_non_negative("dropout.max_offline_secs", self.dropout.max_offline_secs)?;

        check_range_f64(
            "dropout.recovered_packet_loss_pct",
            &self.dropout.recovered_packet_loss_pct,
        )?;
        let signal = &self.dropout.recovered_signal_strength;
        if !signal.is_ordered() {
            return Err(ConfigError::UnorderedRange {
                name: "dropout.recovered_signal_strength",
                min: signal.min as f64,
                max: signal.max as f64,
            });
        }

        check_range_f64("ota.download_secs", &self.ota.download_secs)?;
        check_non_negative("ota.download_secs.min", self.ota.download_secs.min)?;
        check_range_f64("ota.apply_secs", &self.ota.apply_secs)?;
        check_non_negative("ota.apply_secs.min", self.ota.apply_secs.min)?;

        if let EmitterConfig::Http { timeout_secs, .. } = &self.emitter {
            if !(timeout_secs.is_finite() && *timeout_secs > 0.0) {
                return Err(ConfigError::InvalidEmitterTimeout(*timeout_secs));
            }
        }

        let mut seen = HashSet::new();
        for (index, vehicle) in self.vehicles.iter().enumerate() {
            if vehicle.vehicle_id.trim().is_empty() {
                return Err(ConfigError::EmptyVehicleId(index));
            }
            if !seen.insert(vehicle.vehicle_id.as_str()) {
                return Err(ConfigError::DuplicateVehicleId(vehicle.vehicle_id.clone()));
            }
        }

        Ok(())
    }
}

fn check_probability(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if !(0.0..=1.0).contains(&value) || value.is_nan() {
        return Err(ConfigError::ProbabilityOutOfRange { name, value });
    }
    Ok(())
}

fn check_non_negative(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value < 0.0 || value.is_nan() {
        return Err(ConfigError::NegativeValue { name, value });
    }
    Ok(())
}

fn check_range_f64(name: &'static str, bounds: &Bounds<f64>) -> Result<(), ConfigError> {
    if !bounds.is_ordered() {
        return Err(ConfigError::UnorderedRange {
            name,
            min: bounds.min,
            max: bounds.max,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_toml_yields_documented_defaults() {
        let config: FleetConfig = toml::from_str("").expect("empty config is valid");
        assert_eq!(config.simulation.tick_interval_secs, 1.0);
        assert_eq!(config.simulation.seed, None);
        assert_eq!(config.simulation.scenarios, default_scenario_order());
        assert_eq!(config.drive.speed_increment_kmph, 0.5);
        assert_eq!(config.drive.max_speed_kmph, 80.0);
        assert_eq!(config.dropout.probability, 0.02);
        assert_eq!(config.ota.failure_rate, 0.2);
        assert!(matches!(config.emitter, EmitterConfig::Stdout));
        assert!(config.vehicles.is_empty());
        config.validate().expect("defaults must validate");
    }

    #[test]
    fn empty_vehicle_list_is_not_a_validation_error() {
        let config = FleetConfig::default();
        config.validate().expect("an empty fleet is allowed");
    }

    #[test]
    fn out_of_range_probability_is_rejected() {
        let mut config = FleetConfig::default();
        config.dropout.probability = -0.5;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ProbabilityOutOfRange { name, .. }) if name == "dropout.probability"
        ));

        config.dropout.probability = 1.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn negative_drain_rate_is_rejected() {
        let mut config = FleetConfig::default();
        config.battery.drain_rate_pct_per_sec = -0.1;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NegativeValue { .. })
        ));
    }

    #[test]
    fn unordered_duration_range_is_rejected() {
        let mut config = FleetConfig::default();
        config.ota.download_secs = Bounds::new(5.0, 1.0);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::UnorderedRange { .. })
        ));
    }

    #[test]
    fn zero_tick_interval_is_rejected() {
        let mut config = FleetConfig::default();
        config.simulation.tick_interval_secs = 0.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidTickInterval(_))
        ));
    }

    #[test]
    fn duplicate_vehicle_ids_are_rejected() {
        let mut config = FleetConfig::default_fleet(2);
        config.vehicles[1].vehicle_id = config.vehicles[0].vehicle_id.clone();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::DuplicateVehicleId(_))
        ));
    }

    #[test]
    fn presets_decode_from_snake_case() {
        let config: FleetConfig = toml::from_str(
            r#"
            [[vehicles]]
            vehicle_id = "EV-0"
            preset = "low_battery"

            [[vehicles]]
            vehicle_id = "EV-1"
            preset = "degraded_sensors"
            "#,
        )
        .expect("valid config");

        assert_eq!(config.vehicles[0].preset, VehiclePreset::LowBattery);
        assert_eq!(config.vehicles[0].vendor, "SIMULATED");
        assert_eq!(config.vehicles[1].preset, VehiclePreset::DegradedSensors);
    }

    #[test]
    fn preset_shapes_the_initial_state() {
        let vehicle = VehicleConfig {
            vehicle_id: "EV-9".into(),
            vendor: "AXLE".into(),
            preset: VehiclePreset::LowBattery,
            odometer_km: 500.0,
        };
        let state = vehicle.initial_state();
        assert_eq!(state.battery_soc_pct, 15.0);
        assert_eq!(state.battery_temp_c, Some(30.0));
        assert_eq!(state.odometer_km, 500.0);
        assert_eq!(state.sequence_number, 0);
        assert!(state.last_timestamp.is_none());

        let degraded = VehicleConfig {
            preset: VehiclePreset::DegradedSensors,
            ..vehicle
        };
        let state = degraded.initial_state();
        assert!(state.battery_temp_c.is_none());
        assert!(state.motor_temp_c.is_none());
    }

    #[test]
    fn scenario_order_from_config_is_preserved() {
        let config: FleetConfig = toml::from_str(
            r#"
            [simulation]
            scenarios = ["dropout", "drive"]
            "#,
        )
        .expect("valid config");
        assert_eq!(
            config.simulation.scenarios,
            vec![ScenarioKind::Dropout, ScenarioKind::Drive]
        );
    }

    #[test]
    fn load_reads_and_validates_a_file() {
        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        write!(
            file,
            r#"
            [simulation]
            tick_interval_secs = 0.5
            seed = 42

            [emitter]
            type = "http"
            url = "http://localhost:8080/api/v1/telemetry"

            [[vehicles]]
            vehicle_id = "EV-0"
            vendor = "AXLE"
            "#
        )
        .expect("write config");

        let config = FleetConfig::load(file.path()).expect("load should succeed");
        assert_eq!(config.simulation.tick_interval_secs, 0.5);
        assert_eq!(config.simulation.seed, Some(42));
        assert_eq!(config.vehicles.len(), 1);
    }

    #[test]
    fn load_rejects_an_invalid_file() {
        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        write!(
            file,
            r#"
            [dropout]
            probability = 2.0
            "#
        )
        .expect("write config");

        assert!(FleetConfig::load(file.path()).is_err());
    }
}
