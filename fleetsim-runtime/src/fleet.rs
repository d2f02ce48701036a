//! Fleet composition and supervision
//!
//! Builds one `Vehicle` per configuration entry and runs each on its own
//! tokio task. Vehicles never share mutable state, so a failing task is
//! logged and the rest of the fleet keeps ticking.

use crate::config::{FleetConfig, ScenarioKind, VehicleConfig};
use crate::emitters::create_emitter;
use crate::ota::OtaClient;
use crate::vehicle::Vehicle;
use anyhow::{Context, Result};
use fleetsim_core::Scenario;
use fleetsim_scenarios::{BatteryDrain, NetworkDropout, NormalDrive, OtaTrigger};
use std::time::Duration;
use tokio::task::JoinSet;
use tracing::{error, info, warn};

/// Stride between per-vehicle seeds (golden-ratio increment).
const SEED_STRIDE: u64 = 0x9E37_79B9_7F4A_7C15;

/// Run the whole fleet until the process exits.
///
/// An empty vehicle list is reported and returns immediately; it is not an
/// error.
pub async fn run(config: FleetConfig, base_seed: u64) -> Result<()> {
    if config.vehicles.is_empty() {
        warn!("no vehicles configured; nothing to simulate");
        return Ok(());
    }

    info!(
        "starting fleet of {} vehicles (base seed {})",
        config.vehicles.len(),
        base_seed
    );

    let tick_interval = Duration::from_secs_f64(config.simulation.tick_interval_secs);
    let mut tasks = JoinSet::new();
    for (index, vehicle_config) in config.vehicles.iter().enumerate() {
        let seed = vehicle_seed(base_seed, index);
        let vehicle = build_vehicle(&config, vehicle_config, seed, tick_interval)
            .with_context(|| format!("unable to build vehicle {}", vehicle_config.vehicle_id))?;
        tasks.spawn(vehicle.run());
    }

    // Vehicle loops never return; join_next only yields when a task panics.
    while let Some(result) = tasks.join_next().await {
        if let Err(e) = result {
            error!("vehicle task aborted: {}; fleet continues", e);
        }
    }

    Ok(())
}

fn vehicle_seed(base_seed: u64, index: usize) -> u64 {
    base_seed.wrapping_add((index as u64 + 1).wrapping_mul(SEED_STRIDE))
}

fn build_vehicle(
    config: &FleetConfig,
    vehicle_config: &VehicleConfig,
    seed: u64,
    tick_interval: Duration,
) -> Result<Vehicle> {
    let state = vehicle_config.initial_state();
    let emitter = create_emitter(&config.emitter)?;
    let ota = OtaClient::new(&vehicle_config.vehicle_id, config.ota.clone(), seed);
    let scenarios = build_scenarios(config, seed);
    Ok(Vehicle::new(state, scenarios, emitter, ota, tick_interval))
}

/// Instantiate the configured scenario sequence, preserving order. Each
/// stochastic scenario gets its own seed derived from the vehicle's.
fn build_scenarios(config: &FleetConfig, vehicle_seed: u64) -> Vec<Box<dyn Scenario>> {
    config
        .simulation
        .scenarios
        .iter()
        .enumerate()
        .map(|(slot, kind)| {
            let scenario_seed = vehicle_seed.wrapping_add(slot as u64 + 1);
            match kind {
                ScenarioKind::Drive => {
                    Box::new(NormalDrive::new(config.drive)) as Box<dyn Scenario>
                }
                ScenarioKind::Battery => Box::new(BatteryDrain::new(config.battery)),
                ScenarioKind::Ota => Box::new(OtaTrigger::new(
                    config.ota.trigger_probability,
                    scenario_seed,
                )),
                ScenarioKind::Dropout => {
                    Box::new(NetworkDropout::new(config.dropout, scenario_seed))
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn empty_fleet_returns_immediately() {
        let config = FleetConfig::default();
        run(config, 1).await.expect("empty fleet is not an error");
    }

    #[test]
    fn scenario_sequence_preserves_configured_order() {
        let mut config = FleetConfig::default();
        config.simulation.scenarios = vec![
            ScenarioKind::Dropout,
            ScenarioKind::Drive,
            ScenarioKind::Battery,
        ];
        let scenarios = build_scenarios(&config, 7);
        let names: Vec<_> = scenarios.iter().map(|s| s.name()).collect();
        assert_eq!(names, vec!["network_dropout", "normal_drive", "battery_drain"]);
    }

    #[test]
    fn vehicle_seeds_differ_per_vehicle() {
        let a = vehicle_seed(1, 0);
        let b = vehicle_seed(1, 1);
        assert_ne!(a, b);
    }
}
