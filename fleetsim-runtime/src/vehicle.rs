//! Per-vehicle simulation loop
//!
//! Each vehicle owns its state, its ordered scenario sequence, its OTA
//! client and its emitter; vehicles share nothing mutable with each other.
//! `run()` drives ticks at a fixed cadence; `tick()` is exposed separately
//! so tests can step a vehicle without sleeping.

use crate::ota::OtaClient;
use chrono::Utc;
use fleetsim_core::{build_message, Scenario, ScenarioContext, TelemetryEmitter, VehicleState};
use std::time::Duration;
use tracing::{debug, info, warn};

pub struct Vehicle {
    state: VehicleState,
    scenarios: Vec<Box<dyn Scenario>>,
    emitter: Box<dyn TelemetryEmitter>,
    ota: OtaClient,
    tick_interval: Duration,
}

impl Vehicle {
    pub fn new(
        state: VehicleState,
        scenarios: Vec<Box<dyn Scenario>>,
        emitter: Box<dyn TelemetryEmitter>,
        ota: OtaClient,
        tick_interval: Duration,
    ) -> Self {
        Self {
            state,
            scenarios,
            emitter,
            ota,
            tick_interval,
        }
    }

    pub fn state(&self) -> &VehicleState {
        &self.state
    }

    pub fn ota(&self) -> &OtaClient {
        &self.ota
    }

    /// Drive the simulation loop until the process exits.
    pub async fn run(mut self) {
        info!(
            "{} loop started ({} scenarios, tick every {:?})",
            self.state.vehicle_id,
            self.scenarios.len(),
            self.tick_interval
        );
        loop {
            self.tick().await;
            tokio::time::sleep(self.tick_interval).await;
        }
    }

    /// One simulation iteration: advance time, apply scenarios in order,
    /// then emit unless offline.
    pub async fn tick(&mut self) {
        let now = Utc::now();
        let delta_seconds = self
            .state
            .last_timestamp
            .map(|prev| ((now - prev).num_milliseconds() as f64 / 1000.0).max(0.0))
            .unwrap_or(0.0);
        self.state.last_timestamp = Some(now);

        for scenario in &mut self.scenarios {
            let ctx = ScenarioContext {
                delta_seconds,
                ota: &self.ota,
            };
            scenario.apply(&mut self.state, &ctx);
        }

        // Offline ticks emit nothing and leave the sequence number alone
        if !self.state.online {
            debug!("{} offline, skipping emission", self.state.vehicle_id);
            return;
        }

        self.state.sequence_number += 1;
        let message = build_message(&self.state);
        if let Err(e) = self.emitter.emit(&message).await {
            // The message is dropped; the sequence number is not rolled back
            warn!(
                "{} emit failed (seq {}): {:#}",
                self.state.vehicle_id, message.connection.sequence_number, e
            );
        }
    }
}
