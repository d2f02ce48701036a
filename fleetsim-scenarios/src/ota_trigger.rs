//! Probabilistic OTA session trigger

use fleetsim_core::{Scenario, ScenarioContext, VehicleState};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

/// Requests an OTA session start with a fixed per-tick probability.
///
/// The request goes through the [`fleetsim_core::OtaRequester`] capability
/// in the tick context and is fire-and-forget: this scenario never waits
/// for the session and never checks its phase. Deduplication of requests
/// while a session is active is the OTA client's responsibility.
#[derive(Debug)]
pub struct OtaTrigger {
    probability: f64,
    rng: StdRng,
}

impl OtaTrigger {
    pub fn new(probability: f64, seed: u64) -> Self {
        Self {
            probability,
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Scenario for OtaTrigger {
    fn name(&self) -> &str {
        "ota_trigger"
    }

    fn apply(&mut self, state: &mut VehicleState, ctx: &ScenarioContext<'_>) {
        if self.rng.gen::<f64>() < self.probability {
            debug!("{} requesting OTA session start", state.vehicle_id);
            ctx.ota.request_start();
        }
    }
}
