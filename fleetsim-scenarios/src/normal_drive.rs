//! Gradual driving dynamics

use fleetsim_core::{Scenario, ScenarioContext, VehicleState};
use serde::{Deserialize, Serialize};

/// Parameters for [`NormalDrive`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DriveParams {
    /// Speed gained per tick in km/h. Applied once per invocation,
    /// independent of elapsed time.
    pub speed_increment_kmph: f64,

    /// Speed ceiling in km/h.
    pub max_speed_kmph: f64,
}

impl Default for DriveParams {
    fn default() -> Self {
        Self {
            speed_increment_kmph: 0.5,
            max_speed_kmph: 80.0,
        }
    }
}

/// Accelerates the vehicle by a fixed increment each tick up to a cap, and
/// integrates the resulting speed into the odometer.
///
/// The speed increment is deliberately per-tick rather than per-second:
/// slow tick rates produce slower acceleration in wall-clock terms. The
/// odometer, by contrast, accrues `speed * delta`.
#[derive(Debug, Clone, Default)]
pub struct NormalDrive {
    params: DriveParams,
}

impl NormalDrive {
    pub fn new(params: DriveParams) -> Self {
        Self { params }
    }
}

impl Scenario for NormalDrive {
    fn name(&self) -> &str {
        "normal_drive"
    }

    fn apply(&mut self, state: &mut VehicleState, ctx: &ScenarioContext<'_>) {
        state.speed_kmph =
            (state.speed_kmph + self.params.speed_increment_kmph).min(self.params.max_speed_kmph);
        // km/h over delta seconds
        state.advance_odometer(state.speed_kmph * ctx.delta_seconds / 3600.0);
    }
}
