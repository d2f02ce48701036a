//! Time-proportional battery drain

use fleetsim_core::{Scenario, ScenarioContext, VehicleState};
use serde::{Deserialize, Serialize};

/// Parameters for [`BatteryDrain`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DrainParams {
    /// State-of-charge percentage points lost per second of elapsed time.
    pub drain_rate_pct_per_sec: f64,
}

impl Default for DrainParams {
    fn default() -> Self {
        Self {
            drain_rate_pct_per_sec: 0.05,
        }
    }
}

/// Drains the battery proportionally to elapsed time, floored at 0 %.
#[derive(Debug, Clone, Default)]
pub struct BatteryDrain {
    params: DrainParams,
}

impl BatteryDrain {
    pub fn new(params: DrainParams) -> Self {
        Self { params }
    }
}

impl Scenario for BatteryDrain {
    fn name(&self) -> &str {
        "battery_drain"
    }

    fn apply(&mut self, state: &mut VehicleState, ctx: &ScenarioContext<'_>) {
        let drain = self.params.drain_rate_pct_per_sec * ctx.delta_seconds;
        state.set_battery_soc(state.battery_soc_pct - drain);
    }
}
