//! Stochastic network dropout and recovery

use crate::bounds::Bounds;
use chrono::{DateTime, Utc};
use fleetsim_core::{Scenario, ScenarioContext, VehicleState};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Packet loss reported while the vehicle is offline.
const OFFLINE_PACKET_LOSS_PCT: f64 = 100.0;

/// Signal strength reported while the vehicle is offline, in dBm.
const OFFLINE_SIGNAL_STRENGTH: i32 = -120;

/// Parameters for [`NetworkDropout`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DropoutParams {
    /// Per-tick probability of an online vehicle losing connectivity.
    pub probability: f64,

    /// Seconds a dropout lasts before the vehicle reconnects.
    pub max_offline_secs: f64,

    /// Packet loss drawn on reconnection.
    pub recovered_packet_loss_pct: Bounds<f64>,

    /// Signal strength drawn on reconnection, in dBm.
    pub recovered_signal_strength: Bounds<i32>,
}

impl Default for DropoutParams {
    fn default() -> Self {
        Self {
            probability: 0.02,
            max_offline_secs: 20.0,
            recovered_packet_loss_pct: Bounds::new(0.1, 1.0),
            recovered_signal_strength: Bounds::new(-85, -65),
        }
    }
}

/// Flips vehicles offline with a fixed per-tick probability and brings
/// them back after a bounded outage.
///
/// While offline the scenario forces degraded connectivity readings; on
/// reconnection it draws fresh values from the recovered ranges. A tick
/// performs at most one transition: the dropout draw and the recovery
/// check are mutually exclusive branches, so a vehicle can never flip
/// twice within the same tick.
#[derive(Debug)]
pub struct NetworkDropout {
    params: DropoutParams,
    rng: StdRng,
    /// When the current outage started; `None` while online.
    offline_since: Option<DateTime<Utc>>,
}

impl NetworkDropout {
    pub fn new(params: DropoutParams, seed: u64) -> Self {
        Self {
            params,
            rng: StdRng::seed_from_u64(seed),
            offline_since: None,
        }
    }
}

impl Scenario for NetworkDropout {
    fn name(&self) -> &str {
        "network_dropout"
    }

    fn apply(&mut self, state: &mut VehicleState, _ctx: &ScenarioContext<'_>) {
        let now = state.last_timestamp.unwrap_or_else(Utc::now);

        if state.online {
            if self.rng.gen::<f64>() < self.params.probability {
                state.online = false;
                self.offline_since = Some(now);
                info!("{} lost connectivity", state.vehicle_id);
            }
            // No further mutation on the tick the dropout occurs; degraded
            // readings take effect from the next tick.
        } else {
            state.packet_loss_pct = OFFLINE_PACKET_LOSS_PCT;
            state.signal_strength = OFFLINE_SIGNAL_STRENGTH;

            let elapsed = self
                .offline_since
                .map(|since| (now - since).num_milliseconds() as f64 / 1000.0)
                .unwrap_or(0.0);

            if elapsed >= self.params.max_offline_secs {
                state.online = true;
                state.packet_loss_pct = self.params.recovered_packet_loss_pct.sample(&mut self.rng);
                state.signal_strength = self.params.recovered_signal_strength.sample(&mut self.rng);
                self.offline_since = None;
                info!(
                    "{} reconnected after {:.1}s (packet loss {:.2}%, signal {} dBm)",
                    state.vehicle_id, elapsed, state.packet_loss_pct, state.signal_strength
                );
            } else {
                debug!("{} still offline ({:.1}s elapsed)", state.vehicle_id, elapsed);
            }
        }
    }
}
