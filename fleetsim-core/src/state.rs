//! Mutable per-vehicle state snapshot
//!
//! One `VehicleState` exists per simulated vehicle, owned exclusively by
//! that vehicle's simulation loop. Scenarios mutate it in sequence on every
//! tick; the loop reads it to decide whether and what to emit.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The complete mutable state of one simulated vehicle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VehicleState {
    // === Identity (immutable after creation) ===
    pub vehicle_id: String,
    pub vendor: String,

    // === Kinematics ===
    /// Current speed in km/h
    pub speed_kmph: f64,

    // === Power ===
    /// Battery state of charge, always within [0, 100]
    pub battery_soc_pct: f64,

    /// Battery pack temperature; `None` when the sensor reading is absent
    pub battery_temp_c: Option<f64>,

    /// Motor temperature; `None` when the sensor reading is absent
    pub motor_temp_c: Option<f64>,

    // === Cumulative ===
    /// Total distance travelled in km, monotonically non-decreasing
    pub odometer_km: f64,

    // === Connectivity ===
    /// Whether the vehicle currently has network connectivity
    pub online: bool,

    /// Observed packet loss percentage (100.0 while offline)
    pub packet_loss_pct: f64,

    /// Signal strength in dBm (-120 while offline)
    pub signal_strength: i32,

    // === Framing ===
    /// Incremented by the simulation loop exactly once per emitted message.
    /// Never advances on skipped (offline) ticks.
    pub sequence_number: u64,

    // === Timing ===
    /// Wall-clock time of the most recent tick; `None` before the first tick
    pub last_timestamp: Option<DateTime<Utc>>,
}

impl VehicleState {
    /// Create a fresh vehicle state with healthy connectivity and no
    /// accumulated readings.
    pub fn new(vehicle_id: impl Into<String>, vendor: impl Into<String>) -> Self {
        Self {
            vehicle_id: vehicle_id.into(),
            vendor: vendor.into(),
            speed_kmph: 0.0,
            battery_soc_pct: 100.0,
            battery_temp_c: None,
            motor_temp_c: None,
            odometer_km: 0.0,
            online: true,
            packet_loss_pct: 0.1,
            signal_strength: -70,
            sequence_number: 0,
            last_timestamp: None,
        }
    }

    /// Set the battery state of charge, clamping to [0, 100].
    pub fn set_battery_soc(&mut self, pct: f64) {
        self.battery_soc_pct = pct.clamp(0.0, 100.0);
    }

    /// Advance the odometer. Negative increments are ignored so the
    /// odometer never decreases.
    pub fn advance_odometer(&mut self, km: f64) {
        if km > 0.0 {
            self.odometer_km += km;
        }
    }
}
