//! Telemetry message shape and builder
//!
//! Defines the wire-level message every emitter receives. The shape is
//! transport-agnostic: nested `telemetry` and `connection` sections under a
//! versioned envelope, with ISO-8601 UTC timestamps.
//!
//! Optional sensor readings serialize as JSON `null` when absent (never
//! omitted), so downstream schema validation sees a stable field set.

use crate::state::VehicleState;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Version tag stamped on every outgoing message.
pub const SCHEMA_VERSION: &str = "1.0";

/// One complete telemetry message, built from a vehicle state snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryMessage {
    pub schema_version: String,
    pub vehicle_id: String,
    pub vendor: String,

    /// Wall-clock time of the tick that produced this reading
    pub timestamp: DateTime<Utc>,

    /// Wall-clock time of message construction
    pub ingestion_ts: DateTime<Utc>,

    pub telemetry: TelemetrySection,
    pub connection: ConnectionSection,
}

/// Sensor readings captured at the tick.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetrySection {
    pub speed_kmph: f64,
    pub battery_soc_pct: f64,
    pub battery_temp_c: Option<f64>,
    pub motor_temp_c: Option<f64>,
    pub odometer_km: f64,
}

/// Connectivity metadata for the emitting vehicle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionSection {
    pub packet_loss_pct: f64,
    pub signal_strength: i32,
    pub sequence_number: u64,
    /// Always false: heartbeat frames are a separate concern this
    /// simulator does not produce.
    pub is_heartbeat: bool,
}

/// Build a telemetry message from a vehicle state snapshot.
///
/// Pure read: the caller (the simulation loop) increments
/// `sequence_number` before calling; the builder only copies the already
/// incremented value. `last_timestamp` is always set by the loop before any
/// message is built; the `Utc::now()` fallback only matters for states that
/// never ticked.
pub fn build_message(state: &VehicleState) -> TelemetryMessage {
    TelemetryMessage {
        schema_version: SCHEMA_VERSION.to_string(),
        vehicle_id: state.vehicle_id.clone(),
        vendor: state.vendor.clone(),
        timestamp: state.last_timestamp.unwrap_or_else(Utc::now),
        ingestion_ts: Utc::now(),
        telemetry: TelemetrySection {
            speed_kmph: state.speed_kmph,
            battery_soc_pct: state.battery_soc_pct,
            battery_temp_c: state.battery_temp_c,
            motor_temp_c: state.motor_temp_c,
            odometer_km: state.odometer_km,
        },
        connection: ConnectionSection {
            packet_loss_pct: state.packet_loss_pct,
            signal_strength: state.signal_strength,
            sequence_number: state.sequence_number,
            is_heartbeat: false,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_state() -> VehicleState {
        let mut state = VehicleState::new("EV-7", "AXLE");
        state.speed_kmph = 42.0;
        state.battery_soc_pct = 77.5;
        state.battery_temp_c = Some(31.0);
        state.motor_temp_c = Some(36.5);
        state.odometer_km = 1234.5;
        state.sequence_number = 9;
        state.last_timestamp = Some(Utc::now());
        state
    }

    #[test]
    fn builder_copies_state_without_mutating_it() {
        let state = sample_state();
        let message = build_message(&state);

        assert_eq!(message.schema_version, SCHEMA_VERSION);
        assert_eq!(message.vehicle_id, "EV-7");
        assert_eq!(message.vendor, "AXLE");
        assert_eq!(message.telemetry.speed_kmph, 42.0);
        assert_eq!(message.telemetry.odometer_km, 1234.5);
        assert_eq!(message.connection.sequence_number, 9);
        assert!(!message.connection.is_heartbeat);
        // The builder reads the sequence number, it does not advance it
        assert_eq!(state.sequence_number, 9);
    }

    #[test]
    fn absent_temperatures_serialize_as_null() {
        let mut state = sample_state();
        state.battery_temp_c = None;
        state.motor_temp_c = None;

        let json = serde_json::to_value(build_message(&state)).expect("message should serialize");
        assert!(
            json["telemetry"]["battery_temp_c"].is_null(),
            "absent battery temperature must serialize as null, not be omitted"
        );
        assert!(json["telemetry"]["motor_temp_c"].is_null());
        assert_eq!(json["telemetry"]["speed_kmph"], 42.0);
    }

    #[test]
    fn message_round_trips_through_json() {
        let message = build_message(&sample_state());
        let json = serde_json::to_string(&message).expect("message should serialize");
        let parsed: TelemetryMessage =
            serde_json::from_str(&json).expect("message should deserialize");
        assert_eq!(parsed.vehicle_id, message.vehicle_id);
        assert_eq!(
            parsed.connection.sequence_number,
            message.connection.sequence_number
        );
    }

    #[test]
    fn timestamp_comes_from_the_tick_not_from_construction() {
        let mut state = sample_state();
        let tick_ts = "2026-01-05T12:00:00Z".parse().unwrap();
        state.last_timestamp = Some(tick_ts);
        let message = build_message(&state);
        assert_eq!(message.timestamp, tick_ts);
        assert!(message.ingestion_ts >= tick_ts);
    }
}
