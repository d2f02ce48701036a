//! Telemetry emitter trait definition

use crate::message::TelemetryMessage;
use anyhow::Result;
use async_trait::async_trait;

/// Trait for telemetry sinks.
///
/// The simulation loop hands every finished message to exactly one emitter
/// and awaits the call, so implementations must bound their own latency
/// (e.g. an HTTP emitter sets a request timeout). Delivery is at-most-once:
/// a failed emit is reported via `Err`, the message is dropped and never
/// retried, and the loop carries on. Failures must therefore be cheap to
/// produce and must not panic.
#[async_trait]
pub trait TelemetryEmitter: Send {
    async fn emit(&mut self, message: &TelemetryMessage) -> Result<()>;
}
