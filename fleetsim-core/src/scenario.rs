//! Scenario trait definition
//!
//! A scenario is a composable state-mutation rule applied once per tick.
//! Each vehicle carries an ordered sequence of scenarios; the simulation
//! loop applies them strictly in that order, so later scenarios observe
//! the mutations of earlier ones.

use crate::state::VehicleState;

/// Capability handed to scenarios so they can request an OTA session start
/// without holding a reference back into the runtime.
///
/// Requests are fire-and-forget: the call returns immediately and the
/// session (if one starts) progresses on its own, detached from the tick
/// loop. Requesting a start while a session is already in flight or has
/// reached a terminal phase is a silent no-op.
pub trait OtaRequester: Send + Sync {
    fn request_start(&self);
}

/// Per-tick context passed to every scenario.
pub struct ScenarioContext<'a> {
    /// Seconds elapsed since the previous tick (0.0 on the first tick)
    pub delta_seconds: f64,

    /// Handle for requesting an OTA session start on the owning vehicle
    pub ota: &'a dyn OtaRequester,
}

/// Trait for behavioral scenarios.
///
/// Implementations may be stateless or carry small private state (the
/// dropout scenario tracks when it went offline). They may read and write
/// any `VehicleState` field; ordering within a vehicle's sequence is
/// significant and preserved by the loop.
pub trait Scenario: Send {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Apply this scenario's mutation for one tick.
    fn apply(&mut self, state: &mut VehicleState, ctx: &ScenarioContext<'_>);
}
