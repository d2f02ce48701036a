//! OTA update client
//!
//! One client per vehicle. A session is started through the
//! `OtaRequester` capability (typically from the OTA trigger scenario) and
//! then progresses on a detached task, independently of the tick loop:
//! `Idle → Downloading → Applying → {Succeeded | Failed}`.
//!
//! The phase check-and-set happens under a mutex, so at most one session is
//! ever in flight. Terminal phases are sticky: there is no reset path, and
//! later start requests are silent no-ops.

use fleetsim_core::{OtaPhase, OtaRequester};
use fleetsim_scenarios::Bounds;
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// OTA behavior parameters, shared between the trigger scenario and the
/// session driver.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OtaSettings {
    /// Per-tick probability of the trigger scenario requesting a session.
    pub trigger_probability: f64,

    /// Probability that the applying phase ends in `Failed`.
    pub failure_rate: f64,

    /// Duration of the downloading phase, drawn uniformly, in seconds.
    pub download_secs: Bounds<f64>,

    /// Duration of the applying phase, drawn uniformly, in seconds.
    pub apply_secs: Bounds<f64>,
}

impl Default for OtaSettings {
    fn default() -> Self {
        Self {
            trigger_probability: 0.01,
            failure_rate: 0.2,
            download_secs: Bounds::new(1.0, 3.0),
            apply_secs: Bounds::new(1.0, 2.0),
        }
    }
}

/// Handle to a vehicle's OTA state machine. Cheap to clone; all clones
/// observe the same session.
#[derive(Clone)]
pub struct OtaClient {
    inner: Arc<Inner>,
}

struct Inner {
    vehicle_id: String,
    settings: OtaSettings,
    phase: Mutex<OtaPhase>,
    rng: Mutex<StdRng>,
}

impl OtaClient {
    pub fn new(vehicle_id: impl Into<String>, settings: OtaSettings, seed: u64) -> Self {
        Self {
            inner: Arc::new(Inner {
                vehicle_id: vehicle_id.into(),
                settings,
                phase: Mutex::new(OtaPhase::Idle),
                rng: Mutex::new(StdRng::seed_from_u64(seed)),
            }),
        }
    }

    /// Current phase of the machine.
    pub fn phase(&self) -> OtaPhase {
        *self.inner.phase.lock()
    }

    /// Start a session. No-op unless the machine is idle; must be called
    /// from within a tokio runtime (the session runs as a detached task).
    pub fn start(&self) {
        {
            let mut phase = self.inner.phase.lock();
            if *phase != OtaPhase::Idle {
                return;
            }
            *phase = OtaPhase::Downloading;
        }
        tokio::spawn(run_session(Arc::clone(&self.inner)));
    }
}

impl OtaRequester for OtaClient {
    fn request_start(&self) {
        self.start();
    }
}

async fn run_session(inner: Arc<Inner>) {
    info!("{}: OTA session started, downloading", inner.vehicle_id);
    let download = inner.sample(&inner.settings.download_secs);
    tokio::time::sleep(Duration::from_secs_f64(download)).await;

    *inner.phase.lock() = OtaPhase::Applying;
    info!("{}: OTA applying update", inner.vehicle_id);
    let apply = inner.sample(&inner.settings.apply_secs);
    tokio::time::sleep(Duration::from_secs_f64(apply)).await;

    let failed = inner.rng.lock().gen::<f64>() < inner.settings.failure_rate;
    let terminal = if failed {
        OtaPhase::Failed
    } else {
        OtaPhase::Succeeded
    };
    *inner.phase.lock() = terminal;
    info!("{}: OTA session finished: {}", inner.vehicle_id, terminal);
}

impl Inner {
    fn sample(&self, bounds: &Bounds<f64>) -> f64 {
        bounds.sample(&mut *self.rng.lock())
    }
}
