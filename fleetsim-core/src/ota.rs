//! OTA update lifecycle phases

use serde::{Deserialize, Serialize};
use std::fmt;

/// Phase of a simulated over-the-air update session.
///
/// Transitions: `Idle → Downloading → Applying → {Succeeded | Failed}`.
/// The terminal phases are sticky: once a session settles there is no
/// reset path, so a vehicle undergoes at most one OTA cycle per run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OtaPhase {
    Idle,
    Downloading,
    Applying,
    Succeeded,
    Failed,
}

impl OtaPhase {
    /// Whether this phase ends the session.
    pub fn is_terminal(self) -> bool {
        matches!(self, OtaPhase::Succeeded | OtaPhase::Failed)
    }

    /// Whether a session is currently progressing.
    pub fn is_in_flight(self) -> bool {
        matches!(self, OtaPhase::Downloading | OtaPhase::Applying)
    }
}

impl fmt::Display for OtaPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            OtaPhase::Idle => "IDLE",
            OtaPhase::Downloading => "DOWNLOADING",
            OtaPhase::Applying => "APPLYING",
            OtaPhase::Succeeded => "SUCCESS",
            OtaPhase::Failed => "FAILED",
        };
        f.write_str(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_phases_are_exactly_success_and_failed() {
        assert!(OtaPhase::Succeeded.is_terminal());
        assert!(OtaPhase::Failed.is_terminal());
        assert!(!OtaPhase::Idle.is_terminal());
        assert!(!OtaPhase::Downloading.is_terminal());
        assert!(!OtaPhase::Applying.is_terminal());
    }

    #[test]
    fn in_flight_covers_the_two_active_phases() {
        assert!(OtaPhase::Downloading.is_in_flight());
        assert!(OtaPhase::Applying.is_in_flight());
        assert!(!OtaPhase::Idle.is_in_flight());
        assert!(!OtaPhase::Succeeded.is_in_flight());
    }
}
