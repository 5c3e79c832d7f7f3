//! Breathing reset pacing: an 8-second inhale/hold/exhale loop over a
//! 60-second session, derived from the time since the overlay opened.

use serde::{Deserialize, Serialize};

pub const CYCLE_MS: i64 = 8_000;
pub const RESET_SECS: i64 = 60;

const INHALE_END_MS: i64 = CYCLE_MS * 45 / 100;
const HOLD_END_MS: i64 = CYCLE_MS * 60 / 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BreathCue {
    Inhale,
    Hold,
    Exhale,
}

impl BreathCue {
    pub fn at(elapsed_ms: i64) -> Self {
        let offset = elapsed_ms.max(0) % CYCLE_MS;
        if offset < INHALE_END_MS {
            BreathCue::Inhale
        } else if offset < HOLD_END_MS {
            BreathCue::Hold
        } else {
            BreathCue::Exhale
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            BreathCue::Inhale => "Inhale",
            BreathCue::Hold => "Hold",
            BreathCue::Exhale => "Exhale",
        }
    }
}

/// Seconds left in the reset, never negative.
pub fn seconds_left(elapsed_ms: i64) -> u64 {
    let left_ms = RESET_SECS * 1000 - elapsed_ms.max(0);
    (left_ms.max(0) as u64).div_ceil(1000)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cue_follows_cycle() {
        assert_eq!(BreathCue::at(0), BreathCue::Inhale);
        assert_eq!(BreathCue::at(3_599), BreathCue::Inhale);
        assert_eq!(BreathCue::at(3_600), BreathCue::Hold);
        assert_eq!(BreathCue::at(4_800), BreathCue::Exhale);
        assert_eq!(BreathCue::at(7_999), BreathCue::Exhale);
        assert_eq!(BreathCue::at(8_000), BreathCue::Inhale);
        assert_eq!(BreathCue::at(-50), BreathCue::Inhale);
    }

    #[test]
    fn countdown_stops_at_zero() {
        assert_eq!(seconds_left(0), 60);
        assert_eq!(seconds_left(500), 60);
        assert_eq!(seconds_left(59_001), 1);
        assert_eq!(seconds_left(120_000), 0);
    }
}
