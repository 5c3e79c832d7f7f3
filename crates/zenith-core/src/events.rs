use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::Phase;

/// Every timer state change produces a TimerEvent.
/// The session logs them and turns completions into notices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TimerEvent {
    FocusStarted {
        task_label: String,
        duration_secs: u64,
        at: DateTime<Utc>,
    },
    /// Focus interval ran out; waiting for the user to take the break.
    FocusCompleted {
        task_label: String,
        break_minutes: u32,
        at: DateTime<Utc>,
    },
    BreakStarted {
        duration_secs: u64,
        at: DateTime<Utc>,
    },
    /// Break ran out; waiting for the user to start the next focus.
    BreakCompleted {
        at: DateTime<Utc>,
    },
    TimerStopped {
        from: Phase,
        at: DateTime<Utc>,
    },
}
