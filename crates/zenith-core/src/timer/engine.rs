//! Focus timer engine.
//!
//! The engine is a wall-clock-based state machine. It keeps the instant the
//! current interval started and derives everything else from `now`; there is
//! no tick counter and no internal thread. Every query takes the current
//! instant, so a missed redraw never skews the countdown.
//!
//! ## State Transitions
//!
//! ```text
//! Idle --start--> Focusing --(time up)--> FocusComplete --start_break--> OnBreak
//!   ^                                                                      |
//!   |                                                                  (time up)
//!   |                                                                      v
//!   +------------------- stop (from any phase) ---------------------- BreakComplete
//!                                                                          |
//!                      Focusing <--------- start_next_focus --------------+
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = TimerEngine::new(TimerLimits::default());
//! engine.start("Essay", 25, 5, now)?;
//! // On every redraw:
//! engine.poll(now); // Returns Some(TimerEvent) when an interval runs out
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::TimerConfig;
use crate::error::TimerError;
use crate::events::TimerEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Idle,
    Focusing,
    /// Focus interval ran out; only `start_break` or `stop` leave it.
    FocusComplete,
    OnBreak,
    /// Break ran out; only `start_next_focus` or `stop` leave it.
    BreakComplete,
}

impl Phase {
    /// True while a countdown is live and the display needs regular redraws.
    pub fn is_counting(self) -> bool {
        matches!(self, Phase::Focusing | Phase::OnBreak)
    }
}

/// Inclusive minute range accepted for one kind of interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DurationBounds {
    pub min: u32,
    pub max: u32,
}

impl DurationBounds {
    pub fn contains(&self, minutes: u32) -> bool {
        (self.min..=self.max).contains(&minutes)
    }

    fn check(&self, field: &'static str, minutes: u32) -> Result<u32, TimerError> {
        if self.contains(minutes) {
            Ok(minutes)
        } else {
            Err(TimerError::InvalidDuration {
                field,
                minutes,
                min: self.min,
                max: self.max,
            })
        }
    }
}

/// Focus and break bounds are independent domains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerLimits {
    pub focus: DurationBounds,
    pub rest: DurationBounds,
}

impl Default for TimerLimits {
    fn default() -> Self {
        Self {
            focus: DurationBounds { min: 5, max: 120 },
            rest: DurationBounds { min: 5, max: 30 },
        }
    }
}

impl From<&TimerConfig> for TimerLimits {
    fn from(cfg: &TimerConfig) -> Self {
        Self {
            focus: DurationBounds {
                min: cfg.min_focus_minutes,
                max: cfg.max_focus_minutes,
            },
            rest: DurationBounds {
                min: cfg.min_break_minutes,
                max: cfg.max_break_minutes,
            },
        }
    }
}

/// Raw timer state. The stored phase can lag behind the clock; use
/// [`TimerEngine::phase_at`] for the effective one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerState {
    pub phase: Phase,
    /// Instant the current interval started.
    pub started_at: Option<DateTime<Utc>>,
    pub focus_duration_secs: u64,
    pub break_duration_secs: u64,
    pub task_label: String,
}

impl Default for TimerState {
    fn default() -> Self {
        Self {
            phase: Phase::Idle,
            started_at: None,
            focus_duration_secs: 0,
            break_duration_secs: 0,
            task_label: String::new(),
        }
    }
}

/// Point-in-time view of the engine, ready for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerSnapshot {
    pub phase: Phase,
    pub task_label: String,
    /// Whole seconds left, rounded up, never negative.
    pub remaining_secs: u64,
    pub total_secs: u64,
    /// 0.0 .. 1.0 progress within the current interval.
    pub progress: f64,
    pub focus_minutes: u32,
    pub break_minutes: u32,
}

/// Core timer engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerEngine {
    limits: TimerLimits,
    state: TimerState,
}

impl Default for TimerEngine {
    fn default() -> Self {
        Self::new(TimerLimits::default())
    }
}

impl TimerEngine {
    pub fn new(limits: TimerLimits) -> Self {
        Self {
            limits,
            state: TimerState::default(),
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> &TimerState {
        &self.state
    }

    pub fn limits(&self) -> TimerLimits {
        self.limits
    }

    pub fn task_label(&self) -> &str {
        &self.state.task_label
    }

    /// Effective phase at `now`, including completions not yet polled.
    pub fn phase_at(&self, now: DateTime<Utc>) -> Phase {
        match self.state.phase {
            Phase::Focusing if self.remaining_ms_at(now) <= 0 => Phase::FocusComplete,
            Phase::OnBreak if self.remaining_ms_at(now) <= 0 => Phase::BreakComplete,
            phase => phase,
        }
    }

    /// Length of the interval the stored phase belongs to.
    pub fn current_duration_secs(&self) -> u64 {
        match self.state.phase {
            Phase::Idle => 0,
            Phase::Focusing | Phase::FocusComplete => self.state.focus_duration_secs,
            Phase::OnBreak | Phase::BreakComplete => self.state.break_duration_secs,
        }
    }

    pub fn elapsed_ms_at(&self, now: DateTime<Utc>) -> i64 {
        self.state
            .started_at
            .map(|start| (now - start).num_milliseconds().max(0))
            .unwrap_or(0)
    }

    /// `duration - (now - start)`; negative once the interval is overdue.
    pub fn remaining_ms_at(&self, now: DateTime<Utc>) -> i64 {
        if self.state.phase == Phase::Idle {
            return 0;
        }
        let total_ms = self.current_duration_secs().saturating_mul(1000) as i64;
        total_ms - self.elapsed_ms_at(now)
    }

    /// Remaining whole seconds, rounded up. Zero or negative when overdue.
    pub fn remaining_secs_at(&self, now: DateTime<Utc>) -> i64 {
        let ms = self.remaining_ms_at(now);
        -((-ms).div_euclid(1000))
    }

    /// 0.0 .. 1.0 progress within the current interval.
    pub fn progress_at(&self, now: DateTime<Utc>) -> f64 {
        let total_ms = self.current_duration_secs().saturating_mul(1000);
        if total_ms == 0 {
            return 0.0;
        }
        (self.elapsed_ms_at(now) as f64 / total_ms as f64).clamp(0.0, 1.0)
    }

    pub fn snapshot(&self, now: DateTime<Utc>) -> TimerSnapshot {
        TimerSnapshot {
            phase: self.phase_at(now),
            task_label: self.state.task_label.clone(),
            remaining_secs: self.remaining_secs_at(now).max(0) as u64,
            total_secs: self.current_duration_secs(),
            progress: self.progress_at(now),
            focus_minutes: (self.state.focus_duration_secs / 60) as u32,
            break_minutes: (self.state.break_duration_secs / 60) as u32,
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Begin a focus interval. Only valid from `Idle`; otherwise a no-op.
    ///
    /// # Errors
    ///
    /// Returns `InvalidDuration` when either duration is outside its bounds.
    /// The engine stays `Idle`.
    pub fn start(
        &mut self,
        task_label: &str,
        focus_minutes: u32,
        break_minutes: u32,
        now: DateTime<Utc>,
    ) -> Result<Option<TimerEvent>, TimerError> {
        if self.state.phase != Phase::Idle {
            return Ok(None);
        }
        let focus = self.limits.focus.check("Focus", focus_minutes)?;
        let rest = self.limits.rest.check("Break", break_minutes)?;

        self.state = TimerState {
            phase: Phase::Focusing,
            started_at: Some(now),
            focus_duration_secs: u64::from(focus) * 60,
            break_duration_secs: u64::from(rest) * 60,
            task_label: task_label.to_string(),
        };
        Ok(Some(TimerEvent::FocusStarted {
            task_label: self.state.task_label.clone(),
            duration_secs: self.state.focus_duration_secs,
            at: now,
        }))
    }

    /// Commit any completion that happened since the last query.
    /// Returns the completion event exactly once.
    pub fn poll(&mut self, now: DateTime<Utc>) -> Option<TimerEvent> {
        let effective = self.phase_at(now);
        if effective == self.state.phase {
            return None;
        }
        self.state.phase = effective;
        match effective {
            Phase::FocusComplete => Some(TimerEvent::FocusCompleted {
                task_label: self.state.task_label.clone(),
                break_minutes: (self.state.break_duration_secs / 60) as u32,
                at: now,
            }),
            Phase::BreakComplete => Some(TimerEvent::BreakCompleted { at: now }),
            _ => None,
        }
    }

    /// FocusComplete -> OnBreak. No-op in any other phase.
    pub fn start_break(&mut self, now: DateTime<Utc>) -> Option<TimerEvent> {
        if self.phase_at(now) != Phase::FocusComplete {
            return None;
        }
        self.state.phase = Phase::OnBreak;
        self.state.started_at = Some(now);
        Some(TimerEvent::BreakStarted {
            duration_secs: self.state.break_duration_secs,
            at: now,
        })
    }

    /// BreakComplete -> Focusing with the same label and focus length.
    pub fn start_next_focus(&mut self, now: DateTime<Utc>) -> Option<TimerEvent> {
        if self.phase_at(now) != Phase::BreakComplete {
            return None;
        }
        self.state.phase = Phase::Focusing;
        self.state.started_at = Some(now);
        Some(TimerEvent::FocusStarted {
            task_label: self.state.task_label.clone(),
            duration_secs: self.state.focus_duration_secs,
            at: now,
        })
    }

    /// Abort from any phase. Stopping while `Idle` is a no-op.
    pub fn stop(&mut self, now: DateTime<Utc>) -> Option<TimerEvent> {
        if self.state.phase == Phase::Idle {
            return None;
        }
        let from = self.phase_at(now);
        self.state = TimerState::default();
        Some(TimerEvent::TimerStopped { from, at: now })
    }
}
