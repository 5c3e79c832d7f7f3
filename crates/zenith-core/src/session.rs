//! Session aggregate: the single owner of all mutable state.
//!
//! Every user input arrives as an [`Action`] through [`Session::dispatch`],
//! which applies it synchronously. The presentation layer then calls
//! [`Session::view`] to re-derive the whole screen. There is one session
//! per process and nothing else mutates the timer or the overlays.

use std::time::Duration;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::breathing;
use crate::checkin::CheckIn;
use crate::clock::{Clock, SystemClock};
use crate::coach::CoachChat;
use crate::config::Config;
use crate::content::{Catalog, ContentStore};
use crate::error::{ContentError, Result};
use crate::events::TimerEvent;
use crate::nav::Tab;
use crate::overlay::{Overlay, OverlayCoordinator, OverlayKind, PlaceholderKind};
use crate::router::{self, RenderContext};
use crate::settings::{ProfileSettings, SettingKey};
use crate::sleep::SleepEntry;
use crate::timer::{TimerEngine, TimerLimits};
use crate::view::View;

/// A discrete user input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    SelectTab { tab: Tab },

    OpenBreathing,
    OpenWindDown,
    OpenEventDetails { event_id: String },
    OpenPlaceholder { placeholder: PlaceholderKind },
    CloseOverlay,

    StartFocus {
        task: String,
        focus_minutes: u32,
        break_minutes: u32,
    },
    StartBreak,
    StartNextFocus,
    StopTimer,

    Rsvp { event_id: String },
    CancelRsvp { event_id: String },

    AddGoal { text: String },
    RemoveGoal { index: usize },

    LogCheckIn {
        mood: u8,
        stress: u8,
        tags: Vec<String>,
    },
    LogSleep {
        night_of: NaiveDate,
        bed_time: NaiveTime,
        wake_time: NaiveTime,
        quality: u8,
    },
    StartWindDownTimer,
    ReadResource { resource_id: String },
    FilterResources { category: Option<String> },
    SendCoachMessage { text: String },
    ToggleSetting { key: SettingKey },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Info,
    Success,
    Warning,
}

/// Transient, non-blocking message for the user (a toast).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
    pub at: DateTime<Utc>,
}

pub struct Session<C: Clock = SystemClock> {
    config: Config,
    clock: C,
    content: ContentStore,
    timer: TimerEngine,
    overlays: OverlayCoordinator,
    tab: Tab,
    check_ins: Vec<CheckIn>,
    sleep_log: Vec<SleepEntry>,
    coach: CoachChat,
    settings: ProfileSettings,
    resource_filter: Option<String>,
    notices: Vec<Notice>,
}

impl Session<SystemClock> {
    /// Session on the wall clock, seeded from `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if `config` fails validation or the configured seed
    /// cannot be loaded.
    pub fn from_config(config: Config) -> Result<Self> {
        Session::with_clock(config, SystemClock)
    }
}

impl<C: Clock> Session<C> {
    /// # Errors
    ///
    /// Returns an error if `config` fails validation or the configured seed
    /// cannot be loaded.
    pub fn with_clock(config: Config, clock: C) -> Result<Self> {
        config.validate()?;
        let catalog = Catalog::configured(&config.content)?;
        Ok(Self::with_catalog(config, catalog, clock))
    }

    /// An unparseable `ui.start_tab` falls back to Today.
    pub fn with_catalog(config: Config, catalog: Catalog, clock: C) -> Self {
        let tab = config.ui.start_tab.parse().unwrap_or_else(|_| {
            warn!(start_tab = %config.ui.start_tab, "unknown start tab, using Today");
            Tab::Today
        });
        let coach = CoachChat::new(
            catalog.coach.transcript.clone(),
            catalog.coach.canned_reply.clone(),
        );
        Self {
            timer: TimerEngine::new(TimerLimits::from(&config.timer)),
            content: ContentStore::new(catalog),
            overlays: OverlayCoordinator::new(),
            tab,
            check_ins: Vec::new(),
            sleep_log: Vec::new(),
            coach,
            settings: ProfileSettings::default(),
            resource_filter: None,
            notices: Vec::new(),
            config,
            clock,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn tab(&self) -> Tab {
        self.tab
    }

    pub fn content(&self) -> &ContentStore {
        &self.content
    }

    pub fn timer(&self) -> &TimerEngine {
        &self.timer
    }

    pub fn overlays(&self) -> &OverlayCoordinator {
        &self.overlays
    }

    pub fn check_ins(&self) -> &[CheckIn] {
        &self.check_ins
    }

    pub fn sleep_log(&self) -> &[SleepEntry] {
        &self.sleep_log
    }

    pub fn coach(&self) -> &CoachChat {
        &self.coach
    }

    pub fn settings(&self) -> &ProfileSettings {
        &self.settings
    }

    pub fn resource_filter(&self) -> Option<&str> {
        self.resource_filter.as_deref()
    }

    /// Notices raised since the last call, oldest first.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    /// Re-derive the whole screen. Pure: nothing is mutated.
    pub fn view(&self) -> View {
        router::render(&RenderContext {
            tab: self.tab,
            timer: &self.timer,
            overlays: &self.overlays,
            content: &self.content,
            config: &self.config,
            check_ins: &self.check_ins,
            sleep_log: &self.sleep_log,
            coach: &self.coach,
            settings: &self.settings,
            resource_filter: self.resource_filter.as_deref(),
            now: self.now(),
        })
    }

    /// How soon the screen should be redrawn without input: while a countdown
    /// runs or the breathing reset is still counting down. `None` means wait
    /// for input.
    pub fn redraw_interval(&self) -> Option<Duration> {
        let now = self.now();
        let counting = self.timer.phase_at(now).is_counting();
        let breathing = self.overlays.is_open(OverlayKind::Breathing)
            && self.overlays.opened_at().is_some_and(|at| {
                breathing::seconds_left((now - at).num_milliseconds()) > 0
            });
        (counting || breathing).then(|| self.config.ui.redraw_interval())
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Commit timer completions that happened since the last query.
    /// Call before each render pass.
    pub fn refresh(&mut self) -> Option<TimerEvent> {
        let now = self.now();
        let event = self.timer.poll(now)?;
        self.on_timer_event(&event);
        Some(event)
    }

    /// Apply one action. A rejected action leaves state untouched, queues a
    /// warning notice and returns the error.
    ///
    /// # Errors
    ///
    /// Returns the reason the action was rejected.
    pub fn dispatch(&mut self, action: Action) -> Result<()> {
        debug!(?action, "dispatch");
        self.refresh();
        let result = self.apply(action);
        if let Err(ref err) = result {
            warn!(error = %err, "action rejected");
            self.notify(NoticeLevel::Warning, err.to_string());
        }
        result
    }

    fn apply(&mut self, action: Action) -> Result<()> {
        let now = self.now();
        match action {
            Action::SelectTab { tab } => {
                self.tab = tab;
            }

            Action::OpenBreathing => {
                self.overlays.open(Overlay::Breathing, now);
            }
            Action::OpenWindDown => {
                self.overlays.open(Overlay::WindDown, now);
            }
            Action::OpenEventDetails { event_id } => {
                if self.content.event(&event_id).is_none() {
                    return Err(ContentError::NotFound { id: event_id }.into());
                }
                self.overlays.open(Overlay::event_details(event_id), now);
            }
            Action::OpenPlaceholder { placeholder } => {
                self.overlays.open(Overlay::placeholder(placeholder), now);
            }
            Action::CloseOverlay => {
                self.overlays.close();
            }

            Action::StartFocus {
                task,
                focus_minutes,
                break_minutes,
            } => {
                if let Some(event) = self.timer.start(&task, focus_minutes, break_minutes, now)? {
                    self.on_timer_event(&event);
                }
            }
            Action::StartBreak => {
                if let Some(event) = self.timer.start_break(now) {
                    self.on_timer_event(&event);
                }
            }
            Action::StartNextFocus => {
                if let Some(event) = self.timer.start_next_focus(now) {
                    self.on_timer_event(&event);
                }
            }
            Action::StopTimer => {
                if let Some(event) = self.timer.stop(now) {
                    self.on_timer_event(&event);
                }
            }

            Action::Rsvp { event_id } => {
                if self.content.rsvp(&event_id)? {
                    self.notify(NoticeLevel::Success, "Added to your schedule!");
                }
            }
            Action::CancelRsvp { event_id } => {
                self.content.cancel_rsvp(&event_id)?;
                let title = self
                    .content
                    .event(&event_id)
                    .map(|e| e.title.clone())
                    .unwrap_or(event_id);
                self.notify(
                    NoticeLevel::Info,
                    format!("Removed '{title}' from schedule."),
                );
            }

            Action::AddGoal { text } => {
                self.content.add_goal(&text)?;
                info!(goal = %text, "goal added");
            }
            Action::RemoveGoal { index } => {
                let goal = self.content.remove_goal(index)?;
                info!(%goal, "goal removed");
            }

            Action::LogCheckIn { mood, stress, tags } => {
                let known = &self.content.catalog().checkin.tags;
                let check_in = CheckIn::new(mood, stress, &tags, known, now)?;
                self.notify(NoticeLevel::Success, check_in.summary());
                self.check_ins.push(check_in);
            }
            Action::LogSleep {
                night_of,
                bed_time,
                wake_time,
                quality,
            } => {
                let entry = SleepEntry::new(night_of, bed_time, wake_time, quality)?;
                self.sleep_log.push(entry);
                self.notify(NoticeLevel::Success, "Sleep log saved!");
            }
            Action::StartWindDownTimer => {
                self.notify(NoticeLevel::Info, "Wind-down timer started. See you in 30!");
            }
            Action::ReadResource { resource_id } => {
                let title = self
                    .content
                    .resource(&resource_id)
                    .map(|r| r.title.clone())
                    .ok_or(ContentError::NotFound { id: resource_id })?;
                self.notify(NoticeLevel::Info, format!("Opening '{title}'..."));
            }
            Action::FilterResources { category } => {
                self.resource_filter = category.filter(|c| c != "All");
            }
            Action::SendCoachMessage { text } => {
                self.coach.send(&text)?;
            }
            Action::ToggleSetting { key } => {
                let enabled = self.settings.toggle(key);
                debug!(?key, enabled, "setting toggled");
            }
        }
        Ok(())
    }

    fn on_timer_event(&mut self, event: &TimerEvent) {
        info!(?event, "timer");
        match event {
            TimerEvent::FocusCompleted { task_label, .. } => {
                self.notify(
                    NoticeLevel::Success,
                    format!("Time's up! You completed your focus session for {task_label}."),
                );
            }
            TimerEvent::BreakCompleted { .. } => {
                self.notify(
                    NoticeLevel::Success,
                    "Break's over! Ready for another focus session?",
                );
            }
            _ => {}
        }
    }

    fn notify(&mut self, level: NoticeLevel, message: impl Into<String>) {
        self.notices.push(Notice {
            level,
            message: message.into(),
            at: self.now(),
        });
    }
}
