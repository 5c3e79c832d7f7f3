//! View model: a complete, serializable description of one screen.
//!
//! Produced fresh by the router on every render and consumed by whatever
//! draws it. Nothing in here is mutated after construction.

use serde::Serialize;

use crate::breathing::BreathCue;
use crate::coach::ChatMessage;
use crate::content::{Event, ProfileStat, Resource, TrendPoint};
use crate::nav::Tab;
use crate::overlay::PlaceholderKind;
use crate::settings::ProfileSettings;
use crate::timer::{DurationBounds, Phase};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct View {
    pub tab: Tab,
    #[serde(flatten)]
    pub body: Body,
}

impl View {
    pub fn is_overlay(&self) -> bool {
        matches!(self.body, Body::Overlay(_))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "body", content = "view", rename_all = "snake_case")]
pub enum Body {
    Overlay(OverlayView),
    Page(PageView),
}

// ── Overlays ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "overlay", rename_all = "snake_case")]
pub enum OverlayView {
    Breathing(BreathingView),
    WindDown(WindDownView),
    EventDetails(EventDetailsView),
    Placeholder(PlaceholderView),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreathingView {
    pub title: String,
    pub instructions: String,
    pub cue: BreathCue,
    pub seconds_left: u64,
    pub finished: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WindDownView {
    pub title: String,
    pub intro: String,
    pub steps: Vec<String>,
}

/// `event` is `None` when the id no longer resolves.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventDetailsView {
    pub event_id: String,
    pub event: Option<Event>,
    pub scheduled: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaceholderView {
    pub kind: PlaceholderKind,
    pub title: String,
    pub message: String,
}

// ── Pages ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "page", rename_all = "snake_case")]
pub enum PageView {
    Today(TodayView),
    Focus(FocusView),
    Sleep(SleepView),
    Events(EventsView),
    MySchedule(ScheduleView),
    Resources(ResourcesView),
    Coach(CoachView),
    Profile(ProfileView),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventCard {
    pub event: Event,
    pub scheduled: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckInCard {
    pub tags: Vec<String>,
    pub default_tags: Vec<String>,
    pub default_mood: u8,
    pub default_stress: u8,
    pub logged_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TodayView {
    pub greeting: String,
    pub check_in: CheckInCard,
    pub breathing_prompt: String,
    pub coach_insight: String,
    pub upcoming_event: Option<EventCard>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum FocusView {
    Setup {
        default_task: String,
        default_focus_minutes: u32,
        default_break_minutes: u32,
        focus_bounds: DurationBounds,
        break_bounds: DurationBounds,
        step_minutes: u32,
    },
    Running {
        phase: Phase,
        task_label: String,
        /// "mm:ss"
        clock: String,
        remaining_secs: u64,
        progress: f64,
        percent: u8,
    },
    FocusComplete {
        task_label: String,
        break_minutes: u32,
    },
    BreakComplete {
        task_label: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SleepMetric {
    pub title: String,
    pub value: String,
    pub caption: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SleepLogRow {
    pub night_of: String,
    pub bed_time: String,
    pub wake_time: String,
    pub duration: String,
    pub quality: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SleepView {
    pub metrics: Vec<SleepMetric>,
    pub trend: Vec<TrendPoint>,
    pub target_hours: f64,
    pub wind_down_insight: String,
    pub logs: Vec<SleepLogRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventsView {
    pub featured: Option<EventCard>,
    pub others: Vec<EventCard>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduleView {
    pub entries: Vec<EventCard>,
    pub empty_message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResourcesView {
    /// "All" first, then the catalog's categories.
    pub categories: Vec<String>,
    pub selected: Option<String>,
    pub items: Vec<Resource>,
    pub empty_message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoachView {
    pub weekly_insight: Vec<String>,
    pub messages: Vec<ChatMessage>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileView {
    pub name: String,
    pub program: String,
    pub joined: String,
    pub stats: Vec<ProfileStat>,
    pub goals: Vec<String>,
    pub settings: ProfileSettings,
}
