//! Navigation router: state in, view out.
//!
//! An active overlay always wins, whichever tab is selected. Otherwise the
//! selected tab picks the page. Rendering never mutates anything.

use chrono::{DateTime, Local, Timelike, Utc};

use crate::breathing::{self, BreathCue};
use crate::checkin::CheckIn;
use crate::coach::CoachChat;
use crate::config::Config;
use crate::content::{ContentStore, Event};
use crate::nav::Tab;
use crate::overlay::{Overlay, OverlayCoordinator};
use crate::settings::ProfileSettings;
use crate::sleep::SleepEntry;
use crate::timer::{Phase, TimerEngine, TimerLimits};
use crate::view::*;

/// Everything a render pass reads.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub tab: Tab,
    pub timer: &'a TimerEngine,
    pub overlays: &'a OverlayCoordinator,
    pub content: &'a ContentStore,
    pub config: &'a Config,
    pub check_ins: &'a [CheckIn],
    pub sleep_log: &'a [SleepEntry],
    pub coach: &'a CoachChat,
    pub settings: &'a ProfileSettings,
    pub resource_filter: Option<&'a str>,
    pub now: DateTime<Utc>,
}

pub fn render(ctx: &RenderContext<'_>) -> View {
    let body = match ctx.overlays.current() {
        Some(overlay) => Body::Overlay(render_overlay(ctx, overlay)),
        None => Body::Page(render_page(ctx)),
    };
    View { tab: ctx.tab, body }
}

fn render_overlay(ctx: &RenderContext<'_>, overlay: &Overlay) -> OverlayView {
    let catalog = ctx.content.catalog();
    match overlay {
        Overlay::Breathing => {
            let elapsed_ms = ctx
                .overlays
                .opened_at()
                .map(|at| (ctx.now - at).num_milliseconds())
                .unwrap_or(0);
            let seconds_left = breathing::seconds_left(elapsed_ms);
            OverlayView::Breathing(BreathingView {
                title: catalog.breathing.title.clone(),
                instructions: catalog.breathing.instructions.clone(),
                cue: BreathCue::at(elapsed_ms),
                seconds_left,
                finished: seconds_left == 0,
            })
        }
        Overlay::WindDown => OverlayView::WindDown(WindDownView {
            title: catalog.wind_down.title.clone(),
            intro: catalog.wind_down.intro.clone(),
            steps: catalog.wind_down.steps.clone(),
        }),
        Overlay::EventDetails { event_id } => OverlayView::EventDetails(EventDetailsView {
            event_id: event_id.clone(),
            event: ctx.content.event(event_id).cloned(),
            scheduled: ctx.content.is_scheduled(event_id),
        }),
        Overlay::Placeholder { placeholder } => OverlayView::Placeholder(PlaceholderView {
            kind: *placeholder,
            title: placeholder.title().to_string(),
            message: placeholder.message().to_string(),
        }),
    }
}

fn render_page(ctx: &RenderContext<'_>) -> PageView {
    match ctx.tab {
        Tab::Today => PageView::Today(today(ctx)),
        Tab::Focus => PageView::Focus(focus(ctx)),
        Tab::Sleep => PageView::Sleep(sleep(ctx)),
        Tab::Events => PageView::Events(events(ctx)),
        Tab::MySchedule => PageView::MySchedule(schedule(ctx)),
        Tab::Resources => PageView::Resources(resources(ctx)),
        Tab::Coach => PageView::Coach(coach(ctx)),
        Tab::Profile => PageView::Profile(profile(ctx)),
    }
}

fn card(ctx: &RenderContext<'_>, event: &Event) -> EventCard {
    EventCard {
        event: event.clone(),
        scheduled: ctx.content.is_scheduled(&event.id),
    }
}

/// "Good Morning" before noon, "Good Afternoon" before 5 PM, else evening.
pub fn greeting_for_hour(hour: u32) -> &'static str {
    match hour {
        0..=11 => "Good Morning",
        12..=16 => "Good Afternoon",
        _ => "Good Evening",
    }
}

fn today(ctx: &RenderContext<'_>) -> TodayView {
    let catalog = ctx.content.catalog();
    let hour = ctx.now.with_timezone(&Local).hour();
    TodayView {
        greeting: format!("{}, {}!", greeting_for_hour(hour), ctx.config.ui.user_name),
        check_in: CheckInCard {
            tags: catalog.checkin.tags.clone(),
            default_tags: catalog.checkin.default_tags.clone(),
            default_mood: catalog.checkin.default_mood,
            default_stress: catalog.checkin.default_stress,
            logged_count: ctx.check_ins.len(),
        },
        breathing_prompt: catalog.today.breathing_prompt.clone(),
        coach_insight: catalog.today.coach_insight.clone(),
        upcoming_event: ctx.content.list_events().first().map(|e| card(ctx, e)),
    }
}

fn focus(ctx: &RenderContext<'_>) -> FocusView {
    let snap = ctx.timer.snapshot(ctx.now);
    match snap.phase {
        Phase::Idle => {
            let limits: TimerLimits = ctx.timer.limits();
            let timer_cfg = &ctx.config.timer;
            FocusView::Setup {
                default_task: timer_cfg.default_task.clone(),
                default_focus_minutes: timer_cfg.default_focus_minutes,
                default_break_minutes: timer_cfg.default_break_minutes,
                focus_bounds: limits.focus,
                break_bounds: limits.rest,
                step_minutes: timer_cfg.step_minutes,
            }
        }
        Phase::Focusing | Phase::OnBreak => FocusView::Running {
            phase: snap.phase,
            task_label: snap.task_label,
            clock: format!("{:02}:{:02}", snap.remaining_secs / 60, snap.remaining_secs % 60),
            remaining_secs: snap.remaining_secs,
            progress: snap.progress,
            percent: (snap.progress * 100.0).floor() as u8,
        },
        Phase::FocusComplete => FocusView::FocusComplete {
            task_label: snap.task_label,
            break_minutes: snap.break_minutes,
        },
        Phase::BreakComplete => FocusView::BreakComplete {
            task_label: snap.task_label,
        },
    }
}

fn sleep(ctx: &RenderContext<'_>) -> SleepView {
    let seed = &ctx.content.catalog().sleep;
    SleepView {
        metrics: vec![
            SleepMetric {
                title: "Sleep Score".into(),
                value: seed.score.to_string(),
                caption: seed.score_label.clone(),
            },
            SleepMetric {
                title: "Duration".into(),
                value: seed.duration_label.clone(),
                caption: seed.target_label.clone(),
            },
            SleepMetric {
                title: "Consistency".into(),
                value: seed.consistency_label.clone(),
                caption: seed.consistency_caption.clone(),
            },
        ],
        trend: seed.trend.clone(),
        target_hours: seed.target_hours,
        wind_down_insight: seed.wind_down_insight.clone(),
        logs: ctx
            .sleep_log
            .iter()
            .map(|entry| SleepLogRow {
                night_of: entry.night_of.format("%a, %b %-d").to_string(),
                bed_time: entry.bed_time.format("%-I:%M %p").to_string(),
                wake_time: entry.wake_time.format("%-I:%M %p").to_string(),
                duration: entry.duration_label(),
                quality: entry.quality,
            })
            .collect(),
    }
}

fn events(ctx: &RenderContext<'_>) -> EventsView {
    let events = ctx.content.list_events();
    EventsView {
        featured: events.first().map(|e| card(ctx, e)),
        others: events.iter().skip(1).map(|e| card(ctx, e)).collect(),
    }
}

fn schedule(ctx: &RenderContext<'_>) -> ScheduleView {
    let entries: Vec<EventCard> = ctx
        .content
        .scheduled_events()
        .map(|e| card(ctx, e))
        .collect();
    let empty_message = entries
        .is_empty()
        .then(|| "You haven't RSVP'd for any events yet.".to_string());
    ScheduleView {
        entries,
        empty_message,
    }
}

fn resources(ctx: &RenderContext<'_>) -> ResourcesView {
    let mut categories = vec!["All".to_string()];
    categories.extend(
        ctx.content
            .catalog()
            .resource_categories()
            .into_iter()
            .map(String::from),
    );
    let items: Vec<_> = ctx
        .content
        .resources_in(ctx.resource_filter)
        .into_iter()
        .cloned()
        .collect();
    let empty_message = items.is_empty().then(|| {
        format!(
            "No resources found in '{}'.",
            ctx.resource_filter.unwrap_or("All")
        )
    });
    ResourcesView {
        categories,
        selected: ctx.resource_filter.map(String::from),
        items,
        empty_message,
    }
}

fn coach(ctx: &RenderContext<'_>) -> CoachView {
    CoachView {
        weekly_insight: ctx.content.catalog().coach.weekly_insight.clone(),
        messages: ctx.coach.messages().to_vec(),
    }
}

fn profile(ctx: &RenderContext<'_>) -> ProfileView {
    let seed = &ctx.content.catalog().profile;
    ProfileView {
        name: seed.name.clone(),
        program: seed.program.clone(),
        joined: seed.joined.clone(),
        stats: seed.stats.clone(),
        goals: ctx.content.goals().to_vec(),
        settings: *ctx.settings,
    }
}
