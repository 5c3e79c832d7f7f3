//! Drawing. Everything shown comes from `Session::view()` plus the app's
//! drafts and toast; nothing here changes state.

use ratatui::{prelude::*, widgets::*};
use zenith_core::breathing::BreathCue;
use zenith_core::coach::ChatRole;
use zenith_core::view::*;
use zenith_core::{NoticeLevel, Phase, SettingKey, Tab};

use super::app::{App, InputMode};

const ACCENT: Color = Color::Rgb(126, 87, 194);
const MUTED: Color = Color::Gray;

pub fn draw(f: &mut Frame, app: &App) {
    let view = app.session.view();

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1), Constraint::Length(1)])
        .split(f.area());
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(18), Constraint::Min(20)])
        .split(rows[0]);

    draw_sidebar(f, cols[0], view.tab);
    match &view.body {
        Body::Page(page) => draw_page(f, cols[1], page, app),
        Body::Overlay(overlay) => {
            let area = centered_rect(70, 70, cols[1]);
            f.render_widget(Clear, area);
            draw_overlay(f, area, overlay);
        }
    }
    draw_status(f, rows[1], app);
    draw_help(f, rows[2], app, &view);
}

fn block(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(ACCENT))
        .title(Span::styled(
            format!(" {title} "),
            Style::default().add_modifier(Modifier::BOLD),
        ))
}

fn heading(text: impl Into<String>) -> Line<'static> {
    Line::from(Span::styled(
        text.into(),
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
    ))
}

fn muted(text: impl Into<String>) -> Line<'static> {
    Line::from(Span::styled(text.into(), Style::default().fg(MUTED)))
}

fn highlight() -> Style {
    Style::default().fg(Color::Black).bg(ACCENT)
}

fn draw_sidebar(f: &mut Frame, area: Rect, current: Tab) {
    let items: Vec<ListItem> = Tab::ALL
        .iter()
        .enumerate()
        .map(|(i, tab)| ListItem::new(format!("{} {}", i + 1, tab.label())))
        .collect();
    let list = List::new(items)
        .block(block("Zenith"))
        .highlight_style(highlight());
    let mut state = ListState::default().with_selected(Some(current.index()));
    f.render_stateful_widget(list, area, &mut state);
}

fn draw_status(f: &mut Frame, area: Rect, app: &App) {
    let line = if let InputMode::Editing(field) = app.mode {
        Line::from(vec![
            Span::styled(format!("{}: ", field.prompt()), Style::default().fg(ACCENT)),
            Span::raw(app.input.clone()),
            Span::styled("_", Style::default().add_modifier(Modifier::SLOW_BLINK)),
        ])
    } else if let Some(toast) = &app.toast {
        let color = match toast.notice.level {
            NoticeLevel::Info => Color::Cyan,
            NoticeLevel::Success => Color::Green,
            NoticeLevel::Warning => Color::Yellow,
        };
        Line::from(Span::styled(
            toast.notice.message.clone(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ))
    } else {
        Line::default()
    };
    f.render_widget(Paragraph::new(line), area);
}

fn draw_help(f: &mut Frame, area: Rect, app: &App, view: &View) {
    let keys = match (&app.mode, &view.body) {
        (InputMode::Editing(_), _) => "Enter save  Esc cancel",
        (_, Body::Overlay(OverlayView::EventDetails(_))) => "r RSVP  x cancel RSVP  Esc close",
        (_, Body::Overlay(OverlayView::WindDown(_))) => "Enter start 30-min timer  Esc close",
        (_, Body::Overlay(_)) => "Esc close",
        (_, Body::Page(PageView::Today(_))) => {
            "m/M mood  s/S stress  ↑↓ Space tags  Enter log  b breathe  c coach  e events"
        }
        (_, Body::Page(PageView::Focus(FocusView::Setup { .. }))) => {
            "e task  +/- focus  [/] break  Enter start"
        }
        (_, Body::Page(PageView::Focus(_))) => "Enter continue  s stop",
        (_, Body::Page(PageView::Sleep(_))) => "b/B bed  k/K wake  </> quality  Enter log  w wind-down",
        (_, Body::Page(PageView::Events(_))) => "↑↓ select  Enter details  r RSVP",
        (_, Body::Page(PageView::MySchedule(_))) => "↑↓ select  Enter details  x cancel  e events",
        (_, Body::Page(PageView::Resources(_))) => "←→ category  ↑↓ select  Enter read",
        (_, Body::Page(PageView::Coach(_))) => "i reply",
        (_, Body::Page(PageView::Profile(_))) => {
            "↑↓ select  Space toggle  a add goal  d delete goal  p/h/o dialogs"
        }
    };
    let line = Line::from(vec![
        Span::styled(keys, Style::default().fg(MUTED)),
        Span::styled("  Tab/1-8 switch  q quit", Style::default().fg(MUTED)),
    ]);
    f.render_widget(Paragraph::new(line), area);
}

// ── Pages ────────────────────────────────────────────────────────────

fn draw_page(f: &mut Frame, area: Rect, page: &PageView, app: &App) {
    match page {
        PageView::Today(view) => draw_today(f, area, view, app),
        PageView::Focus(view) => draw_focus(f, area, view, app),
        PageView::Sleep(view) => draw_sleep(f, area, view, app),
        PageView::Events(view) => draw_events(f, area, view, app.selected),
        PageView::MySchedule(view) => draw_schedule(f, area, view, app.selected),
        PageView::Resources(view) => draw_resources(f, area, view, app.selected),
        PageView::Coach(view) => draw_coach(f, area, view),
        PageView::Profile(view) => draw_profile(f, area, view, app.selected),
    }
}

fn draw_today(f: &mut Frame, area: Rect, view: &TodayView, app: &App) {
    let drafts = &app.drafts;
    let mut lines = vec![
        heading(view.greeting.clone()),
        Line::default(),
        heading("How are you feeling?"),
        Line::from(format!("Mood   {}  ({}/5)", "●".repeat(drafts.mood.into()), drafts.mood)),
        Line::from(format!("Stress {}  ({}/5)", "●".repeat(drafts.stress.into()), drafts.stress)),
        muted("What's on your mind?"),
    ];
    for (i, tag) in view.check_in.tags.iter().enumerate() {
        let mark = if drafts.tags.contains(tag) { "[x]" } else { "[ ]" };
        let style = if i == app.selected {
            highlight()
        } else {
            Style::default()
        };
        lines.push(Line::from(Span::styled(format!("  {mark} {tag}"), style)));
    }
    lines.push(muted(format!("{} check-ins logged", view.check_in.logged_count)));
    lines.push(Line::default());
    lines.push(heading("Breathing Reset"));
    lines.push(Line::from(view.breathing_prompt.clone()));
    lines.push(Line::default());
    lines.push(heading("AI Coach Insight"));
    lines.push(Line::from(view.coach_insight.clone()));
    if let Some(card) = &view.upcoming_event {
        lines.push(Line::default());
        lines.push(heading("Upcoming Event"));
        lines.push(Line::from(card.event.title.clone()));
        lines.push(muted(format!("{} · {}", card.event.time_label, card.event.location)));
    }
    let para = Paragraph::new(lines)
        .block(block("Today"))
        .wrap(Wrap { trim: true });
    f.render_widget(para, area);
}

fn draw_focus(f: &mut Frame, area: Rect, view: &FocusView, app: &App) {
    let outer = block("Focus");
    let inner = outer.inner(area);
    f.render_widget(outer, area);

    match view {
        FocusView::Setup {
            focus_bounds,
            break_bounds,
            ..
        } => {
            let drafts = &app.drafts;
            let lines = vec![
                heading("Start a Focus Session"),
                Line::default(),
                Line::from(format!("Task:          {}", drafts.task)),
                Line::from(format!(
                    "Focus length:  {} min  ({}-{})",
                    drafts.focus_minutes, focus_bounds.min, focus_bounds.max
                )),
                Line::from(format!(
                    "Break length:  {} min  ({}-{})",
                    drafts.break_minutes, break_bounds.min, break_bounds.max
                )),
            ];
            f.render_widget(Paragraph::new(lines), inner);
        }
        FocusView::Running {
            phase,
            task_label,
            clock,
            percent,
            ..
        } => {
            let sections = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(2),
                    Constraint::Length(3),
                    Constraint::Length(3),
                    Constraint::Min(0),
                ])
                .split(inner);
            let title = match phase {
                Phase::OnBreak => "On a Break: Time to relax!".to_string(),
                _ => format!("Focusing on: {task_label}"),
            };
            f.render_widget(
                Paragraph::new(heading(title)).alignment(Alignment::Center),
                sections[0],
            );
            f.render_widget(
                Paragraph::new(Line::from(Span::styled(
                    clock.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                )))
                .alignment(Alignment::Center),
                sections[1],
            );
            let gauge = Gauge::default()
                .block(Block::default().borders(Borders::ALL).border_type(BorderType::Rounded))
                .gauge_style(Style::default().fg(ACCENT).bg(Color::Black))
                .percent(u16::from(*percent).min(100));
            f.render_widget(gauge, sections[2]);
        }
        FocusView::FocusComplete {
            task_label,
            break_minutes,
        } => {
            let lines = vec![
                heading("Time's up!"),
                Line::from(format!("You completed your focus session for {task_label}.")),
                Line::default(),
                muted(format!("Enter: Start {break_minutes}-min Break   s: Stop for Now")),
            ];
            f.render_widget(Paragraph::new(lines), inner);
        }
        FocusView::BreakComplete { .. } => {
            let lines = vec![
                heading("Break's over!"),
                Line::from("Ready for another focus session?"),
                Line::default(),
                muted("Enter: Start Next Focus   s: Stop for Now"),
            ];
            f.render_widget(Paragraph::new(lines), inner);
        }
    }
}

fn draw_sleep(f: &mut Frame, area: Rect, view: &SleepView, app: &App) {
    let outer = block("Sleep");
    let inner = outer.inner(area);
    f.render_widget(outer, area);

    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(9),
            Constraint::Min(4),
        ])
        .split(inner);

    let metrics: Vec<Span> = view
        .metrics
        .iter()
        .flat_map(|m| {
            [
                Span::styled(format!("{}: ", m.title), Style::default().fg(MUTED)),
                Span::styled(m.value.clone(), Style::default().add_modifier(Modifier::BOLD)),
                Span::styled(format!(" {}    ", m.caption), Style::default().fg(MUTED)),
            ]
        })
        .collect();
    f.render_widget(Paragraph::new(Line::from(metrics)), sections[0]);

    // Bars are tenths of an hour.
    let bars: Vec<Bar> = view
        .trend
        .iter()
        .map(|p| {
            Bar::default()
                .label(Line::from(p.day.clone()))
                .value((p.hours * 10.0).round() as u64)
                .text_value(format!("{:.1}", p.hours))
        })
        .collect();
    let chart = BarChart::default()
        .block(Block::default().title(format!("Last 7 days (target {}h)", view.target_hours)))
        .data(BarGroup::default().bars(&bars))
        .bar_width(5)
        .bar_gap(1)
        .bar_style(Style::default().fg(ACCENT));
    f.render_widget(chart, sections[1]);

    let drafts = &app.drafts;
    let mut lines = vec![
        muted(view.wind_down_insight.clone()),
        Line::default(),
        heading("Log Sleep"),
        Line::from(format!(
            "Night of {}   bed {}   wake {}   quality {}/5",
            drafts.night_of.format("%a, %b %-d"),
            drafts.bed_time.format("%-I:%M %p"),
            drafts.wake_time.format("%-I:%M %p"),
            drafts.sleep_quality
        )),
    ];
    for row in &view.logs {
        lines.push(muted(format!(
            "{}  {} → {}  {}  quality {}/5",
            row.night_of, row.bed_time, row.wake_time, row.duration, row.quality
        )));
    }
    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), sections[2]);
}

fn event_item(card: &EventCard) -> ListItem<'static> {
    let badge = if card.scheduled { "  ✓ Going" } else { "" };
    ListItem::new(vec![
        Line::from(vec![
            Span::styled(card.event.title.clone(), Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(badge, Style::default().fg(Color::Green)),
        ]),
        muted(format!(
            "  {} · {} · {} · {}",
            card.event.time_label, card.event.location, card.event.distance_label, card.event.cost_label
        )),
    ])
}

fn draw_events(f: &mut Frame, area: Rect, view: &EventsView, selected: usize) {
    let items: Vec<ListItem> = view
        .featured
        .iter()
        .chain(view.others.iter())
        .map(event_item)
        .collect();
    let list = List::new(items)
        .block(block("Campus Events"))
        .highlight_style(highlight());
    let mut state = ListState::default().with_selected(Some(selected));
    f.render_stateful_widget(list, area, &mut state);
}

fn draw_schedule(f: &mut Frame, area: Rect, view: &ScheduleView, selected: usize) {
    if let Some(message) = &view.empty_message {
        let para = Paragraph::new(vec![
            Line::from(message.clone()),
            muted("Press e to browse events."),
        ])
        .block(block("My Schedule"));
        f.render_widget(para, area);
        return;
    }
    let items: Vec<ListItem> = view.entries.iter().map(event_item).collect();
    let list = List::new(items)
        .block(block("My Schedule"))
        .highlight_style(highlight());
    let mut state = ListState::default().with_selected(Some(selected));
    f.render_stateful_widget(list, area, &mut state);
}

fn draw_resources(f: &mut Frame, area: Rect, view: &ResourcesView, selected: usize) {
    let outer = block("Resources");
    let inner = outer.inner(area);
    f.render_widget(outer, area);
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(1)])
        .split(inner);

    let current = view.selected.as_deref().unwrap_or("All");
    let selected_tab = view.categories.iter().position(|c| c == current).unwrap_or(0);
    let tabs = Tabs::new(view.categories.clone())
        .select(selected_tab)
        .highlight_style(highlight());
    f.render_widget(tabs, sections[0]);

    if let Some(message) = &view.empty_message {
        f.render_widget(Paragraph::new(message.clone()), sections[1]);
        return;
    }
    let items: Vec<ListItem> = view
        .items
        .iter()
        .map(|r| {
            ListItem::new(vec![
                Line::from(Span::styled(r.title.clone(), Style::default().add_modifier(Modifier::BOLD))),
                muted(format!("  {} · {}", r.category, r.read_time_label)),
            ])
        })
        .collect();
    let list = List::new(items).highlight_style(highlight());
    let mut state = ListState::default().with_selected(Some(selected));
    f.render_stateful_widget(list, sections[1], &mut state);
}

fn draw_coach(f: &mut Frame, area: Rect, view: &CoachView) {
    let mut lines = vec![heading("Your Weekly Insight")];
    lines.extend(view.weekly_insight.iter().map(|l| Line::from(format!("• {l}"))));
    lines.push(Line::default());
    for message in &view.messages {
        let (who, style) = match message.role {
            ChatRole::Coach => ("Coach", Style::default().fg(ACCENT)),
            ChatRole::User => ("You", Style::default().fg(Color::Cyan)),
        };
        for (i, text) in message.lines.iter().enumerate() {
            let prefix = if i == 0 { format!("{who}: ") } else { "  ".to_string() };
            lines.push(Line::from(vec![
                Span::styled(prefix, style.add_modifier(Modifier::BOLD)),
                Span::raw(text.clone()),
            ]));
        }
    }
    // Keep the newest messages in view.
    let height = area.height.saturating_sub(2) as usize;
    let scroll = lines.len().saturating_sub(height) as u16;
    let para = Paragraph::new(lines)
        .block(block("AI Coach"))
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));
    f.render_widget(para, area);
}

fn draw_profile(f: &mut Frame, area: Rect, view: &ProfileView, selected: usize) {
    let outer = block("Profile");
    let inner = outer.inner(area);
    f.render_widget(outer, area);
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(4)])
        .split(inner);

    let mut header = vec![
        heading(view.name.clone()),
        muted(format!("{} · Joined {}", view.program, view.joined)),
    ];
    header.push(Line::from(
        view.stats
            .iter()
            .map(|s| format!("{}: {} ({})", s.label, s.value, s.delta))
            .collect::<Vec<_>>()
            .join("   "),
    ));
    f.render_widget(Paragraph::new(header), sections[0]);

    let mut items: Vec<ListItem> = SettingKey::ALL
        .iter()
        .map(|key| {
            let mark = if view.settings.get(*key) { "[on] " } else { "[off]" };
            ListItem::new(format!("{mark} {}", key.label()))
        })
        .collect();
    items.extend(view.goals.iter().map(|g| ListItem::new(format!("🎯 {g}"))));
    let list = List::new(items)
        .block(Block::default().title("Settings & Goals"))
        .highlight_style(highlight());
    let mut state = ListState::default().with_selected(Some(selected));
    f.render_stateful_widget(list, sections[1], &mut state);
}

// ── Overlays ─────────────────────────────────────────────────────────

fn draw_overlay(f: &mut Frame, area: Rect, overlay: &OverlayView) {
    match overlay {
        OverlayView::Breathing(view) => {
            let cue = if view.finished {
                "Well done.".to_string()
            } else {
                match view.cue {
                    BreathCue::Inhale => "Inhale...".to_string(),
                    BreathCue::Hold => "Hold".to_string(),
                    BreathCue::Exhale => "Exhale...".to_string(),
                }
            };
            let lines = vec![
                Line::from(view.instructions.clone()),
                Line::default(),
                Line::from(Span::styled(cue, Style::default().fg(ACCENT).add_modifier(Modifier::BOLD))),
                Line::default(),
                muted(format!("{}s left", view.seconds_left)),
            ];
            let para = Paragraph::new(lines)
                .block(block(&view.title))
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true });
            f.render_widget(para, area);
        }
        OverlayView::WindDown(view) => {
            let mut lines = vec![Line::from(view.intro.clone()), Line::default()];
            lines.extend(
                view.steps
                    .iter()
                    .enumerate()
                    .map(|(i, step)| Line::from(format!("{}. {step}", i + 1))),
            );
            let para = Paragraph::new(lines)
                .block(block(&view.title))
                .wrap(Wrap { trim: true });
            f.render_widget(para, area);
        }
        OverlayView::EventDetails(view) => {
            let lines = match &view.event {
                Some(event) => vec![
                    muted(format!("{} · {}", event.time_label, event.location)),
                    muted(format!("{} · {}", event.distance_label, event.cost_label)),
                    Line::default(),
                    Line::from(event.short_description.clone()),
                    Line::default(),
                    Line::from(event.long_description.clone()),
                    Line::default(),
                    if view.scheduled {
                        Line::from(Span::styled("✓ You're going!", Style::default().fg(Color::Green)))
                    } else {
                        muted("Press r to RSVP")
                    },
                ],
                None => vec![Line::from(format!("Event '{}' is no longer listed.", view.event_id))],
            };
            let title = view
                .event
                .as_ref()
                .map_or("Event Details", |e| e.title.as_str());
            let para = Paragraph::new(lines)
                .block(block(title))
                .wrap(Wrap { trim: true });
            f.render_widget(para, area);
        }
        OverlayView::Placeholder(view) => {
            let para = Paragraph::new(view.message.clone())
                .block(block(&view.title))
                .wrap(Wrap { trim: true });
            f.render_widget(para, area);
        }
    }
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
