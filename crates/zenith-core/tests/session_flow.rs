//! Session-level flows driven through `dispatch` with a manual clock.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use zenith_core::view::{Body, FocusView, OverlayView, PageView};
use zenith_core::{
    Action, Config, CoreError, ManualClock, Phase, PlaceholderKind, Session, SettingKey, Tab,
};

// ============================================================================
// Test Helpers
// ============================================================================

fn t0() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2026-10-19T09:30:00Z")
        .unwrap()
        .with_timezone(&Utc)
}

fn session() -> (Session<ManualClock>, ManualClock) {
    let clock = ManualClock::new(t0());
    let session = Session::with_clock(Config::default(), clock.clone()).unwrap();
    (session, clock)
}

fn page(session: &Session<ManualClock>) -> PageView {
    match session.view().body {
        Body::Page(page) => page,
        Body::Overlay(overlay) => panic!("expected a page, got {overlay:?}"),
    }
}

fn overlay(session: &Session<ManualClock>) -> OverlayView {
    match session.view().body {
        Body::Overlay(overlay) => overlay,
        Body::Page(page) => panic!("expected an overlay, got {page:?}"),
    }
}

fn focus(session: &Session<ManualClock>) -> FocusView {
    match page(session) {
        PageView::Focus(view) => view,
        other => panic!("expected the focus page, got {other:?}"),
    }
}

// ============================================================================
// Timer
// ============================================================================

#[test]
fn full_focus_break_cycle() {
    let (mut session, clock) = session();
    session.dispatch(Action::SelectTab { tab: Tab::Focus }).unwrap();
    assert!(matches!(focus(&session), FocusView::Setup { default_focus_minutes: 25, .. }));

    session
        .dispatch(Action::StartFocus {
            task: "Stats problem set".into(),
            focus_minutes: 25,
            break_minutes: 10,
        })
        .unwrap();

    clock.advance_secs(10 * 60);
    match focus(&session) {
        FocusView::Running {
            phase,
            clock,
            percent,
            ..
        } => {
            assert_eq!(phase, Phase::Focusing);
            assert_eq!(clock, "15:00");
            assert_eq!(percent, 40);
        }
        other => panic!("unexpected focus view: {other:?}"),
    }

    clock.advance_secs(15 * 60);
    session.refresh();
    assert!(matches!(
        focus(&session),
        FocusView::FocusComplete { break_minutes: 10, .. }
    ));

    session.dispatch(Action::StartBreak).unwrap();
    clock.advance_secs(5 * 60);
    assert!(matches!(
        focus(&session),
        FocusView::Running { phase: Phase::OnBreak, .. }
    ));

    clock.advance_secs(5 * 60);
    session.refresh();
    assert!(matches!(focus(&session), FocusView::BreakComplete { .. }));
    let messages: Vec<String> = session
        .take_notices()
        .into_iter()
        .map(|n| n.message)
        .collect();
    assert_eq!(
        messages,
        [
            "Time's up! You completed your focus session for Stats problem set.",
            "Break's over! Ready for another focus session?",
        ]
    );

    session.dispatch(Action::StartNextFocus).unwrap();
    match focus(&session) {
        FocusView::Running {
            phase,
            task_label,
            clock,
            ..
        } => {
            assert_eq!(phase, Phase::Focusing);
            assert_eq!(task_label, "Stats problem set");
            assert_eq!(clock, "25:00");
        }
        other => panic!("unexpected focus view: {other:?}"),
    }

    session.dispatch(Action::StopTimer).unwrap();
    assert!(matches!(focus(&session), FocusView::Setup { .. }));
}

#[test]
fn countdown_survives_browsing_other_tabs() {
    let (mut session, clock) = session();
    session
        .dispatch(Action::StartFocus {
            task: "Reading".into(),
            focus_minutes: 30,
            break_minutes: 5,
        })
        .unwrap();
    session.dispatch(Action::SelectTab { tab: Tab::Events }).unwrap();
    session.dispatch(Action::OpenBreathing).unwrap();
    clock.advance_secs(12 * 60);
    session.dispatch(Action::CloseOverlay).unwrap();
    session.dispatch(Action::SelectTab { tab: Tab::Focus }).unwrap();

    match focus(&session) {
        FocusView::Running { remaining_secs, .. } => assert_eq!(remaining_secs, 18 * 60),
        other => panic!("unexpected focus view: {other:?}"),
    }
}

#[test]
fn start_is_ignored_while_running() {
    let (mut session, clock) = session();
    let start = Action::StartFocus {
        task: "First".into(),
        focus_minutes: 25,
        break_minutes: 5,
    };
    session.dispatch(start).unwrap();
    clock.advance_secs(60);
    session
        .dispatch(Action::StartFocus {
            task: "Second".into(),
            focus_minutes: 50,
            break_minutes: 5,
        })
        .unwrap();
    assert_eq!(session.timer().task_label(), "First");
    assert_eq!(session.timer().remaining_secs_at(session.now()), 24 * 60);
}

// ============================================================================
// Overlays
// ============================================================================

#[test]
fn overlay_shows_on_every_tab_and_close_returns_to_current_tab() {
    let (mut session, _clock) = session();
    session.dispatch(Action::SelectTab { tab: Tab::Sleep }).unwrap();
    session.dispatch(Action::OpenWindDown).unwrap();

    for tab in Tab::ALL {
        session.dispatch(Action::SelectTab { tab }).unwrap();
        let view = session.view();
        assert_eq!(view.tab, tab);
        assert!(matches!(view.body, Body::Overlay(OverlayView::WindDown(_))));
    }

    session.dispatch(Action::SelectTab { tab: Tab::Resources }).unwrap();
    session.dispatch(Action::CloseOverlay).unwrap();
    assert!(matches!(page(&session), PageView::Resources(_)));
}

#[test]
fn last_opened_overlay_wins() {
    let (mut session, _clock) = session();
    session.dispatch(Action::OpenBreathing).unwrap();
    session
        .dispatch(Action::OpenPlaceholder {
            placeholder: PlaceholderKind::HelpSupport,
        })
        .unwrap();
    match overlay(&session) {
        OverlayView::Placeholder(view) => assert_eq!(view.title, "Help & Support"),
        other => panic!("unexpected overlay: {other:?}"),
    }
    session.dispatch(Action::CloseOverlay).unwrap();
    assert!(!session.view().is_overlay());
}

#[test]
fn breathing_counts_down_and_finishes() {
    let (mut session, clock) = session();
    session.dispatch(Action::OpenBreathing).unwrap();
    match overlay(&session) {
        OverlayView::Breathing(view) => {
            assert_eq!(view.seconds_left, 60);
            assert!(!view.finished);
        }
        other => panic!("unexpected overlay: {other:?}"),
    }

    clock.advance_secs(61);
    match overlay(&session) {
        OverlayView::Breathing(view) => {
            assert_eq!(view.seconds_left, 0);
            assert!(view.finished);
        }
        other => panic!("unexpected overlay: {other:?}"),
    }
}

#[test]
fn event_details_track_rsvp_state() {
    let (mut session, _clock) = session();
    session.dispatch(Action::SelectTab { tab: Tab::Events }).unwrap();
    session
        .dispatch(Action::OpenEventDetails {
            event_id: "evt3".into(),
        })
        .unwrap();
    match overlay(&session) {
        OverlayView::EventDetails(view) => {
            assert_eq!(view.event.map(|e| e.title), Some("Nutrition & Brain Food".into()));
            assert!(!view.scheduled);
        }
        other => panic!("unexpected overlay: {other:?}"),
    }

    session
        .dispatch(Action::Rsvp {
            event_id: "evt3".into(),
        })
        .unwrap();
    match overlay(&session) {
        OverlayView::EventDetails(view) => assert!(view.scheduled),
        other => panic!("unexpected overlay: {other:?}"),
    }
}

// ============================================================================
// Pages
// ============================================================================

#[test]
fn schedule_page_lists_rsvps_in_order() {
    let (mut session, _clock) = session();
    session.dispatch(Action::SelectTab { tab: Tab::MySchedule }).unwrap();
    match page(&session) {
        PageView::MySchedule(view) => {
            assert!(view.entries.is_empty());
            assert_eq!(
                view.empty_message.as_deref(),
                Some("You haven't RSVP'd for any events yet.")
            );
        }
        other => panic!("unexpected page: {other:?}"),
    }

    for id in ["evt4", "evt1"] {
        session.dispatch(Action::Rsvp { event_id: id.into() }).unwrap();
    }
    match page(&session) {
        PageView::MySchedule(view) => {
            let ids: Vec<&str> = view.entries.iter().map(|c| c.event.id.as_str()).collect();
            assert_eq!(ids, ["evt4", "evt1"]);
            assert!(view.entries.iter().all(|c| c.scheduled));
            assert!(view.empty_message.is_none());
        }
        other => panic!("unexpected page: {other:?}"),
    }
}

#[test]
fn events_page_features_the_first_event() {
    let (mut session, _clock) = session();
    session.dispatch(Action::SelectTab { tab: Tab::Events }).unwrap();
    match page(&session) {
        PageView::Events(view) => {
            assert_eq!(view.featured.map(|c| c.event.id), Some("evt1".into()));
            assert_eq!(view.others.len(), 4);
        }
        other => panic!("unexpected page: {other:?}"),
    }
}

#[test]
fn resources_filter_by_category() {
    let (mut session, _clock) = session();
    session.dispatch(Action::SelectTab { tab: Tab::Resources }).unwrap();
    session
        .dispatch(Action::FilterResources {
            category: Some("Study".into()),
        })
        .unwrap();
    match page(&session) {
        PageView::Resources(view) => {
            assert_eq!(view.categories[0], "All");
            assert_eq!(view.selected.as_deref(), Some("Study"));
            assert_eq!(view.items.len(), 2);
            assert!(view.items.iter().all(|r| r.category == "Study"));
        }
        other => panic!("unexpected page: {other:?}"),
    }

    session
        .dispatch(Action::FilterResources {
            category: Some("Finance".into()),
        })
        .unwrap();
    match page(&session) {
        PageView::Resources(view) => {
            assert!(view.items.is_empty());
            assert_eq!(
                view.empty_message.as_deref(),
                Some("No resources found in 'Finance'.")
            );
        }
        other => panic!("unexpected page: {other:?}"),
    }
}

#[test]
fn sleep_log_shows_on_sleep_page() {
    let (mut session, _clock) = session();
    session
        .dispatch(Action::LogSleep {
            night_of: NaiveDate::from_ymd_opt(2026, 10, 18).unwrap(),
            bed_time: NaiveTime::from_hms_opt(23, 30, 0).unwrap(),
            wake_time: NaiveTime::from_hms_opt(7, 15, 0).unwrap(),
            quality: 4,
        })
        .unwrap();
    session.dispatch(Action::SelectTab { tab: Tab::Sleep }).unwrap();
    match page(&session) {
        PageView::Sleep(view) => {
            assert_eq!(view.logs.len(), 1);
            assert_eq!(view.logs[0].duration, "7h 45m");
            assert_eq!(view.trend.len(), 7);
        }
        other => panic!("unexpected page: {other:?}"),
    }
}

#[test]
fn coach_reply_appends_two_messages() {
    let (mut session, _clock) = session();
    let before = session.coach().messages().len();
    session
        .dispatch(Action::SendCoachMessage {
            text: "I have two exams next week".into(),
        })
        .unwrap();
    assert_eq!(session.coach().messages().len(), before + 2);

    let err = session
        .dispatch(Action::SendCoachMessage { text: "  ".into() })
        .unwrap_err();
    assert!(matches!(err, CoreError::Validation(_)));
    assert_eq!(session.coach().messages().len(), before + 2);
}

#[test]
fn profile_reflects_goals_and_toggles() {
    let (mut session, _clock) = session();
    session
        .dispatch(Action::AddGoal {
            text: "Drink more water".into(),
        })
        .unwrap();
    assert!(session
        .dispatch(Action::AddGoal {
            text: "Drink more water".into(),
        })
        .is_err());
    session.dispatch(Action::RemoveGoal { index: 0 }).unwrap();
    session
        .dispatch(Action::ToggleSetting {
            key: SettingKey::ShareAnonymizedData,
        })
        .unwrap();

    session.dispatch(Action::SelectTab { tab: Tab::Profile }).unwrap();
    match page(&session) {
        PageView::Profile(view) => {
            assert_eq!(view.goals, ["Sleep 8 hours", "Drink more water"]);
            assert!(!view.settings.share_anonymized_data);
            assert!(view.settings.push_notifications);
        }
        other => panic!("unexpected page: {other:?}"),
    }
}

#[test]
fn today_greets_configured_user() {
    let (session, _clock) = session();
    match page(&session) {
        PageView::Today(view) => {
            assert!(view.greeting.ends_with(", Alex!"));
            assert_eq!(view.check_in.default_tags, ["Exams"]);
            assert_eq!(view.upcoming_event.map(|c| c.event.id), Some("evt1".into()));
        }
        other => panic!("unexpected page: {other:?}"),
    }
}

#[test]
fn view_serializes_with_tags() {
    let (mut session, _clock) = session();
    session.dispatch(Action::SelectTab { tab: Tab::Events }).unwrap();
    let json = serde_json::to_value(session.view()).unwrap();
    assert_eq!(json["tab"], "events");
    assert_eq!(json["body"], "page");
    assert_eq!(json["view"]["page"], "events");
    assert_eq!(json["view"]["featured"]["event"]["id"], "evt1");
}
