//! Interactive state on top of the session: form drafts, list cursors,
//! the text input line and the toast currently on screen.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use chrono::{Local, NaiveDate, NaiveTime};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use zenith_core::content::ContentStore;
use zenith_core::{
    Action, Config, Notice, OverlayKind, Phase, PlaceholderKind, Session, SettingKey, Tab,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputField {
    Task,
    Goal,
    CoachReply,
}

impl InputField {
    pub fn prompt(self) -> &'static str {
        match self {
            InputField::Task => "Task",
            InputField::Goal => "New goal",
            InputField::CoachReply => "Reply",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Editing(InputField),
}

/// Values the user is composing before they become an [`Action`].
#[derive(Debug, Clone)]
pub struct Drafts {
    pub task: String,
    pub focus_minutes: u32,
    pub break_minutes: u32,
    pub mood: u8,
    pub stress: u8,
    pub tags: Vec<String>,
    pub tag_cursor: usize,
    pub night_of: NaiveDate,
    pub bed_time: NaiveTime,
    pub wake_time: NaiveTime,
    pub sleep_quality: u8,
}

pub struct Toast {
    pub notice: Notice,
    shown_at: Instant,
}

pub struct App {
    pub session: Session,
    pub mode: InputMode,
    pub input: String,
    pub drafts: Drafts,
    /// Cursor into whichever list the current tab shows.
    pub selected: usize,
    pub toast: Option<Toast>,
    /// Notices waiting for the toast line, oldest first.
    pending: VecDeque<Notice>,
    toast_ttl: Duration,
}

impl App {
    pub fn new(session: Session) -> Self {
        let config: &Config = session.config();
        let seed = &session.content().catalog().checkin;
        let drafts = Drafts {
            task: config.timer.default_task.clone(),
            focus_minutes: config.timer.default_focus_minutes,
            break_minutes: config.timer.default_break_minutes,
            mood: seed.default_mood,
            stress: seed.default_stress,
            tags: seed.default_tags.clone(),
            tag_cursor: 0,
            night_of: Local::now().date_naive().pred_opt().unwrap_or_default(),
            bed_time: NaiveTime::from_hms_opt(23, 0, 0).unwrap_or_default(),
            wake_time: NaiveTime::from_hms_opt(7, 0, 0).unwrap_or_default(),
            sleep_quality: 4,
        };
        let toast_ttl = config.ui.notice_ttl();
        Self {
            session,
            mode: InputMode::Normal,
            input: String::new(),
            drafts,
            selected: 0,
            toast: None,
            pending: VecDeque::new(),
            toast_ttl,
        }
    }

    // ── Loop hooks ───────────────────────────────────────────────────

    /// Commit timer completions, then show queued notices one at a time,
    /// each for the toast TTL.
    pub fn refresh(&mut self) {
        self.session.refresh();
        self.pending.extend(self.session.take_notices());
        if self
            .toast
            .as_ref()
            .is_some_and(|t| t.shown_at.elapsed() >= self.toast_ttl)
        {
            self.toast = None;
        }
        if self.toast.is_none() {
            self.toast = self.pending.pop_front().map(|notice| Toast {
                notice,
                shown_at: Instant::now(),
            });
        }
    }

    /// How long to wait for input before redrawing. `None` blocks.
    pub fn poll_timeout(&self) -> Option<Duration> {
        let toast_left = self
            .toast
            .as_ref()
            .map(|t| self.toast_ttl.saturating_sub(t.shown_at.elapsed()));
        match (self.session.redraw_interval(), toast_left) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    // ── Input ────────────────────────────────────────────────────────

    /// Returns `true` when the user asked to quit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return true;
        }
        if let InputMode::Editing(field) = self.mode {
            self.handle_input(field, key.code);
            return false;
        }
        // Tab switching stays live under an overlay; closing it then lands
        // on the newly selected tab.
        if self.tab_key(key.code) {
            return false;
        }
        if self.session.overlays().current().is_some() {
            self.handle_overlay_key(key.code);
            return false;
        }

        match key.code {
            KeyCode::Char('q') => return true,
            KeyCode::Up => self.selected = self.selected.saturating_sub(1),
            KeyCode::Down => self.selected = (self.selected + 1).min(self.list_len().saturating_sub(1)),
            code => match self.session.tab() {
                Tab::Today => self.today_key(code),
                Tab::Focus => self.focus_key(code),
                Tab::Sleep => self.sleep_key(code),
                Tab::Events => self.events_key(code),
                Tab::MySchedule => self.schedule_key(code),
                Tab::Resources => self.resources_key(code),
                Tab::Coach => self.coach_key(code),
                Tab::Profile => self.profile_key(code),
            },
        }
        false
    }

    /// Returns `true` when `code` switched tabs.
    fn tab_key(&mut self, code: KeyCode) -> bool {
        let tab = match code {
            KeyCode::Tab => self.session.tab().next(),
            KeyCode::BackTab => self.session.tab().prev(),
            KeyCode::Char(c @ '1'..='8') => Tab::ALL[c as usize - '1' as usize],
            _ => return false,
        };
        self.select_tab(tab);
        true
    }

    fn dispatch(&mut self, action: Action) {
        // Rejections come back as warning notices.
        let _ = self.session.dispatch(action);
    }

    fn select_tab(&mut self, tab: Tab) {
        self.selected = 0;
        self.dispatch(Action::SelectTab { tab });
    }

    fn begin_input(&mut self, field: InputField) {
        self.input = match field {
            InputField::Task => self.drafts.task.clone(),
            InputField::Goal | InputField::CoachReply => String::new(),
        };
        self.mode = InputMode::Editing(field);
    }

    fn handle_input(&mut self, field: InputField, code: KeyCode) {
        match code {
            KeyCode::Char(c) => self.input.push(c),
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Esc => {
                self.input.clear();
                self.mode = InputMode::Normal;
            }
            KeyCode::Enter => {
                let text = std::mem::take(&mut self.input);
                self.mode = InputMode::Normal;
                match field {
                    InputField::Task => self.drafts.task = text,
                    InputField::Goal => self.dispatch(Action::AddGoal { text }),
                    InputField::CoachReply => self.dispatch(Action::SendCoachMessage { text }),
                }
            }
            _ => {}
        }
    }

    fn handle_overlay_key(&mut self, code: KeyCode) {
        let overlays = self.session.overlays();
        let event_id = match overlays.current() {
            Some(zenith_core::Overlay::EventDetails { event_id }) => Some(event_id.clone()),
            _ => None,
        };
        let wind_down = overlays.is_open(OverlayKind::WindDown);

        match code {
            KeyCode::Esc | KeyCode::Char('q') => self.dispatch(Action::CloseOverlay),
            KeyCode::Char('r') => {
                if let Some(event_id) = event_id {
                    self.dispatch(Action::Rsvp { event_id });
                }
            }
            KeyCode::Char('x') => {
                if let Some(event_id) = event_id {
                    self.dispatch(Action::CancelRsvp { event_id });
                }
            }
            KeyCode::Enter if wind_down => self.dispatch(Action::StartWindDownTimer),
            KeyCode::Enter => self.dispatch(Action::CloseOverlay),
            _ => {}
        }
    }

    /// Length of the list the cursor moves over on the current tab.
    fn list_len(&self) -> usize {
        let content: &ContentStore = self.session.content();
        match self.session.tab() {
            Tab::Today => content.catalog().checkin.tags.len(),
            Tab::Events => content.list_events().len(),
            Tab::MySchedule => content.schedule().len(),
            Tab::Resources => content.resources_in(self.session.resource_filter()).len(),
            Tab::Profile => SettingKey::ALL.len() + content.goals().len(),
            Tab::Focus | Tab::Sleep | Tab::Coach => 0,
        }
    }

    // ── Per-tab keys ─────────────────────────────────────────────────

    fn today_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('m') => self.drafts.mood = step_scale(self.drafts.mood, 1),
            KeyCode::Char('M') => self.drafts.mood = step_scale(self.drafts.mood, -1),
            KeyCode::Char('s') => self.drafts.stress = step_scale(self.drafts.stress, 1),
            KeyCode::Char('S') => self.drafts.stress = step_scale(self.drafts.stress, -1),
            KeyCode::Char(' ') => {
                let tags = &self.session.content().catalog().checkin.tags;
                if let Some(tag) = tags.get(self.selected) {
                    if let Some(pos) = self.drafts.tags.iter().position(|t| t == tag) {
                        self.drafts.tags.remove(pos);
                    } else {
                        self.drafts.tags.push(tag.clone());
                    }
                }
            }
            KeyCode::Enter => self.dispatch(Action::LogCheckIn {
                mood: self.drafts.mood,
                stress: self.drafts.stress,
                tags: self.drafts.tags.clone(),
            }),
            KeyCode::Char('b') => self.dispatch(Action::OpenBreathing),
            KeyCode::Char('c') => self.select_tab(Tab::Coach),
            KeyCode::Char('e') => self.select_tab(Tab::Events),
            _ => {}
        }
    }

    fn focus_key(&mut self, code: KeyCode) {
        let phase = self.session.timer().phase_at(self.session.now());
        let timer = &self.session.config().timer;
        let step = timer.step_minutes.max(1);
        let (focus_min, focus_max) = (timer.min_focus_minutes, timer.max_focus_minutes);
        let (break_min, break_max) = (timer.min_break_minutes, timer.max_break_minutes);

        match (phase, code) {
            (Phase::Idle, KeyCode::Char('e')) => self.begin_input(InputField::Task),
            (Phase::Idle, KeyCode::Char('+')) => {
                self.drafts.focus_minutes = (self.drafts.focus_minutes + step).min(focus_max);
            }
            (Phase::Idle, KeyCode::Char('-')) => {
                self.drafts.focus_minutes =
                    self.drafts.focus_minutes.saturating_sub(step).max(focus_min);
            }
            (Phase::Idle, KeyCode::Char(']')) => {
                self.drafts.break_minutes = (self.drafts.break_minutes + step).min(break_max);
            }
            (Phase::Idle, KeyCode::Char('[')) => {
                self.drafts.break_minutes =
                    self.drafts.break_minutes.saturating_sub(step).max(break_min);
            }
            (Phase::Idle, KeyCode::Enter) => self.dispatch(Action::StartFocus {
                task: self.drafts.task.clone(),
                focus_minutes: self.drafts.focus_minutes,
                break_minutes: self.drafts.break_minutes,
            }),
            (Phase::FocusComplete, KeyCode::Enter) => self.dispatch(Action::StartBreak),
            (Phase::BreakComplete, KeyCode::Enter) => self.dispatch(Action::StartNextFocus),
            (Phase::Idle, _) => {}
            (_, KeyCode::Char('s')) => self.dispatch(Action::StopTimer),
            _ => {}
        }
    }

    fn sleep_key(&mut self, code: KeyCode) {
        let quarter = chrono::Duration::minutes(15);
        match code {
            KeyCode::Char('w') => self.dispatch(Action::OpenWindDown),
            KeyCode::Char('b') => self.drafts.bed_time = self.drafts.bed_time + quarter,
            KeyCode::Char('B') => self.drafts.bed_time = self.drafts.bed_time - quarter,
            KeyCode::Char('k') => self.drafts.wake_time = self.drafts.wake_time + quarter,
            KeyCode::Char('K') => self.drafts.wake_time = self.drafts.wake_time - quarter,
            KeyCode::Char('>') => self.drafts.sleep_quality = step_scale(self.drafts.sleep_quality, 1),
            KeyCode::Char('<') => self.drafts.sleep_quality = step_scale(self.drafts.sleep_quality, -1),
            KeyCode::Enter => self.dispatch(Action::LogSleep {
                night_of: self.drafts.night_of,
                bed_time: self.drafts.bed_time,
                wake_time: self.drafts.wake_time,
                quality: self.drafts.sleep_quality,
            }),
            _ => {}
        }
    }

    fn events_key(&mut self, code: KeyCode) {
        let Some(event_id) = self
            .session
            .content()
            .list_events()
            .get(self.selected)
            .map(|e| e.id.clone())
        else {
            return;
        };
        match code {
            KeyCode::Enter => self.dispatch(Action::OpenEventDetails { event_id }),
            KeyCode::Char('r') => self.dispatch(Action::Rsvp { event_id }),
            _ => {}
        }
    }

    fn schedule_key(&mut self, code: KeyCode) {
        let Some(event_id) = self.session.content().schedule().get(self.selected).cloned() else {
            if code == KeyCode::Char('e') {
                self.select_tab(Tab::Events);
            }
            return;
        };
        match code {
            KeyCode::Enter => self.dispatch(Action::OpenEventDetails { event_id }),
            KeyCode::Char('x') | KeyCode::Delete => {
                self.dispatch(Action::CancelRsvp { event_id });
                let len = self.session.content().schedule().len();
                self.selected = self.selected.min(len.saturating_sub(1));
            }
            _ => {}
        }
    }

    fn resources_key(&mut self, code: KeyCode) {
        let catalog = self.session.content().catalog();
        let mut filters: Vec<Option<String>> = vec![None];
        filters.extend(catalog.resource_categories().into_iter().map(|c| Some(c.to_string())));
        let current = filters
            .iter()
            .position(|f| f.as_deref() == self.session.resource_filter())
            .unwrap_or(0);

        match code {
            KeyCode::Left | KeyCode::Right => {
                let next = if code == KeyCode::Right {
                    (current + 1) % filters.len()
                } else {
                    (current + filters.len() - 1) % filters.len()
                };
                self.selected = 0;
                self.dispatch(Action::FilterResources {
                    category: filters.swap_remove(next),
                });
            }
            KeyCode::Enter => {
                let resource_id = self
                    .session
                    .content()
                    .resources_in(self.session.resource_filter())
                    .get(self.selected)
                    .map(|r| r.id.clone());
                if let Some(resource_id) = resource_id {
                    self.dispatch(Action::ReadResource { resource_id });
                }
            }
            _ => {}
        }
    }

    fn coach_key(&mut self, code: KeyCode) {
        if matches!(code, KeyCode::Enter | KeyCode::Char('i')) {
            self.begin_input(InputField::CoachReply);
        }
    }

    fn profile_key(&mut self, code: KeyCode) {
        let settings = SettingKey::ALL.len();
        match code {
            KeyCode::Enter | KeyCode::Char(' ') if self.selected < settings => {
                self.dispatch(Action::ToggleSetting {
                    key: SettingKey::ALL[self.selected],
                });
            }
            KeyCode::Char('d') | KeyCode::Delete if self.selected >= settings => {
                self.dispatch(Action::RemoveGoal {
                    index: self.selected - settings,
                });
                self.selected = self.selected.min(self.list_len().saturating_sub(1));
            }
            KeyCode::Char('a') => self.begin_input(InputField::Goal),
            KeyCode::Char('p') => self.dispatch(Action::OpenPlaceholder {
                placeholder: PlaceholderKind::PrivacyPolicy,
            }),
            KeyCode::Char('h') => self.dispatch(Action::OpenPlaceholder {
                placeholder: PlaceholderKind::HelpSupport,
            }),
            KeyCode::Char('o') => self.dispatch(Action::OpenPlaceholder {
                placeholder: PlaceholderKind::Logout,
            }),
            _ => {}
        }
    }
}

/// Move a 1..=5 slider by `delta`, saturating at the ends.
fn step_scale(value: u8, delta: i8) -> u8 {
    value.saturating_add_signed(delta).clamp(1, 5)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventKind;

    fn app() -> App {
        App::new(Session::from_config(Config::default()).unwrap())
    }

    fn press(app: &mut App, code: KeyCode) -> bool {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn sliders_saturate() {
        assert_eq!(step_scale(5, 1), 5);
        assert_eq!(step_scale(1, -1), 1);
        assert_eq!(step_scale(3, 1), 4);
    }

    #[test]
    fn digits_jump_to_tabs() {
        let mut app = app();
        press(&mut app, KeyCode::Char('4'));
        assert_eq!(app.session.tab(), Tab::Events);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.session.tab(), Tab::MySchedule);
    }

    #[test]
    fn editing_task_label_then_starting() {
        let mut app = app();
        press(&mut app, KeyCode::Char('2'));
        press(&mut app, KeyCode::Char('e'));
        assert_eq!(app.mode, InputMode::Editing(InputField::Task));
        app.input.clear();
        for c in "Lab report".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.drafts.task, "Lab report");

        press(&mut app, KeyCode::Char('+'));
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.session.timer().task_label(), "Lab report");
        assert_eq!(app.session.timer().state().focus_duration_secs, 30 * 60);
        assert!(app.poll_timeout().is_some());
    }

    #[test]
    fn closing_overlay_lands_on_tab_chosen_underneath() {
        let mut app = app();
        press(&mut app, KeyCode::Char('b'));
        assert!(app.session.overlays().is_open(OverlayKind::Breathing));
        press(&mut app, KeyCode::Char('3'));
        assert_eq!(app.session.tab(), Tab::Sleep);
        assert!(app.session.overlays().is_open(OverlayKind::Breathing));
        assert!(app.session.view().is_overlay());

        press(&mut app, KeyCode::Esc);
        assert!(app.session.overlays().current().is_none());
        assert_eq!(app.session.tab(), Tab::Sleep);
        assert!(!app.session.view().is_overlay());
    }

    #[test]
    fn notices_are_shown_in_order() {
        let mut config = Config::default();
        config.ui.notice_ttl_ms = 0;
        let mut app = App::new(Session::from_config(config).unwrap());
        let _ = app.session.dispatch(Action::AddGoal { text: " ".into() });
        let _ = app.session.dispatch(Action::RemoveGoal { index: 99 });

        let mut shown = Vec::new();
        for _ in 0..3 {
            app.refresh();
            shown.extend(app.toast.as_ref().map(|t| t.notice.message.clone()));
        }
        assert_eq!(shown.len(), 2);
        assert_eq!(shown[0], "Goal cannot be empty");
        assert!(shown[1].starts_with("Index 99 out of range"));
        assert!(app.toast.is_none());
    }

    #[test]
    fn rejected_action_becomes_toast() {
        let mut app = app();
        press(&mut app, KeyCode::Char('8'));
        press(&mut app, KeyCode::Char('a'));
        press(&mut app, KeyCode::Enter);
        app.refresh();
        let toast = app.toast.as_ref().map(|t| t.notice.message.clone());
        assert_eq!(toast.as_deref(), Some("Goal cannot be empty"));
    }

    #[test]
    fn ctrl_c_quits_from_input_mode() {
        let mut app = app();
        press(&mut app, KeyCode::Char('7'));
        press(&mut app, KeyCode::Char('i'));
        let quit = app.handle_key(KeyEvent::new_with_kind(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL,
            KeyEventKind::Press,
        ));
        assert!(quit);
    }
}
