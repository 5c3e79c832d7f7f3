//! Interactive terminal UI.

mod app;
mod ui;

use std::error::Error;
use std::io;

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::prelude::*;
use tracing::info;
use zenith_core::{Action, Config, Session, Tab};

use app::App;

pub fn run(config: Config, tab: Option<Tab>) -> Result<(), Box<dyn Error>> {
    let mut session = Session::from_config(config)?;
    if let Some(tab) = tab {
        session.dispatch(Action::SelectTab { tab })?;
    }
    let mut app = App::new(session);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    info!("interactive session started");
    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res?;
    info!("interactive session ended");
    Ok(())
}

/// Redraw after every input. While a countdown or the breathing reset is on
/// screen, also redraw on the session's interval; otherwise block for input.
fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> io::Result<()> {
    loop {
        app.refresh();
        terminal.draw(|f| ui::draw(f, app))?;

        let ready = match app.poll_timeout() {
            Some(timeout) => event::poll(timeout)?,
            None => true,
        };
        if !ready {
            continue;
        }
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press && app.handle_key(key) {
                return Ok(());
            }
        }
    }
}
