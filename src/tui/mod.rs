// File: ./src/tui/mod.rs
pub mod action;
pub mod state;
pub mod view;

use crate::config::Config;
use crate::session::Session;
use crate::tui::state::AppState;
use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::Backend, backend::CrosstermBackend};
use std::{io, time::Duration};

/// Runs the interactive picker until the user quits, then stores stage
/// toggles back into the config file.
pub fn run(session: Session, config: Config) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app_state = AppState::new(session, config);
    let result = event_loop(&mut terminal, &mut app_state);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    result?;

    let AppState {
        session,
        mut config,
        ..
    } = app_state;
    session.store_into(&mut config);
    config.save()?;
    Ok(())
}

fn event_loop<B: Backend>(terminal: &mut Terminal<B>, app_state: &mut AppState) -> Result<()> {
    loop {
        terminal.draw(|f| view::draw(f, app_state))?;

        if !event::poll(Duration::from_millis(250))? {
            continue;
        }
        let action = match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                action::map_key(key, app_state.mode)
            }
            Event::Mouse(mouse) => action::map_mouse(mouse),
            _ => continue,
        };
        if !app_state.apply(action) {
            return Ok(());
        }
    }
}
