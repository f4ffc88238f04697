//! Terminal setup and teardown
//!
//! Raw mode and the alternate screen are undone on exit and from the panic
//! hook, so a crash never leaves the shell unusable.

use anyhow::Result;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::panic;

use crate::config::Settings;
use crate::error::BuzzPayError;
use crate::services::{SystemClipboard, SystemShareTarget};
use crate::storage::Storage;
use crate::wizard::SystemClock;

use super::app::App;
use super::event::EventHandler;
use super::handler::handle_event;

pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Initialize the terminal for TUI mode
pub fn init_terminal() -> Result<Tui> {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        original_hook(panic_info);
    }));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    Ok(Terminal::new(backend)?)
}

/// Restore the terminal to its original state
pub fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    Ok(())
}

/// Run the request creation wizard
pub fn run_tui(storage: &Storage, settings: &Settings) -> Result<()> {
    let mut app = App::new(
        storage,
        settings,
        SystemClock,
        Box::new(SystemShareTarget),
        Box::new(SystemClipboard),
    )?;

    let mut terminal = init_terminal()?;
    let result = event_loop(&mut terminal, &mut app);
    restore_terminal()?;
    result?;

    if let Some(request) = &app.created {
        println!("Created request: {}", request.id);
        if let Some(link) = app.share_link() {
            println!("{}", link);
        }
    }
    Ok(())
}

fn event_loop(terminal: &mut Tui, app: &mut App<'_>) -> Result<()> {
    let events = EventHandler::default();

    while !app.should_quit {
        terminal.draw(|frame| super::views::render(frame, app))?;
        let event = events
            .next()
            .map_err(|_| BuzzPayError::Tui("input thread stopped".into()))?;
        handle_event(app, event)?;
    }
    Ok(())
}
