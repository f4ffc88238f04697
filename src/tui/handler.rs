//! Key handling for the TUI

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::error::BuzzPayResult;
use crate::wizard::Clock;

use super::app::App;
use super::event::Event;

/// Handle one terminal event
pub fn handle_event<C: Clock>(app: &mut App<'_, C>, event: Event) -> BuzzPayResult<()> {
    match event {
        Event::Key(key) => handle_key(app, key),
        Event::Tick => {
            app.on_tick();
            Ok(())
        }
        Event::Resize(_, _) => Ok(()),
    }
}

fn handle_key<C: Clock>(app: &mut App<'_, C>, key: KeyEvent) -> BuzzPayResult<()> {
    if key.code == KeyCode::Esc
        || (key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c'))
    {
        app.quit();
        return Ok(());
    }

    if app.created.is_some() {
        match key.code {
            KeyCode::Enter | KeyCode::Char('q') => app.quit(),
            KeyCode::Char('s') => app.share(),
            _ => {}
        }
        return Ok(());
    }

    match key.code {
        KeyCode::Enter => app.submit(),
        KeyCode::Up | KeyCode::BackTab => app.focus_previous(),
        KeyCode::Down | KeyCode::Tab => app.focus_next(),
        KeyCode::Left => app.input.move_left(),
        KeyCode::Right => app.input.move_right(),
        KeyCode::Home => app.input.move_start(),
        KeyCode::End => app.input.move_end(),
        KeyCode::Backspace => {
            if app.input.backspace() {
                app.commit_input()?;
            }
        }
        KeyCode::Delete => {
            if app.input.delete() {
                app.commit_input()?;
            }
        }
        KeyCode::Char(c) => {
            app.input.insert(c);
            app.commit_input()?;
        }
        _ => {}
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BuzzPayPaths, Settings};
    use crate::services::{SystemClipboard, SystemShareTarget};
    use crate::storage::Storage;
    use crate::wizard::ManualClock;
    use tempfile::TempDir;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_keys_edit_and_quit() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BuzzPayPaths::with_base_dir(temp_dir.path().to_path_buf());
        let settings = Settings::default();
        let storage = Storage::open(&paths, &settings).unwrap();
        let mut app = App::new(
            &storage,
            &settings,
            ManualClock::new(),
            Box::new(SystemShareTarget),
            Box::new(SystemClipboard),
        )
        .unwrap();

        for c in "Ann".chars() {
            handle_event(&mut app, key(KeyCode::Char(c))).unwrap();
        }
        handle_event(&mut app, key(KeyCode::Backspace)).unwrap();
        assert_eq!(app.wizard.value(0), "An");

        handle_event(&mut app, key(KeyCode::Esc)).unwrap();
        assert!(app.should_quit);
    }
}
