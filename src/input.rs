//! Keyboard input handling.
//!
//! Maps terminal key events to [`App`] mutations.  Anything that needs the
//! network or the store comes back as a [`Command`] for the event loop to
//! dispatch.
//!
//! ## For contributors
//!
//! To add a new keybinding:
//!
//! 1. Add a method on [`App`] for the action (if one doesn't exist).
//! 2. Add a `KeyCode` match arm in [`handle_browse_key`] that calls it.
//! 3. Update the help text in [`crate::ui`]'s status bar.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::{App, Command};
use crate::state::NewsType;

/// Process a single key event, updating app state accordingly.
///
/// Only reacts to key-press events (ignoring release / repeat) so that each
/// physical keypress triggers exactly one action.
pub fn handle_key_event(app: &mut App, key: KeyEvent) -> Option<Command> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    if app.editing {
        handle_search_key(app, key)
    } else {
        handle_browse_key(app, key)
    }
}

fn handle_search_key(app: &mut App, key: KeyEvent) -> Option<Command> {
    match key.code {
        KeyCode::Enter => Some(app.submit_search()),
        KeyCode::Esc => {
            app.editing = false;
            None
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(app.clear_search())
        }
        KeyCode::Backspace => {
            app.query.pop();
            None
        }
        // Other chords are not text.
        KeyCode::Char(_)
            if key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            None
        }
        KeyCode::Char(c) => {
            app.query.push(c);
            None
        }
        _ => None,
    }
}

fn handle_browse_key(app: &mut App, key: KeyEvent) -> Option<Command> {
    match key.code {
        KeyCode::Esc if app.show_detail => app.show_detail = false,
        KeyCode::Char('q') | KeyCode::Esc => app.quit = true,
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        KeyCode::Up | KeyCode::Char('k') => app.select_previous(),
        KeyCode::Home | KeyCode::Char('g') => app.select_first(),
        KeyCode::End | KeyCode::Char('G') => app.select_last(),
        KeyCode::Enter => app.toggle_detail(),
        KeyCode::Tab | KeyCode::Right => return Some(app.next_tab()),
        KeyCode::BackTab | KeyCode::Left => return Some(app.previous_tab()),
        KeyCode::Char('1') => return Some(app.select_tab(NewsType::Breaking)),
        KeyCode::Char('2') => return Some(app.select_tab(NewsType::Search)),
        KeyCode::Char('3') => return Some(app.select_tab(NewsType::Saved)),
        KeyCode::Char('/') => {
            let was_search = app.mode == NewsType::Search;
            app.start_search();
            if !was_search {
                return Some(app.reload());
            }
        }
        KeyCode::Char('b') => return app.toggle_bookmark(),
        KeyCode::Char('r') => return Some(app.reload()),
        _ => {}
    }
    None
}
