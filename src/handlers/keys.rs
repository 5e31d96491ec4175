//! Keyboard Input Handling Module
//!
//! Translates terminal key presses into navigator inputs. Focus moves with
//! enter/space/l/→ and esc/backspace/h/←; the cursor of the focused column
//! moves with j/↓ and k/↑.

use crate::app::{App, Input};
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Applies `key` to `app`. Returns true when the user asked to quit.
pub fn handle_key_events(key: KeyEvent, app: &mut App) -> bool {
    if key.kind != KeyEventKind::Press {
        return false;
    }

    if is_quit(&key) {
        return true;
    }

    if let Some(input) = map_key(key.code) {
        app.handle_input(input);
    }
    false
}

fn is_quit(key: &KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

pub fn map_key(code: KeyCode) -> Option<Input> {
    match code {
        KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('l') | KeyCode::Right => {
            Some(Input::Advance)
        }
        KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('h') | KeyCode::Left => {
            Some(Input::Retreat)
        }
        KeyCode::Char('j') | KeyCode::Down => Some(Input::Next),
        KeyCode::Char('k') | KeyCode::Up => Some(Input::Previous),
        KeyCode::Char('r') => Some(Input::Reload),
        _ => None,
    }
}
