mod confirm;
mod editor;
mod navigate;

use crossterm::event::{KeyCode, KeyEvent};

use crate::io::storage::Storage;

use super::app::{App, Mode};

use confirm::handle_confirm;
use editor::handle_editor;
use navigate::handle_navigate;

/// Handle a key event in the current mode
pub fn handle_key<S: Storage>(app: &mut App<S>, key: KeyEvent) {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }

    match app.mode {
        Mode::Navigate => handle_navigate(app, key),
        Mode::Insert | Mode::Edit => handle_editor(app, key),
        Mode::Confirm => handle_confirm(app, key),
    }
}
