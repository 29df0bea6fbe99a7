use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::io::storage::Storage;
use crate::tui::app::{App, Mode};

/// Shared text-entry handler for Insert (new task) and Edit (rewrite task).
pub(super) fn handle_editor<S: Storage>(app: &mut App<S>, key: KeyEvent) {
    match (key.modifiers, key.code) {
        (_, KeyCode::Esc) => {
            if app.mode == Mode::Edit {
                app.view.cancel_edit();
            }
            app.input.clear();
            app.mode = Mode::Navigate;
        }
        (_, KeyCode::Enter) => {
            submit(app);
        }

        // Cursor movement
        (m, KeyCode::Left) if m.contains(KeyModifiers::CONTROL) => {
            app.input.move_word_left();
        }
        (m, KeyCode::Right) if m.contains(KeyModifiers::CONTROL) => {
            app.input.move_word_right();
        }
        (_, KeyCode::Left) => app.input.move_left(),
        (_, KeyCode::Right) => app.input.move_right(),
        (_, KeyCode::Home) => app.input.move_home(),
        (_, KeyCode::End) => app.input.move_end(),
        (m, KeyCode::Char('a')) if m.contains(KeyModifiers::CONTROL) => {
            app.input.move_home();
        }
        (m, KeyCode::Char('e')) if m.contains(KeyModifiers::CONTROL) => {
            app.input.move_end();
        }

        // Deletion
        (_, KeyCode::Backspace) => app.input.backspace(),
        (_, KeyCode::Delete) => app.input.delete(),
        (m, KeyCode::Char('w')) if m.contains(KeyModifiers::CONTROL) => {
            app.input.delete_word_left();
        }
        (m, KeyCode::Char('u')) if m.contains(KeyModifiers::CONTROL) => {
            app.input.delete_to_start();
        }

        // Plain character insert
        (m, KeyCode::Char(c)) if !m.contains(KeyModifiers::CONTROL) => {
            app.input.insert(c);
        }

        _ => {}
    }
}

/// Submit the buffer. On success the editor closes; on a validation
/// failure the text stays in place so the user can fix it.
fn submit<S: Storage>(app: &mut App<S>) {
    let text = app.input.text.clone();
    match app.mode {
        Mode::Insert => {
            if app.view.submit_new_task(&text) {
                app.input.clear();
                app.mode = Mode::Navigate;
                // New tasks land at the top of the list
                app.cursor = 0;
                app.scroll_offset = 0;
            }
        }
        Mode::Edit => {
            if app.view.commit_edit(&text) {
                app.input.clear();
                app.mode = Mode::Navigate;
                app.clamp_cursor();
            }
        }
        _ => {}
    }
}
