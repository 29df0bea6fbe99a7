use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::io::storage::Storage;
use crate::model::Filter;
use crate::tui::app::{App, InputBuffer, Mode};

pub(super) fn handle_navigate<S: Storage>(app: &mut App<S>, key: KeyEvent) {
    match (key.modifiers, key.code) {
        // Quit: q or Ctrl+C
        (KeyModifiers::NONE, KeyCode::Char('q')) => {
            app.should_quit = true;
        }
        (m, KeyCode::Char('c')) if m.contains(KeyModifiers::CONTROL) => {
            app.should_quit = true;
        }

        // Cursor movement
        (KeyModifiers::NONE, KeyCode::Down | KeyCode::Char('j')) => {
            app.move_cursor_down();
        }
        (KeyModifiers::NONE, KeyCode::Up | KeyCode::Char('k')) => {
            app.move_cursor_up();
        }
        (KeyModifiers::NONE, KeyCode::Char('g')) | (_, KeyCode::Home) => {
            app.cursor = 0;
        }
        (KeyModifiers::SHIFT, KeyCode::Char('G')) | (_, KeyCode::End) => {
            app.cursor_to_end();
        }

        // Toggle completion of the selected task
        (KeyModifiers::NONE, KeyCode::Char(' ') | KeyCode::Enter) => {
            if let Some(id) = app.selected_id() {
                app.view.toggle_task(id);
            }
        }

        // Add a new task
        (KeyModifiers::NONE, KeyCode::Char('a') | KeyCode::Char('i')) => {
            app.input.clear();
            app.mode = Mode::Insert;
        }

        // Edit the selected task
        (KeyModifiers::NONE, KeyCode::Char('e')) => {
            if let Some(id) = app.selected_id()
                && let Some(text) = app.view.request_edit(id)
            {
                app.input = InputBuffer::with_text(text);
                app.mode = Mode::Edit;
            }
        }

        // Delete the selected task (with confirmation)
        (KeyModifiers::NONE, KeyCode::Char('d') | KeyCode::Delete) => {
            if let Some(id) = app.selected_id()
                && app.view.request_delete(id).is_some()
            {
                app.mode = Mode::Confirm;
            }
        }

        // Clear all completed tasks (with confirmation)
        (KeyModifiers::NONE, KeyCode::Char('c')) => {
            if app.view.request_clear_completed() {
                app.mode = Mode::Confirm;
            }
        }

        // Filter switching: 1/2/3 direct, Tab/Shift+Tab cycle
        (KeyModifiers::NONE, KeyCode::Char('1')) => {
            app.set_filter(Filter::All);
        }
        (KeyModifiers::NONE, KeyCode::Char('2')) => {
            app.set_filter(Filter::Pending);
        }
        (KeyModifiers::NONE, KeyCode::Char('3')) => {
            app.set_filter(Filter::Completed);
        }
        (KeyModifiers::NONE, KeyCode::Tab) => {
            app.set_filter(app.view.filter().next());
        }
        (KeyModifiers::SHIFT, KeyCode::BackTab) => {
            app.set_filter(app.view.filter().prev());
        }

        // Toggle the key hint footer
        (KeyModifiers::NONE, KeyCode::Char('?')) => {
            app.show_key_hints = !app.show_key_hints;
        }

        _ => {}
    }
}
