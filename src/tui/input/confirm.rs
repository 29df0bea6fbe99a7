use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::io::storage::Storage;
use crate::tui::app::{App, Mode};

pub(super) fn handle_confirm<S: Storage>(app: &mut App<S>, key: KeyEvent) {
    match (key.modifiers, key.code) {
        // Confirm: y or Enter
        (KeyModifiers::NONE, KeyCode::Char('y') | KeyCode::Enter)
        | (KeyModifiers::SHIFT, KeyCode::Char('Y')) => {
            app.view.confirm_pending();
            app.mode = Mode::Navigate;
            // The list may have shrunk
            app.clamp_cursor();
        }
        // Cancel: n or Esc
        (KeyModifiers::NONE, KeyCode::Char('n')) | (KeyModifiers::SHIFT, KeyCode::Char('N'))
        | (_, KeyCode::Esc) => {
            app.view.cancel_pending();
            app.mode = Mode::Navigate;
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::storage::MemoryStorage;
    use crate::model::Config;
    use crate::store::TaskStore;
    use crate::view::ViewController;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn sample_app(texts: &[&str]) -> App<MemoryStorage> {
        let config = Config::default();
        let mut controller = ViewController::new(TaskStore::new(MemoryStorage::new()), &config);
        for text in texts.iter().rev() {
            assert!(controller.submit_new_task(text));
        }
        App::new(controller, &config)
    }

    #[test]
    fn test_y_confirms_delete() {
        let mut app = sample_app(&["a", "b"]);
        let id = app.selected_id().unwrap();
        app.view.request_delete(id);
        app.mode = Mode::Confirm;

        handle_confirm(&mut app, key(KeyCode::Char('y')));
        assert_eq!(app.mode, Mode::Navigate);
        assert_eq!(app.view.snapshot().rows.len(), 1);
        assert!(app.view.snapshot().confirm.is_none());
    }

    #[test]
    fn test_n_cancels_delete() {
        let mut app = sample_app(&["a"]);
        let id = app.selected_id().unwrap();
        app.view.request_delete(id);
        app.mode = Mode::Confirm;

        handle_confirm(&mut app, key(KeyCode::Char('n')));
        assert_eq!(app.mode, Mode::Navigate);
        assert_eq!(app.view.snapshot().rows.len(), 1);
        assert!(app.view.snapshot().confirm.is_none());
    }

    #[test]
    fn test_esc_cancels() {
        let mut app = sample_app(&["a"]);
        let id = app.selected_id().unwrap();
        app.view.request_delete(id);
        app.mode = Mode::Confirm;

        handle_confirm(&mut app, key(KeyCode::Esc));
        assert_eq!(app.mode, Mode::Navigate);
        assert_eq!(app.view.snapshot().rows.len(), 1);
    }

    #[test]
    fn test_confirm_clamps_cursor_after_removal() {
        let mut app = sample_app(&["a", "b"]);
        app.cursor_to_end();
        let id = app.selected_id().unwrap();
        app.view.request_delete(id);
        app.mode = Mode::Confirm;

        handle_confirm(&mut app, key(KeyCode::Enter));
        assert_eq!(app.cursor, 0);
        assert!(app.selected_id().is_some());
    }

    #[test]
    fn test_other_keys_ignored() {
        let mut app = sample_app(&["a"]);
        let id = app.selected_id().unwrap();
        app.view.request_delete(id);
        app.mode = Mode::Confirm;

        handle_confirm(&mut app, key(KeyCode::Char('x')));
        assert_eq!(app.mode, Mode::Confirm);
        assert!(app.view.snapshot().confirm.is_some());
    }
}
