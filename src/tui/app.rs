use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::io::discover::{find_data_file, load_config};
use crate::io::storage::{JsonFileStorage, Storage};
use crate::model::{Config, Filter, TaskId};
use crate::store::TaskStore;
use crate::util::unicode;
use crate::view::ViewController;

use super::input;
use super::render;
use super::theme::Theme;

/// Current interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Navigate,
    /// Typing a brand new task
    Insert,
    /// Rewriting an existing task's text
    Edit,
    /// y/n prompt for a staged destructive action
    Confirm,
}

/// Single-line editable text buffer. The cursor is a byte offset, always
/// on a grapheme boundary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputBuffer {
    pub text: String,
    pub cursor: usize,
}

impl InputBuffer {
    pub fn with_text(text: String) -> Self {
        let cursor = text.len();
        InputBuffer { text, cursor }
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    pub fn insert(&mut self, c: char) {
        self.text.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    pub fn backspace(&mut self) {
        if let Some(prev) = unicode::prev_grapheme_boundary(&self.text, self.cursor) {
            self.text.replace_range(prev..self.cursor, "");
            self.cursor = prev;
        }
    }

    pub fn delete(&mut self) {
        if let Some(next) = unicode::next_grapheme_boundary(&self.text, self.cursor) {
            self.text.replace_range(self.cursor..next, "");
        }
    }

    pub fn move_left(&mut self) {
        if let Some(prev) = unicode::prev_grapheme_boundary(&self.text, self.cursor) {
            self.cursor = prev;
        }
    }

    pub fn move_right(&mut self) {
        if let Some(next) = unicode::next_grapheme_boundary(&self.text, self.cursor) {
            self.cursor = next;
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.text.len();
    }

    pub fn move_word_left(&mut self) {
        self.cursor = unicode::word_boundary_left(&self.text, self.cursor);
    }

    pub fn move_word_right(&mut self) {
        self.cursor = unicode::word_boundary_right(&self.text, self.cursor);
    }

    pub fn delete_word_left(&mut self) {
        let start = unicode::word_boundary_left(&self.text, self.cursor);
        self.text.replace_range(start..self.cursor, "");
        self.cursor = start;
    }

    pub fn delete_to_start(&mut self) {
        self.text.replace_range(..self.cursor, "");
        self.cursor = 0;
    }

    /// Characters typed, for the length indicator.
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}

// ---------------------------------------------------------------------------
// App state
// ---------------------------------------------------------------------------

/// Main application state: the view controller plus terminal-only state
/// (mode, list cursor, input buffer, theme).
pub struct App<S: Storage> {
    pub view: ViewController<S>,
    pub mode: Mode,
    pub theme: Theme,
    pub input: InputBuffer,
    /// Selected row in the filtered list
    pub cursor: usize,
    /// First visible row of the list viewport
    pub scroll_offset: usize,
    pub show_key_hints: bool,
    pub should_quit: bool,
}

impl<S: Storage> App<S> {
    pub fn new(view: ViewController<S>, config: &Config) -> Self {
        App {
            view,
            mode: Mode::Navigate,
            theme: Theme::from_config(&config.ui),
            input: InputBuffer::default(),
            cursor: 0,
            scroll_offset: 0,
            show_key_hints: config.ui.show_key_hints,
            should_quit: false,
        }
    }

    /// Id of the task under the cursor in the filtered list.
    pub fn selected_id(&self) -> Option<TaskId> {
        self.view.snapshot().rows.get(self.cursor).map(|t| t.id)
    }

    /// Keep the cursor on a valid row after the list changes shape.
    pub fn clamp_cursor(&mut self) {
        let len = self.view.snapshot().rows.len();
        self.cursor = self.cursor.min(len.saturating_sub(1));
    }

    pub fn move_cursor_down(&mut self) {
        if self.cursor + 1 < self.view.snapshot().rows.len() {
            self.cursor += 1;
        }
    }

    pub fn move_cursor_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn cursor_to_end(&mut self) {
        self.cursor = self.view.snapshot().rows.len().saturating_sub(1);
    }

    /// Switch filters; the old cursor position is meaningless in the new
    /// list, so selection returns to the top.
    pub fn set_filter(&mut self, filter: Filter) {
        self.view.set_filter(filter);
        self.cursor = 0;
        self.scroll_offset = 0;
    }
}

// ---------------------------------------------------------------------------
// Entry point and event loop
// ---------------------------------------------------------------------------

/// Run the TUI application
pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cwd = std::env::current_dir()?;
    let data_file = find_data_file(&cwd);
    let config = load_config(&data_file);

    let store = TaskStore::new(JsonFileStorage::new(&data_file));
    let mut controller = ViewController::new(store, &config);
    controller.load();

    let mut app = App::new(controller, &config);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App<JsonFileStorage>,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        app.view.prune_notifications(Instant::now());
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(250))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            input::handle_key(app, key);
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::storage::MemoryStorage;

    fn sample_app(texts: &[&str]) -> App<MemoryStorage> {
        let config = Config::default();
        let mut controller = ViewController::new(TaskStore::new(MemoryStorage::new()), &config);
        // Added in reverse so the first slice entry lands at row 0
        for text in texts.iter().rev() {
            assert!(controller.submit_new_task(text));
        }
        App::new(controller, &config)
    }

    // --- InputBuffer ---

    #[test]
    fn test_input_insert_and_backspace() {
        let mut input = InputBuffer::default();
        for c in "abc".chars() {
            input.insert(c);
        }
        assert_eq!(input.text, "abc");
        assert_eq!(input.cursor, 3);

        input.backspace();
        assert_eq!(input.text, "ab");
        assert_eq!(input.cursor, 2);
    }

    #[test]
    fn test_input_mid_string_editing() {
        let mut input = InputBuffer::with_text("helo".to_string());
        input.move_left();
        input.insert('l');
        assert_eq!(input.text, "hello");
        assert_eq!(input.cursor, 4);

        input.delete();
        assert_eq!(input.text, "hell");
    }

    #[test]
    fn test_input_backspace_removes_whole_grapheme() {
        let mut input = InputBuffer::with_text("a🎉".to_string());
        input.backspace();
        assert_eq!(input.text, "a");
        assert_eq!(input.cursor, 1);
    }

    #[test]
    fn test_input_word_motion_and_delete() {
        let mut input = InputBuffer::with_text("one two three".to_string());
        input.move_word_left();
        assert_eq!(input.cursor, 8); // start of "three"

        input.delete_word_left();
        assert_eq!(input.text, "one three");
        assert_eq!(input.cursor, 4);

        input.move_home();
        input.move_word_right();
        assert_eq!(input.cursor, 4);
    }

    #[test]
    fn test_input_delete_to_start() {
        let mut input = InputBuffer::with_text("hello world".to_string());
        input.move_word_left();
        input.delete_to_start();
        assert_eq!(input.text, "world");
        assert_eq!(input.cursor, 0);
    }

    #[test]
    fn test_input_char_count_not_bytes() {
        let input = InputBuffer::with_text("你好".to_string());
        assert_eq!(input.char_count(), 2);
    }

    // --- App cursor ---

    #[test]
    fn test_cursor_movement_clamps_to_list() {
        let mut app = sample_app(&["a", "b", "c"]);
        assert_eq!(app.cursor, 0);

        app.move_cursor_up();
        assert_eq!(app.cursor, 0);

        app.move_cursor_down();
        app.move_cursor_down();
        app.move_cursor_down();
        assert_eq!(app.cursor, 2);

        app.cursor_to_end();
        assert_eq!(app.cursor, 2);
    }

    #[test]
    fn test_selected_id_follows_cursor() {
        let app = sample_app(&["a", "b"]);
        let rows = app.view.snapshot().rows;
        assert_eq!(app.selected_id(), Some(rows[0].id));

        let mut app = app;
        app.move_cursor_down();
        assert_eq!(app.selected_id(), Some(rows[1].id));
    }

    #[test]
    fn test_selected_id_empty_list() {
        let app = sample_app(&[]);
        assert_eq!(app.selected_id(), None);
    }

    #[test]
    fn test_clamp_cursor_after_shrink() {
        let mut app = sample_app(&["a", "b", "c"]);
        app.cursor_to_end();

        let id = app.selected_id().unwrap();
        app.view.request_delete(id);
        app.view.confirm_delete();
        app.clamp_cursor();
        assert_eq!(app.cursor, 1);
    }

    #[test]
    fn test_set_filter_resets_cursor() {
        let mut app = sample_app(&["a", "b", "c"]);
        app.cursor_to_end();
        app.scroll_offset = 1;

        app.set_filter(Filter::Completed);
        assert_eq!(app.cursor, 0);
        assert_eq!(app.scroll_offset, 0);
        assert!(app.view.snapshot().rows.is_empty());
    }
}
