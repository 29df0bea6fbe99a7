use std::time::{Duration, Instant};

use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;

use crate::io::storage::MemoryStorage;
use crate::model::Config;
use crate::store::TaskStore;
use crate::tui::app::App;
use crate::view::ViewController;

pub const TERM_W: u16 = 80;
pub const TERM_H: u16 = 24;

/// Render into an in-memory buffer and return plain text (no styles).
pub fn render_to_string<F>(w: u16, h: u16, f: F) -> String
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            f(frame, area);
        })
        .unwrap();

    let buf = terminal.backend().buffer().clone();
    let w = buf.area.width as usize;
    let lines: Vec<String> = buf
        .content
        .chunks(w)
        .map(|row| {
            let s: String = row.iter().map(|cell| cell.symbol()).collect();
            s.trim_end().to_string()
        })
        .collect();

    // Trim trailing blank lines
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    lines[..end].join("\n")
}

/// Build an App over in-memory storage, seeded with pending tasks.
/// The first slice entry lands at row 0 (newest first).
pub fn sample_app(texts: &[&str]) -> App<MemoryStorage> {
    let config = Config::default();
    let mut controller = ViewController::new(TaskStore::new(MemoryStorage::new()), &config);
    for text in texts.iter().rev() {
        assert!(controller.submit_new_task(text));
    }
    // Seeding raises toasts; expire them so renders start clean
    controller.prune_notifications(Instant::now() + Duration::from_secs(60));
    App::new(controller, &config)
}
