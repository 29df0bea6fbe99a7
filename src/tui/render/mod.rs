pub mod confirm_popup;
pub mod header;
pub mod list_view;
pub mod status_row;
pub mod toasts;

#[cfg(test)]
pub mod test_helpers;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::Style;
use ratatui::widgets::Block;

use crate::io::storage::Storage;

use super::app::{App, Mode};

/// Top-level render pass, dispatching to the region renderers.
pub fn render<S: Storage>(frame: &mut Frame, app: &mut App<S>) {
    let area = frame.area();

    // Background fill
    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    // Layout: header (2 rows) | task list | status row | optional hints
    let hint_rows = if app.show_key_hints { 1 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),         // title + filter tabs + separator
            Constraint::Min(1),            // task list
            Constraint::Length(1),         // status / input row
            Constraint::Length(hint_rows), // key hints
        ])
        .split(area);

    // One snapshot per frame; every sub-renderer reads the same state
    let snapshot = app.view.snapshot();

    header::render_header(frame, app, &snapshot, chunks[0]);
    list_view::render_list(frame, app, &snapshot, chunks[1]);
    status_row::render_status_row(frame, app, &snapshot, chunks[2]);
    if app.show_key_hints {
        status_row::render_key_hints(frame, app, chunks[3]);
    }

    // Confirmation popup (rendered on top of everything)
    if app.mode == Mode::Confirm {
        confirm_popup::render_confirm_popup(frame, app, &snapshot, area);
    }

    // Notification toasts (rendered last, bottom-right)
    toasts::render_toasts(frame, app, area);
}
