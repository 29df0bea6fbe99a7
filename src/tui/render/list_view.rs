use chrono::Local;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::io::storage::Storage;
use crate::model::{Filter, Task};
use crate::tui::app::App;
use crate::util::unicode::{display_width, truncate_to_width};
use crate::view::Snapshot;

/// Render the filtered task list with cursor highlight and scrolling.
pub fn render_list<S: Storage>(
    frame: &mut Frame,
    app: &mut App<S>,
    snapshot: &Snapshot,
    area: Rect,
) {
    let visible_height = area.height as usize;

    // Clamp cursor and adjust scroll to keep it visible
    let cursor = app.cursor.min(snapshot.rows.len().saturating_sub(1));
    app.cursor = cursor;
    if cursor < app.scroll_offset {
        app.scroll_offset = cursor;
    } else if visible_height > 0 && cursor >= app.scroll_offset + visible_height {
        app.scroll_offset = cursor.saturating_sub(visible_height - 1);
    }

    if snapshot.rows.is_empty() {
        let msg = match snapshot.filter {
            Filter::All => " No tasks yet. Press a to add one.",
            Filter::Pending => " No pending tasks.",
            Filter::Completed => " No completed tasks.",
        };
        let empty =
            Paragraph::new(msg).style(Style::default().fg(app.theme.dim).bg(app.theme.background));
        frame.render_widget(empty, area);
        return;
    }

    let scroll = app.scroll_offset;
    let end = snapshot.rows.len().min(scroll + visible_height);
    let mut lines: Vec<Line> = Vec::with_capacity(visible_height);
    for (task, row) in snapshot.rows[scroll..end].iter().zip(scroll..end) {
        lines.push(render_task_row(app, task, row == cursor, area.width as usize));
    }

    let paragraph = Paragraph::new(lines).style(Style::default().bg(app.theme.background));
    frame.render_widget(paragraph, area);
}

fn render_task_row<S: Storage>(
    app: &App<S>,
    task: &Task,
    is_cursor: bool,
    width: usize,
) -> Line<'static> {
    let bg = app.theme.background;
    let row_bg = if is_cursor { app.theme.selection_bg } else { bg };
    let mut spans: Vec<Span> = Vec::new();

    // Column 0: left border accent on the cursor row, space otherwise
    if is_cursor {
        spans.push(Span::styled(
            "\u{258E}",
            Style::default().fg(app.theme.accent).bg(row_bg),
        ));
    } else {
        spans.push(Span::styled(" ", Style::default().bg(bg)));
    }

    // Checkbox
    let (mark, mark_color) = if task.completed {
        ("[x]", app.theme.success)
    } else {
        ("[ ]", app.theme.dim)
    };
    let mark_style = if is_cursor {
        Style::default()
            .fg(mark_color)
            .bg(row_bg)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(mark_color).bg(row_bg)
    };
    spans.push(Span::styled(mark, mark_style));
    spans.push(Span::styled(" ", Style::default().bg(row_bg)));

    // Creation time goes on the right edge
    let stamp = task
        .created_at
        .with_timezone(&Local)
        .format("%b %e %H:%M")
        .to_string();
    let stamp_width = stamp.chars().count();

    // Text, truncated to the room between checkbox and timestamp
    let prefix_width = 5; // border + checkbox + space
    let available = width.saturating_sub(prefix_width + stamp_width + 2);
    let display_text = truncate_to_width(&task.text, available);

    let text_style = if task.completed {
        Style::default()
            .fg(app.theme.dim)
            .bg(row_bg)
            .add_modifier(Modifier::CROSSED_OUT)
    } else if is_cursor {
        Style::default()
            .fg(app.theme.text_bright)
            .bg(row_bg)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(app.theme.text).bg(row_bg)
    };
    let text_width = display_width(&display_text);
    spans.push(Span::styled(display_text, text_style));

    // Pad so the timestamp lands on the right edge
    let pad = width.saturating_sub(prefix_width + text_width + stamp_width + 1);
    spans.push(Span::styled(" ".repeat(pad), Style::default().bg(row_bg)));
    spans.push(Span::styled(
        stamp,
        Style::default().fg(app.theme.dim).bg(row_bg),
    ));
    spans.push(Span::styled(" ", Style::default().bg(row_bg)));

    Line::from(spans)
}
