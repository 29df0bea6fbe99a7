use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::io::storage::Storage;
use crate::tui::app::App;
use crate::util::unicode::display_width;
use crate::view::{PendingConfirm, Snapshot};

/// Render the y/n popup for a staged delete or clear-completed.
pub fn render_confirm_popup<S: Storage>(
    frame: &mut Frame,
    app: &App<S>,
    snapshot: &Snapshot,
    area: Rect,
) {
    let confirm = match &snapshot.confirm {
        Some(c) => c,
        None => return,
    };

    let popup_w: u16 = 48.min(area.width.saturating_sub(2));
    let inner_w = popup_w.saturating_sub(2) as usize;

    let bg = app.theme.background;
    let header_style = Style::default()
        .fg(app.theme.error)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let text_style = Style::default().fg(app.theme.text).bg(bg);
    let bright_style = Style::default().fg(app.theme.text_bright).bg(bg);
    let dim_style = Style::default().fg(app.theme.dim).bg(bg);

    let mut styled_lines: Vec<(String, Style)> = Vec::new();
    match confirm {
        PendingConfirm::Delete { preview, .. } => {
            styled_lines.push((" Delete this task?".into(), header_style));
            styled_lines.push(("".into(), text_style));
            let quoted = format!("\u{201c}{}\u{201d}", preview);
            for s in wrap_text("   ", &quoted, inner_w) {
                styled_lines.push((s, bright_style));
            }
        }
        PendingConfirm::ClearCompleted { count } => {
            let noun = if *count == 1 { "task" } else { "tasks" };
            styled_lines.push((
                format!(" Clear {} completed {}?", count, noun),
                header_style,
            ));
        }
    }
    styled_lines.push(("".into(), text_style));
    styled_lines.push((" y confirm   n cancel".into(), dim_style));

    // Dynamic height from content + 2 for borders
    let popup_h = ((styled_lines.len() as u16) + 2).min(area.height.saturating_sub(2));

    let overlay_area = centered_rect_fixed(popup_w, popup_h, area);
    frame.render_widget(Clear, overlay_area);

    let lines: Vec<Line> = styled_lines
        .into_iter()
        .map(|(text, style)| Line::from(Span::styled(text, style)))
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.error).bg(bg))
        .style(Style::default().bg(bg));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .style(Style::default().bg(bg));

    frame.render_widget(paragraph, overlay_area);
}

/// Word-wrap `text` into lines of at most `max_width` display columns.
/// Every line (including the first) is prefixed with `indent`.
fn wrap_text(indent: &str, text: &str, max_width: usize) -> Vec<String> {
    let indent_cols = display_width(indent);
    let mut lines = Vec::new();
    let mut current = indent.to_string();

    for word in text.split_whitespace() {
        let current_cols = display_width(&current);
        if current_cols > indent_cols && current_cols + 1 + display_width(word) > max_width {
            lines.push(std::mem::replace(&mut current, indent.to_string()));
        }
        if display_width(&current) > indent_cols {
            current.push(' ');
        }
        current.push_str(word);
    }
    if display_width(&current) > indent_cols || lines.is_empty() {
        lines.push(current);
    }
    lines
}

fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::app::Mode;
    use crate::tui::render::test_helpers::*;

    #[test]
    fn delete_popup_shows_preview() {
        let mut app = sample_app(&["water the plants"]);
        let id = app.selected_id().unwrap();
        app.view.request_delete(id);
        app.mode = Mode::Confirm;
        let snapshot = app.view.snapshot();

        let output = render_to_string(TERM_W, TERM_H, |frame, area| {
            render_confirm_popup(frame, &app, &snapshot, area);
        });
        assert!(output.contains("Delete this task?"));
        assert!(output.contains("water the plants"));
        assert!(output.contains("y confirm"));
        assert!(output.contains("n cancel"));
    }

    #[test]
    fn clear_popup_pluralizes() {
        let mut app = sample_app(&["a", "b"]);
        for task in app.view.snapshot().rows {
            app.view.toggle_task(task.id);
        }
        app.view.request_clear_completed();
        app.mode = Mode::Confirm;
        let snapshot = app.view.snapshot();

        let output = render_to_string(TERM_W, TERM_H, |frame, area| {
            render_confirm_popup(frame, &app, &snapshot, area);
        });
        assert!(output.contains("Clear 2 completed tasks?"));
    }

    #[test]
    fn clear_popup_singular() {
        let mut app = sample_app(&["a"]);
        app.view.toggle_task(app.view.snapshot().rows[0].id);
        app.view.request_clear_completed();
        app.mode = Mode::Confirm;
        let snapshot = app.view.snapshot();

        let output = render_to_string(TERM_W, TERM_H, |frame, area| {
            render_confirm_popup(frame, &app, &snapshot, area);
        });
        assert!(output.contains("Clear 1 completed task?"));
    }

    #[test]
    fn no_popup_without_staged_confirm() {
        let app = sample_app(&["a"]);
        let snapshot = app.view.snapshot();

        let output = render_to_string(TERM_W, TERM_H, |frame, area| {
            render_confirm_popup(frame, &app, &snapshot, area);
        });
        assert_eq!(output, "");
    }

    // wrap_text splits on display columns, keeping the indent

    #[test]
    fn wrap_text_splits_long_lines() {
        let lines = wrap_text(" ", "one two three four five", 10);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(display_width(line) <= 10);
            assert!(line.starts_with(' '));
        }
    }

    #[test]
    fn wrap_text_short_input_single_line() {
        let lines = wrap_text(" ", "short", 40);
        assert_eq!(lines, vec![" short".to_string()]);
    }
}
