use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::io::storage::Storage;
use crate::store::MAX_TEXT_LEN;
use crate::tui::app::{App, Mode};
use crate::util::unicode::next_grapheme_boundary;
use crate::view::Snapshot;

/// Render the status row (bottom of screen): counts in Navigate, the
/// input prompt in Insert/Edit, a y/n reminder in Confirm.
pub fn render_status_row<S: Storage>(
    frame: &mut Frame,
    app: &App<S>,
    snapshot: &Snapshot,
    area: Rect,
) {
    let bg = app.theme.background;
    let width = area.width as usize;
    let dim = Style::default().fg(app.theme.dim).bg(bg);

    let line = match app.mode {
        Mode::Navigate => {
            let counts = snapshot.counts;
            let summary = format!(
                " {} total \u{2502} {} pending \u{2502} {} completed",
                counts.total, counts.pending, counts.completed
            );
            let mut spans = vec![Span::styled(summary, dim)];
            if !app.show_key_hints {
                push_right_hint(&mut spans, "? keys", width, dim, bg);
            }
            Line::from(spans)
        }
        Mode::Insert => editor_line(app, "> ", "Enter add  Esc cancel", width),
        Mode::Edit => editor_line(app, "edit: ", "Enter save  Esc cancel", width),
        Mode::Confirm => Line::from(Span::styled(
            " y confirm \u{2502} n cancel".to_string(),
            dim,
        )),
    };

    let paragraph = Paragraph::new(line).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

/// Input prompt with a block cursor and a length counter.
fn editor_line<'a, S: Storage>(
    app: &App<S>,
    prompt: &'a str,
    hint: &'a str,
    width: usize,
) -> Line<'a> {
    let bg = app.theme.background;
    let text_style = Style::default().fg(app.theme.text_bright).bg(bg);
    let cursor_style = Style::default()
        .fg(app.theme.background)
        .bg(app.theme.text_bright);

    let buf = &app.input.text;
    let cursor_pos = app.input.cursor.min(buf.len());

    let mut spans = vec![Span::styled(prompt, Style::default().fg(app.theme.accent).bg(bg))];
    let before = &buf[..cursor_pos];
    if !before.is_empty() {
        spans.push(Span::styled(before.to_string(), text_style));
    }
    if let Some(next) = next_grapheme_boundary(buf, cursor_pos) {
        spans.push(Span::styled(buf[cursor_pos..next].to_string(), cursor_style));
        if next < buf.len() {
            spans.push(Span::styled(buf[next..].to_string(), text_style));
        }
    } else {
        spans.push(Span::styled(" ".to_string(), cursor_style));
    }

    // Length counter ahead of the key hint, red once over the limit
    let count = app.input.char_count();
    let counter = format!("{}/{}", count, MAX_TEXT_LEN);
    let counter_style = if count > MAX_TEXT_LEN {
        Style::default().fg(app.theme.error).bg(bg)
    } else {
        Style::default().fg(app.theme.dim).bg(bg)
    };
    let tail = format!("{}  {}", counter, hint);
    let content_width: usize = spans.iter().map(|s| s.content.chars().count()).sum();
    let tail_width = tail.chars().count() + 1;
    if content_width + tail_width < width {
        let padding = width - content_width - tail_width;
        spans.push(Span::styled(
            " ".repeat(padding),
            Style::default().bg(bg),
        ));
        spans.push(Span::styled(counter, counter_style));
        spans.push(Span::styled(
            format!("  {} ", hint),
            Style::default().fg(app.theme.dim).bg(bg),
        ));
    }

    Line::from(spans)
}

/// Render the key hint footer for the current mode.
pub fn render_key_hints<S: Storage>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let hints = match app.mode {
        Mode::Navigate => {
            " a add  e edit  d delete  Space toggle  c clear done  1/2/3 filter  ? hide  q quit"
        }
        Mode::Insert | Mode::Edit => " Enter submit  Esc cancel  Ctrl+W delete word  Home/End jump",
        Mode::Confirm => " y confirm  n cancel",
    };
    let paragraph = Paragraph::new(hints)
        .style(Style::default().fg(app.theme.dim).bg(app.theme.background));
    frame.render_widget(paragraph, area);
}

fn push_right_hint<'a>(
    spans: &mut Vec<Span<'a>>,
    hint: &'a str,
    width: usize,
    dim: Style,
    bg: ratatui::style::Color,
) {
    let content_width: usize = spans.iter().map(|s| s.content.chars().count()).sum();
    let hint_width = hint.chars().count() + 1;
    if content_width + hint_width < width {
        let padding = width - content_width - hint_width;
        spans.push(Span::styled(
            " ".repeat(padding),
            Style::default().bg(bg),
        ));
        spans.push(Span::styled(format!("{} ", hint), dim));
    }
}
