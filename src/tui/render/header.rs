use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::io::storage::Storage;
use crate::model::Filter;
use crate::tui::app::App;
use crate::view::Snapshot;

/// Render the header: title + filter tabs, with separator line below
pub fn render_header<S: Storage>(
    frame: &mut Frame,
    app: &App<S>,
    snapshot: &Snapshot,
    area: Rect,
) {
    // Split into tab row and separator row
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // title + tabs
            Constraint::Length(1), // separator
        ])
        .split(area);

    let sep_cols = render_tabs(frame, app, snapshot, chunks[0]);
    render_separator(frame, app, chunks[1], &sep_cols);
}

/// Render the tab row and return the column positions of each separator character.
fn render_tabs<S: Storage>(
    frame: &mut Frame,
    app: &App<S>,
    snapshot: &Snapshot,
    area: Rect,
) -> Vec<usize> {
    let mut spans: Vec<Span> = Vec::new();
    let mut sep_cols: Vec<usize> = Vec::new();
    let sep = Span::styled(
        "\u{2502}",
        Style::default().fg(app.theme.dim).bg(app.theme.background),
    );

    // Leading title
    let bg_style = Style::default().bg(app.theme.background);
    spans.push(Span::styled(" ", bg_style));
    spans.push(Span::styled(
        "\u{2713}",
        Style::default()
            .fg(app.theme.success)
            .bg(app.theme.background),
    ));
    spans.push(Span::styled(
        " tick ",
        Style::default()
            .fg(app.theme.accent)
            .bg(app.theme.background)
            .add_modifier(Modifier::BOLD),
    ));
    sep_cols.push(spans.iter().map(|s| s.content.chars().count()).sum());
    spans.push(sep.clone());

    // One tab per filter, with its task count
    for filter in Filter::ALL {
        let is_current = snapshot.filter == filter;
        let tab_bg = if is_current {
            app.theme.selection_bg
        } else {
            app.theme.background
        };
        let style = tab_style(app, is_current);
        let count = snapshot.counts.for_filter(filter);

        spans.push(Span::styled(format!(" {} ", filter.label()), style));
        spans.push(Span::styled(
            format!("{} ", count),
            Style::default()
                .fg(if is_current {
                    app.theme.accent
                } else {
                    app.theme.dim
                })
                .bg(tab_bg),
        ));
        sep_cols.push(spans.iter().map(|s| s.content.chars().count()).sum());
        spans.push(sep.clone());
    }

    let line = Line::from(spans);
    let tabs = Paragraph::new(line).style(Style::default().bg(app.theme.background));
    frame.render_widget(tabs, area);
    sep_cols
}

fn render_separator<S: Storage>(frame: &mut Frame, app: &App<S>, area: Rect, sep_cols: &[usize]) {
    let width = area.width as usize;
    let mut line: String = String::with_capacity(width * 3);
    for col in 0..width {
        if sep_cols.contains(&col) {
            line.push('\u{2534}');
        } else {
            line.push('\u{2500}');
        }
    }
    let sep_widget = Paragraph::new(line).style(
        Style::default()
            .fg(app.theme.dim)
            .bg(app.theme.background),
    );
    frame.render_widget(sep_widget, area);
}

/// Style for a tab: highlighted if current, normal otherwise
fn tab_style<S: Storage>(app: &App<S>, is_current: bool) -> Style {
    if is_current {
        Style::default()
            .fg(app.theme.text_bright)
            .bg(app.theme.selection_bg)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(app.theme.text).bg(app.theme.background)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::render::test_helpers::*;

    #[test]
    fn header_shows_title_and_tabs() {
        let mut app = sample_app(&["a", "b"]);
        app.view.toggle_task(app.view.snapshot().rows[0].id);
        let snapshot = app.view.snapshot();

        let output = render_to_string(TERM_W, 2, |frame, area| {
            render_header(frame, &app, &snapshot, area);
        });

        assert!(output.contains("tick"));
        assert!(output.contains("All 2"));
        assert!(output.contains("Pending 1"));
        assert!(output.contains("Completed 1"));
    }

    #[test]
    fn separator_marks_tab_edges() {
        let app = sample_app(&["a"]);
        let snapshot = app.view.snapshot();

        let output = render_to_string(TERM_W, 2, |frame, area| {
            render_header(frame, &app, &snapshot, area);
        });

        let rows: Vec<&str> = output.lines().collect();
        assert_eq!(rows.len(), 2);
        assert!(rows[0].contains('\u{2502}'));
        assert!(rows[1].contains('\u{2534}'));
        assert!(rows[1].contains('\u{2500}'));
    }
}
