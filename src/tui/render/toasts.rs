use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::{Clear, Paragraph};

use crate::io::storage::Storage;
use crate::tui::app::App;
use crate::util::unicode::display_width;

/// Render notification toasts stacked bottom-right, newest at the bottom,
/// one row above the status line.
pub fn render_toasts<S: Storage>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let toasts: Vec<_> = app.view.notifications().visible().collect();
    if toasts.is_empty() || area.height < 3 {
        return;
    }

    let bottom = area.y + area.height - 2;
    let count = toasts.len() as u16;

    for (i, toast) in toasts.iter().enumerate() {
        let y = bottom.saturating_sub(count - 1 - i as u16);
        if y <= area.y {
            continue;
        }

        let w = ((display_width(&toast.message) + 2) as u16).min(area.width.saturating_sub(2));
        let x = area.x + area.width.saturating_sub(w + 1);
        let rect = Rect::new(x, y, w, 1);

        frame.render_widget(Clear, rect);
        let style = Style::default()
            .fg(app.theme.severity_color(toast.severity))
            .bg(app.theme.selection_bg);
        let widget = Paragraph::new(format!(" {} ", toast.message)).style(style);
        frame.render_widget(widget, rect);
    }
}
