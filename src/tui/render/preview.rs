use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Paragraph, Wrap};

use crate::tui::app::{App, Focus};
use crate::util::unicode::expand_tabs;

use super::pane;

/// Render the entry under the calendar cursor
pub fn render_preview(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let entry = app.cursor_entry();

    let mut title = format!(" {} ", app.cursor.format("%d. %m. %Y."));
    if entry.is_none() {
        title.push_str("(no entry) ");
    }

    let lines: Vec<Line> = entry
        .as_deref()
        .unwrap_or_default()
        .lines()
        .map(|line| {
            let text = expand_tabs(line);
            if line.trim_start().starts_with('#') {
                Line::styled(
                    text,
                    Style::default()
                        .fg(theme.text_bright)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                Line::styled(text, Style::default().fg(theme.text))
            }
        })
        .collect();

    let paragraph = Paragraph::new(lines)
        .block(pane(title, app.focus == Focus::Preview, theme))
        .wrap(Wrap { trim: false })
        .scroll((app.preview_scroll, 0));
    frame.render_widget(paragraph, area);
}
