use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::Paragraph;

use crate::tui::app::App;
use crate::util::unicode::truncate_to_width;

use super::pane;

/// Render the recent & upcoming events list (bottom of the sidebar)
pub fn render_events_list(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let nearby = &app.nearby_events;
    let inner_w = area.width.saturating_sub(2) as usize;

    let mut lines = Vec::new();
    for (group, events) in &nearby.groups {
        lines.push(Line::styled(
            truncate_to_width(group, inner_w),
            Style::default()
                .fg(theme.text_bright)
                .add_modifier(Modifier::BOLD),
        ));
        for event in events {
            let style = if event.days_away == 0 {
                Style::default().fg(theme.today)
            } else {
                Style::default().fg(theme.event)
            };
            lines.push(Line::styled(
                truncate_to_width(&event.list_text(), inner_w),
                style,
            ));
        }
    }

    let title = format!(" Recent & upcoming events ({}) ", nearby.event_count());
    let paragraph = Paragraph::new(lines)
        .block(pane(title, false, theme))
        .style(Style::default().fg(theme.text).bg(theme.background));
    frame.render_widget(paragraph, area);
}
