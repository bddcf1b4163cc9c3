use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::App;

/// Render the title bar (top of screen): today, today's event, entry count
pub fn render_title_bar(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let mut spans = vec![
        Span::styled(" Today is: ", Style::default().fg(app.theme.text).bg(bg)),
        Span::styled(
            app.today.format("%d. %m. %Y.").to_string(),
            Style::default()
                .fg(app.theme.today)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ),
    ];
    if let Some(event) = &app.nearby_events.today {
        spans.push(Span::styled(
            format!(" {}", event),
            Style::default().fg(app.theme.event).bg(bg),
        ));
    }
    spans.push(Span::styled(
        format!(
            " | There are {} log entries for year {}.",
            app.journal.index().entry_count(),
            app.year()
        ),
        Style::default().fg(app.theme.text).bg(bg),
    ));

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}
