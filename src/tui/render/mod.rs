pub mod calendar;
pub mod events_list;
pub mod menus;
pub mod preview;
pub mod scratchpads;
pub mod status_row;
pub mod title_bar;

#[cfg(test)]
pub mod test_helpers;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::Style;
use ratatui::widgets::{Block, BorderType, Borders};

use super::app::{App, Screen};
use super::theme::Theme;

/// Width of the sections/tags/events column
const SIDEBAR_W: u16 = 34;

/// Draw the whole screen
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Background fill
    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    if app.screen == Screen::Scratchpads {
        // Layout: title bar | scratchpads | status row
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(3),
                Constraint::Length(1),
            ])
            .split(area);
        title_bar::render_title_bar(frame, app, chunks[0]);
        scratchpads::render_scratchpads(frame, app, chunks[1]);
        status_row::render_status_row(frame, app, chunks[2]);
        return;
    }

    // Layout: title bar | body | preview | status row
    let preview_h = (area.height / 4).clamp(3, 12);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(preview_h),
            Constraint::Length(1),
        ])
        .split(area);

    title_bar::render_title_bar(frame, app, chunks[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(SIDEBAR_W), Constraint::Min(0)])
        .split(chunks[1]);

    let sidebar = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Ratio(2, 5),
            Constraint::Ratio(2, 5),
            Constraint::Ratio(1, 5),
        ])
        .split(body[0]);

    menus::render_sections_menu(frame, app, sidebar[0]);
    menus::render_tags_menu(frame, app, sidebar[1]);
    events_list::render_events_list(frame, app, sidebar[2]);
    calendar::render_calendar(frame, app, body[1]);
    preview::render_preview(frame, app, chunks[2]);
    status_row::render_status_row(frame, app, chunks[3]);
}

/// Bordered pane, highlighted when it has focus
pub(super) fn pane<'a>(title: String, focused: bool, theme: &Theme) -> Block<'a> {
    let border = if focused {
        theme.border_focused
    } else {
        theme.border
    };
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border).bg(theme.background))
        .title(title)
        .title_style(Style::default().fg(theme.text_bright).bg(theme.background))
        .style(Style::default().bg(theme.background))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::render::test_helpers::*;

    #[test]
    fn full_screen_layout() {
        let app = app_with_entries(&[(today(), "title\n# work\n* meeting\nnotes here")]);
        let output = render_to_string(TERM_W, TERM_H, |frame, _| render(frame, &app));
        assert!(output.contains("Today is: 05. 03. 2024."));
        assert!(output.contains("Sections"));
        assert!(output.contains("Tags"));
        assert!(output.contains("March"));
        assert!(output.contains("notes here"));
    }

    #[test]
    fn scratchpad_screen_replaces_calendar() {
        let mut app = app_with_entries(&[]);
        app.toggle_screen();
        let output = render_to_string(TERM_W, TERM_H, |frame, _| render(frame, &app));
        assert!(output.contains("Today is: 05. 03. 2024."));
        assert!(output.contains("Scratchpads (0)"));
        assert!(!output.contains("March"));
    }

    #[test]
    fn tiny_terminals_do_not_panic() {
        let mut app = app_with_entries(&[(today(), "title\n# work")]);
        for (w, h) in [(1, 1), (10, 4), (30, 8), (60, 12), (200, 60)] {
            render_to_string(w, h, |frame, _| render(frame, &app));
        }
        app.toggle_screen();
        for (w, h) in [(1, 1), (10, 4), (60, 12)] {
            render_to_string(w, h, |frame, _| render(frame, &app));
        }
    }
}
