use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::widgets::{Paragraph, Wrap};

use crate::tui::app::App;
use crate::util::unicode::expand_tabs;

use super::menus::render_menu;
use super::pane;

/// Width of the scratchpad list
const LIST_W: u16 = 40;

/// Label of the first list row
pub const CREATE_ROW: &str = "+ new scratchpad";

/// Scratchpad list on the left, contents of the selected one on the right
pub fn render_scratchpads(frame: &mut Frame, app: &App, area: Rect) {
    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(LIST_W), Constraint::Min(0)])
        .split(area);

    let texts: Vec<String> = std::iter::once(CREATE_ROW.to_string())
        .chain(app.scratchpad_list.iter().map(|pad| pad.name.clone()))
        .collect();
    let title = format!(" Scratchpads ({}) ", app.scratchpad_list.len());
    render_menu(frame, app, body[0], title, &texts, app.scratchpad_row, true);

    render_scratchpad_preview(frame, app, body[1]);
}

fn render_scratchpad_preview(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let Some(pad) = app.selected_scratchpad() else {
        let hint = Paragraph::new(Line::styled(
            " Press enter to name a new scratchpad",
            Style::default().fg(theme.dim),
        ))
        .block(pane(" New ".to_string(), false, theme));
        frame.render_widget(hint, area);
        return;
    };

    let mut title = format!(" {} ", pad.name);
    if let Some(modified) = pad.modified {
        title.push_str(&format!("({}) ", modified.format("%d. %m. %Y.")));
    }
    let lines: Vec<Line> = pad
        .text
        .lines()
        .map(|line| Line::styled(expand_tabs(line), Style::default().fg(theme.text)))
        .collect();
    let paragraph = Paragraph::new(lines)
        .block(pane(title, false, theme))
        .wrap(Wrap { trim: false })
        .scroll((app.preview_scroll, 0));
    frame.render_widget(paragraph, area);
}
