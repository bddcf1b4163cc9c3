use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{List, ListItem, ListState};

use crate::tui::app::{App, Focus};
use crate::util::unicode::expand_tabs;

use super::pane;

pub fn render_sections_menu(frame: &mut Frame, app: &App, area: Rect) {
    let menu = app.journal.selection().section_menu();
    render_menu(
        frame,
        app,
        area,
        format!(" Sections ({}) ", menu.len() - 1),
        menu.texts(),
        app.section_row(),
        app.focus == Focus::Sections,
    );
}

pub fn render_tags_menu(frame: &mut Frame, app: &App, area: Rect) {
    let selection = app.journal.selection();
    let menu = selection.tag_menu();
    let title = match selection.selected_section() {
        Some(section) => format!(" Tags in {} ({}) ", section, menu.len() - 1),
        None => format!(" Tags ({}) ", menu.len() - 1),
    };
    render_menu(
        frame,
        app,
        area,
        title,
        menu.texts(),
        app.tag_row(),
        app.focus == Focus::Tags,
    );
}

pub(super) fn render_menu(
    frame: &mut Frame,
    app: &App,
    area: Rect,
    title: String,
    texts: &[String],
    row: usize,
    focused: bool,
) {
    let theme = &app.theme;
    let items: Vec<ListItem> = texts
        .iter()
        .map(|text| ListItem::new(expand_tabs(text)))
        .collect();

    let mut selected = Style::default().bg(theme.selection_bg).fg(theme.text_bright);
    if focused {
        selected = selected.add_modifier(Modifier::BOLD);
    }
    let list = List::new(items)
        .block(pane(title, focused, theme))
        .style(Style::default().fg(theme.text).bg(theme.background))
        .highlight_style(selected);

    let mut state = ListState::default().with_selected(Some(row));
    frame.render_stateful_widget(list, area, &mut state);
}
