use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::{App, EditTarget, Focus};

pub(super) fn handle_navigate(app: &mut App, key: KeyEvent) {
    match (key.modifiers, key.code) {
        (_, KeyCode::Char('q')) | (_, KeyCode::Esc) => app.should_quit = true,
        (KeyModifiers::CONTROL, KeyCode::Char('c')) => app.should_quit = true,
        (_, KeyCode::Tab) => app.focus = app.focus.next(),
        (_, KeyCode::BackTab) => app.focus = app.focus.prev(),
        (_, KeyCode::Char('+')) | (_, KeyCode::Char('=')) => app.change_year(1),
        (_, KeyCode::Char('-')) => app.change_year(-1),
        (_, KeyCode::Char('t')) => app.jump_to_today(),
        (_, KeyCode::Char('r')) => app.refresh(),
        (_, KeyCode::Char('d')) => app.request_delete(),
        (_, KeyCode::Char('s')) => app.toggle_screen(),
        (_, KeyCode::Enter) => match app.focus {
            Focus::Calendar => app.pending_edit = Some(EditTarget::Entry(app.cursor)),
            _ => app.focus = Focus::Calendar,
        },
        _ => match app.focus {
            Focus::Sections => handle_section_menu(app, key),
            Focus::Tags => handle_tag_menu(app, key),
            Focus::Calendar => handle_calendar(app, key),
            Focus::Preview => handle_preview(app, key),
        },
    }
}

/// Row movement shared by both menus: new row for `key`, if it moves
pub(super) fn menu_target(key: KeyEvent, row: usize, len: usize) -> Option<usize> {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => row.checked_sub(1),
        KeyCode::Down | KeyCode::Char('j') => (row + 1 < len).then_some(row + 1),
        KeyCode::Home | KeyCode::Char('g') => Some(0),
        KeyCode::End | KeyCode::Char('G') => len.checked_sub(1),
        _ => None,
    }
}

fn handle_section_menu(app: &mut App, key: KeyEvent) {
    let len = app.journal.selection().section_menu().len();
    if let Some(row) = menu_target(key, app.section_row(), len) {
        app.select_section_row(row);
    }
}

fn handle_tag_menu(app: &mut App, key: KeyEvent) {
    let len = app.journal.selection().tag_menu().len();
    if let Some(row) = menu_target(key, app.tag_row(), len) {
        app.select_tag_row(row);
    }
}

fn handle_calendar(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Left | KeyCode::Char('h') => app.move_cursor(-1),
        KeyCode::Right | KeyCode::Char('l') => app.move_cursor(1),
        KeyCode::Up | KeyCode::Char('k') => app.move_cursor(-7),
        KeyCode::Down | KeyCode::Char('j') => app.move_cursor(7),
        KeyCode::PageUp | KeyCode::Char('[') => app.move_cursor_months(-1),
        KeyCode::PageDown | KeyCode::Char(']') => app.move_cursor_months(1),
        _ => {}
    }
}

fn handle_preview(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => {
            app.preview_scroll = app.preview_scroll.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.preview_scroll = app.preview_scroll.saturating_add(1);
        }
        KeyCode::Home | KeyCode::Char('g') => app.preview_scroll = 0,
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::keys::SectionKey;
    use crate::tui::render::test_helpers::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn tab_cycles_focus() {
        let mut app = app_with_entries(&[]);
        assert_eq!(app.focus, Focus::Calendar);
        handle_navigate(&mut app, key(KeyCode::Tab));
        assert_eq!(app.focus, Focus::Preview);
        handle_navigate(&mut app, key(KeyCode::Tab));
        assert_eq!(app.focus, Focus::Sections);
        handle_navigate(&mut app, KeyEvent::new(KeyCode::BackTab, KeyModifiers::SHIFT));
        assert_eq!(app.focus, Focus::Preview);
    }

    #[test]
    fn section_menu_moves_selection() {
        let mut app = app_with_entries(&[
            (date(1, 1), "title\n# work\n* meeting"),
            (date(1, 2), "title\n# gym\n* legs"),
        ]);
        app.focus = Focus::Sections;
        handle_navigate(&mut app, key(KeyCode::Down));
        assert_eq!(
            app.journal.selection().selected_section(),
            Some(&SectionKey::named("gym"))
        );
        handle_navigate(&mut app, key(KeyCode::Char('j')));
        handle_navigate(&mut app, key(KeyCode::Char('j')));
        assert_eq!(
            app.journal.selection().selected_section(),
            Some(&SectionKey::named("work"))
        );
        handle_navigate(&mut app, key(KeyCode::Char('g')));
        assert_eq!(app.journal.selection().selected_section(), None);
    }

    #[test]
    fn calendar_keys() {
        let mut app = app_with_entries(&[]);
        handle_navigate(&mut app, key(KeyCode::Char('l')));
        assert_eq!(app.cursor, date(3, 6));
        handle_navigate(&mut app, key(KeyCode::Up));
        assert_eq!(app.cursor, date(2, 28));
        handle_navigate(&mut app, key(KeyCode::Enter));
        assert_eq!(app.pending_edit, Some(EditTarget::Entry(date(2, 28))));
    }

    #[test]
    fn year_keys() {
        let mut app = app_with_entries(&[]);
        handle_navigate(&mut app, key(KeyCode::Char('+')));
        assert_eq!(app.year(), 2025);
        handle_navigate(&mut app, key(KeyCode::Char('-')));
        handle_navigate(&mut app, key(KeyCode::Char('-')));
        assert_eq!(app.year(), 2023);
        handle_navigate(&mut app, key(KeyCode::Char('t')));
        assert_eq!(app.cursor, today());
    }

    #[test]
    fn s_opens_scratchpads() {
        let mut app = app_with_entries(&[]);
        handle_navigate(&mut app, key(KeyCode::Char('s')));
        assert_eq!(app.screen, crate::tui::app::Screen::Scratchpads);
    }

    #[test]
    fn quit() {
        let mut app = app_with_entries(&[]);
        handle_navigate(&mut app, key(KeyCode::Char('q')));
        assert!(app.should_quit);
    }
}
