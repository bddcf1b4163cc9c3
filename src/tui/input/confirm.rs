use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::{App, ConfirmAction, Mode};

pub(super) fn handle_confirm(app: &mut App, key: KeyEvent) {
    match (key.modifiers, key.code) {
        // Confirm: y
        (KeyModifiers::NONE, KeyCode::Char('y')) => {
            let state = app.confirm_state.take();
            app.mode = Mode::Navigate;
            if let Some(state) = state {
                match state.action {
                    ConfirmAction::DeleteEntry(date) => app.delete_entry(date),
                    ConfirmAction::DeleteScratchpad(name) => app.delete_scratchpad(&name),
                }
            }
        }
        // Cancel: n or Esc
        (KeyModifiers::NONE, KeyCode::Char('n')) | (_, KeyCode::Esc) => {
            app.confirm_state = None;
            app.mode = Mode::Navigate;
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::date::MonthDay;
    use crate::tui::render::test_helpers::*;

    fn press(app: &mut App, c: char) {
        handle_confirm(app, KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE));
    }

    #[test]
    fn yes_deletes() {
        let mut app = app_with_entries(&[(today(), "title\n# work")]);
        app.request_delete();
        press(&mut app, 'y');
        assert_eq!(app.mode, Mode::Navigate);
        assert!(!app.journal.index().has_document(MonthDay::of(today())));
        assert!(!app.journal.index().contains_section(&crate::model::keys::SectionKey::named("work")));
    }

    #[test]
    fn yes_deletes_scratchpad() {
        let tmp = tempfile::TempDir::new().unwrap();
        let mut app = app_with_scratchpads(tmp.path());
        app.scratchpads.write("old", "x").unwrap();
        app.toggle_screen();
        app.select_scratchpad_row(1);
        app.request_scratchpad_delete();
        press(&mut app, 'y');
        assert_eq!(app.mode, Mode::Navigate);
        assert_eq!(app.scratchpads.read("old").unwrap(), None);
        assert!(app.scratchpad_list.is_empty());
    }

    #[test]
    fn no_keeps_entry() {
        let mut app = app_with_entries(&[(today(), "title\n# work")]);
        app.request_delete();
        press(&mut app, 'n');
        assert_eq!(app.mode, Mode::Navigate);
        assert!(app.confirm_state.is_none());
        assert!(app.cursor_has_entry());

        app.request_delete();
        press(&mut app, 'x');
        assert_eq!(app.mode, Mode::Confirm);
        handle_confirm(&mut app, KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE));
        assert_eq!(app.mode, Mode::Navigate);
    }
}
