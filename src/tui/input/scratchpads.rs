use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::App;

use super::navigate::menu_target;

pub(super) fn handle_scratchpads(app: &mut App, key: KeyEvent) {
    match (key.modifiers, key.code) {
        (KeyModifiers::CONTROL, KeyCode::Char('c')) => app.should_quit = true,
        (_, KeyCode::Char('q')) => app.should_quit = true,
        (_, KeyCode::Char('s')) | (_, KeyCode::Esc) => app.toggle_screen(),
        (_, KeyCode::Enter) => app.open_scratchpad(),
        (_, KeyCode::Char('d')) => app.request_scratchpad_delete(),
        (_, KeyCode::Char('r')) => app.request_scratchpad_rename(),
        _ => {
            // row 0 is the create row
            let len = app.scratchpad_list.len() + 1;
            if let Some(row) = menu_target(key, app.scratchpad_row, len) {
                app.select_scratchpad_row(row);
            }
        }
    }
}
