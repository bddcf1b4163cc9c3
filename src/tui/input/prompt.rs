use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::App;

pub(super) fn handle_prompt(app: &mut App, key: KeyEvent) {
    match (key.modifiers, key.code) {
        (KeyModifiers::CONTROL, KeyCode::Char('c')) | (_, KeyCode::Esc) => app.cancel_prompt(),
        (_, KeyCode::Enter) => app.submit_prompt(),
        (_, KeyCode::Backspace) => {
            if let Some(prompt) = app.prompt_state.as_mut() {
                prompt.input.pop();
            }
        }
        (KeyModifiers::NONE | KeyModifiers::SHIFT, KeyCode::Char(c)) => {
            if let Some(prompt) = app.prompt_state.as_mut() {
                prompt.input.push(c);
            }
        }
        _ => {}
    }
}
