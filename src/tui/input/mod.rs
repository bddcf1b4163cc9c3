mod confirm;
mod navigate;
mod prompt;
mod scratchpads;

use crossterm::event::{KeyCode, KeyEvent};

use super::app::{App, Mode, Screen};

use confirm::handle_confirm;
use navigate::handle_navigate;
use prompt::handle_prompt;
use scratchpads::handle_scratchpads;

/// Handle a key event in the current mode
pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }
    tracing::trace!(?key, "key");
    app.status_message = None;

    match (app.mode, app.screen) {
        (Mode::Navigate, Screen::Journal) => handle_navigate(app, key),
        (Mode::Navigate, Screen::Scratchpads) => handle_scratchpads(app, key),
        (Mode::Confirm, _) => handle_confirm(app, key),
        (Mode::Prompt, _) => handle_prompt(app, key),
    }
}
