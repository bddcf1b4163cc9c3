use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::model::keys::{SectionKey, TagKey};

const STATE_FILE: &str = "state.json";

/// Persisted TUI state (written to state.json)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct UiState {
    /// Year the selection below belongs to
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub section: Option<SectionKey>,
    #[serde(default)]
    pub tag: Option<TagKey>,
}

impl UiState {
    /// The remembered selection, if it was made in `year`
    pub fn selection_for(&self, year: i32) -> Option<(Option<SectionKey>, Option<TagKey>)> {
        if self.year == Some(year) {
            Some((self.section.clone(), self.tag.clone()))
        } else {
            None
        }
    }
}

/// Read state.json from the state directory. Missing or malformed files
/// are ignored.
pub fn read_ui_state(state_dir: &Path) -> Option<UiState> {
    let path = state_dir.join(STATE_FILE);
    let content = fs::read_to_string(&path).ok()?;
    match serde_json::from_str(&content) {
        Ok(state) => Some(state),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring malformed UI state");
            None
        }
    }
}

/// Write state.json to the state directory
pub fn write_ui_state(state_dir: &Path, state: &UiState) -> Result<(), std::io::Error> {
    fs::create_dir_all(state_dir)?;
    let content = serde_json::to_string_pretty(state)?;
    fs::write(state_dir.join(STATE_FILE), content)
}
