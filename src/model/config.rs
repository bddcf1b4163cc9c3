use std::collections::HashMap;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Configuration from config.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding the `y<YYYY>/` entry folders. `~` is expanded on load.
    #[serde(default = "default_log_dir")]
    pub log_dir: String,
    /// chrono strftime pattern for entry file names
    #[serde(default = "default_filename_format")]
    pub filename_format: String,
    /// Treat a `#` header on the first line as a section. Off by default:
    /// the first line is reserved for a free-form title.
    #[serde(default)]
    pub first_line_section: bool,
    #[serde(default)]
    pub sunday_start: bool,
    /// Editor command; falls back to $VISUAL, then $EDITOR
    #[serde(default)]
    pub editor: Option<String>,
    /// How many days around today an event counts as recent or upcoming
    #[serde(default = "default_recent_events_window")]
    pub recent_events_window: u32,
    /// Recurring calendar events, grouped (birthdays, holidays, ...)
    #[serde(default)]
    pub events: IndexMap<String, EventGroup>,
    #[serde(default)]
    pub ui: UiConfig,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            log_dir: default_log_dir(),
            filename_format: default_filename_format(),
            first_line_section: false,
            sunday_start: false,
            editor: None,
            recent_events_window: default_recent_events_window(),
            events: IndexMap::new(),
            ui: UiConfig::default(),
        }
    }
}

impl Config {
    /// Whether the parser should ignore a header on the first line
    pub fn skip_first_line(&self) -> bool {
        !self.first_line_section
    }
}

fn default_log_dir() -> String {
    "~/.daybook/day".to_string()
}

fn default_filename_format() -> String {
    "d%Y_%m_%d.md".to_string()
}

fn default_recent_events_window() -> u32 {
    14
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventGroup {
    #[serde(default)]
    pub entries: Vec<EventEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventEntry {
    pub name: String,
    /// `DD.MM.`
    pub date: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UiConfig {
    /// Theme overrides, e.g. `highlight = "#FB4196"`
    #[serde(default)]
    pub colors: HashMap<String, String>,
}
