use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::model::config::Config;
use crate::model::date::MonthDay;
use crate::ops::events::{CalendarEvent, CalendarEvents};

/// Error type for loading the configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("could not parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("event {name:?} in group {group:?}: invalid date {value:?} (expected DD.MM.)")]
    InvalidEventDate {
        group: String,
        name: String,
        value: String,
    },
}

/// Config file path, respecting XDG_CONFIG_HOME
pub fn config_path() -> PathBuf {
    let config_dir = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| dirs_home().join(".config"));
    config_dir.join("daybook").join("config.toml")
}

/// Directory for the UI state file and the log, respecting XDG_STATE_HOME
pub fn state_dir() -> PathBuf {
    let state_dir = std::env::var("XDG_STATE_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| dirs_home().join(".local").join("state"));
    state_dir.join("daybook")
}

fn dirs_home() -> PathBuf {
    std::env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("/tmp"))
}

/// Load the config at `path`. A missing file gives the defaults.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Config::default());
        }
        Err(e) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source: e,
            });
        }
    };
    let config: Config = toml::from_str(&text)?;
    tracing::debug!(path = %path.display(), "loaded config");
    Ok(config)
}

/// Replace a leading `~` with $HOME
pub fn expand_tilde(path: &str) -> PathBuf {
    if path == "~" {
        return dirs_home();
    }
    match path.strip_prefix("~/") {
        Some(rest) => dirs_home().join(rest),
        None => PathBuf::from(path),
    }
}

/// The `[events.*]` tables, with dates parsed
pub fn calendar_events(config: &Config) -> Result<CalendarEvents, ConfigError> {
    let mut events = CalendarEvents::new();
    for (group, table) in &config.events {
        for entry in &table.entries {
            let date = MonthDay::parse_day_month(&entry.date).ok_or_else(|| {
                ConfigError::InvalidEventDate {
                    group: group.clone(),
                    name: entry.name.clone(),
                    value: entry.date.clone(),
                }
            })?;
            events.push(
                group,
                CalendarEvent {
                    name: entry.name.clone(),
                    date,
                },
            );
        }
    }
    Ok(events)
}
