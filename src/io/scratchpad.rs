use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, NaiveDate};

use crate::io::repository::atomic_write;

/// Directory under the log directory holding scratchpads
pub const SCRATCHPAD_DIR: &str = "scratchpads";

const EXTENSION: &str = ".md";

/// Error type for scratchpad storage
#[derive(Debug, thiserror::Error)]
pub enum ScratchpadError {
    #[error("could not list {path}: {source}")]
    List { path: PathBuf, source: io::Error },
    #[error("could not read {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("could not write {path}: {source}")]
    Write { path: PathBuf, source: io::Error },
    #[error("could not remove {path}: {source}")]
    Remove { path: PathBuf, source: io::Error },
    #[error("could not rename {from} to {to}: {source}")]
    Rename {
        from: PathBuf,
        to: PathBuf,
        source: io::Error,
    },
    #[error("invalid scratchpad name: {0:?}")]
    InvalidName(String),
    #[error("scratchpad {0:?} already exists")]
    AlreadyExists(String),
    #[error("no scratchpad {0:?}")]
    NotFound(String),
}

/// One free-form note kept outside the calendar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scratchpad {
    /// File name, including the `.md` extension
    pub name: String,
    pub text: String,
    pub modified: Option<NaiveDate>,
}

/// Turn user input into a file name: trimmed, `.md` appended unless already
/// there. Names that would leave the directory or hide the file are refused.
pub fn scratchpad_file_name(input: &str) -> Result<String, ScratchpadError> {
    let name = input.trim();
    let stem = name.strip_suffix(EXTENSION).unwrap_or(name);
    let invalid = stem.trim().is_empty()
        || name.starts_with('.')
        || name.contains(['/', '\\'])
        || name.chars().any(char::is_control);
    if invalid {
        return Err(ScratchpadError::InvalidName(input.to_string()));
    }
    Ok(format!("{}{}", stem, EXTENSION))
}

/// Scratchpads stored as plain files in one directory
#[derive(Debug, Clone)]
pub struct ScratchpadStore {
    dir: PathBuf,
}

impl ScratchpadStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        ScratchpadStore { dir: dir.into() }
    }

    /// `<log_dir>/scratchpads`
    pub fn in_log_dir(log_dir: &Path) -> Self {
        Self::new(log_dir.join(SCRATCHPAD_DIR))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, name: &str) -> Result<PathBuf, ScratchpadError> {
        Ok(self.dir.join(scratchpad_file_name(name)?))
    }

    /// Every scratchpad, sorted by name. A missing directory is an empty list.
    pub fn list(&self) -> Result<Vec<Scratchpad>, ScratchpadError> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(ScratchpadError::List {
                    path: self.dir.clone(),
                    source: e,
                });
            }
        };

        let mut pads = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| ScratchpadError::List {
                path: self.dir.clone(),
                source: e,
            })?;
            let path = entry.path();
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            // temp files from atomic writes and anything else not ours
            if !path.is_file() || name.starts_with('.') || !name.ends_with(EXTENSION) {
                continue;
            }
            let text = fs::read_to_string(&path).map_err(|e| ScratchpadError::Read {
                path: path.clone(),
                source: e,
            })?;
            let modified = entry
                .metadata()
                .and_then(|m| m.modified())
                .ok()
                .map(|time| DateTime::<Local>::from(time).date_naive());
            pads.push(Scratchpad {
                name: name.to_string(),
                text,
                modified,
            });
        }
        pads.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(pads)
    }

    pub fn read(&self, name: &str) -> Result<Option<String>, ScratchpadError> {
        let path = self.path(name)?;
        match fs::read_to_string(&path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(ScratchpadError::Read { path, source: e }),
        }
    }

    pub fn write(&self, name: &str, text: &str) -> Result<(), ScratchpadError> {
        let path = self.path(name)?;
        atomic_write(&path, text.as_bytes()).map_err(|e| ScratchpadError::Write {
            path: path.clone(),
            source: e,
        })?;
        tracing::debug!(path = %path.display(), "wrote scratchpad");
        Ok(())
    }

    /// Removing a scratchpad that does not exist is not an error
    pub fn remove(&self, name: &str) -> Result<(), ScratchpadError> {
        let path = self.path(name)?;
        match fs::remove_file(&path) {
            Ok(()) => {
                tracing::debug!(path = %path.display(), "removed scratchpad");
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ScratchpadError::Remove { path, source: e }),
        }
    }

    /// Rename `from` to `to`, never overwriting another scratchpad.
    /// Returns the new file name.
    pub fn rename(&self, from: &str, to: &str) -> Result<String, ScratchpadError> {
        let from_path = self.path(from)?;
        let to_name = scratchpad_file_name(to)?;
        let to_path = self.dir.join(&to_name);
        if from_path == to_path {
            return Ok(to_name);
        }
        if !from_path.exists() {
            return Err(ScratchpadError::NotFound(from.to_string()));
        }
        if to_path.exists() {
            return Err(ScratchpadError::AlreadyExists(to_name));
        }
        fs::rename(&from_path, &to_path).map_err(|e| ScratchpadError::Rename {
            from: from_path.clone(),
            to: to_path.clone(),
            source: e,
        })?;
        tracing::debug!(from = %from_path.display(), to = %to_path.display(), "renamed scratchpad");
        Ok(to_name)
    }
}
