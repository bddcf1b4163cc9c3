use std::collections::{BTreeMap, BTreeSet};
use std::fmt::{self, Write as _};
use std::fs;
use std::io::{self, Write as _};
use std::path::{Path, PathBuf};

use chrono::format::{Item, StrftimeItems};
use chrono::{Datelike, NaiveDate};
use tempfile::NamedTempFile;

/// Error type for log entry storage
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error("could not read {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("could not write {path}: {source}")]
    Write { path: PathBuf, source: io::Error },
    #[error("could not remove {path}: {source}")]
    Remove { path: PathBuf, source: io::Error },
    #[error("invalid filename format: {0:?}")]
    InvalidFilenameFormat(String),
}

/// Storage for the log entries, one text document per date.
///
/// `read` distinguishes a missing entry (`Ok(None)`) from a failed read.
/// Callers that `write` or `remove` must reindex the date afterwards.
pub trait DocumentProvider {
    fn read(&self, date: NaiveDate) -> Result<Option<String>, RepoError>;
    fn write(&mut self, date: NaiveDate, text: &str) -> Result<(), RepoError>;
    fn remove(&mut self, date: NaiveDate) -> Result<(), RepoError>;
}

// ---------------------------------------------------------------------------
// Filesystem
// ---------------------------------------------------------------------------

/// Entries stored as `<log_dir>/y<YYYY>/<filename_format>`
#[derive(Debug, Clone)]
pub struct LocalRepository {
    log_dir: PathBuf,
    filename_format: String,
}

impl LocalRepository {
    pub fn new(log_dir: impl Into<PathBuf>, filename_format: &str) -> Result<Self, RepoError> {
        // time and offset specifiers parse but cannot be applied to a date
        let sample = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap_or_default();
        let invalid = filename_format.trim().is_empty()
            || filename_format.contains('/')
            || StrftimeItems::new(filename_format).any(|item| matches!(item, Item::Error))
            || format_file_name(filename_format, sample).is_err();
        if invalid {
            return Err(RepoError::InvalidFilenameFormat(filename_format.to_string()));
        }
        Ok(LocalRepository {
            log_dir: log_dir.into(),
            filename_format: filename_format.to_string(),
        })
    }

    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }

    /// Where the entry for `date` lives, whether or not it exists
    pub fn path(&self, date: NaiveDate) -> PathBuf {
        // new() formatted a sample date with the same items; whether chrono
        // can apply them does not depend on the date
        let name = format_file_name(&self.filename_format, date).unwrap_or_default();
        self.log_dir.join(format!("y{}", date.year())).join(name)
    }

    /// Map a path under the log directory back to its date, if it names an entry
    pub fn date_for_path(&self, path: &Path) -> Option<NaiveDate> {
        let name = path.file_name()?.to_str()?;
        let date = NaiveDate::parse_from_str(name, &self.filename_format).ok()?;
        let year_dir = path.parent()?.file_name()?.to_str()?;
        if year_dir == format!("y{}", date.year()) {
            Some(date)
        } else {
            None
        }
    }
}

impl DocumentProvider for LocalRepository {
    fn read(&self, date: NaiveDate) -> Result<Option<String>, RepoError> {
        let path = self.path(date);
        match fs::read_to_string(&path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(RepoError::Read { path, source: e }),
        }
    }

    fn write(&mut self, date: NaiveDate, text: &str) -> Result<(), RepoError> {
        let path = self.path(date);
        atomic_write(&path, text.as_bytes()).map_err(|e| RepoError::Write {
            path: path.clone(),
            source: e,
        })?;
        tracing::debug!(%date, path = %path.display(), "wrote entry");
        Ok(())
    }

    fn remove(&mut self, date: NaiveDate) -> Result<(), RepoError> {
        let path = self.path(date);
        match fs::remove_file(&path) {
            Ok(()) => {
                tracing::debug!(%date, path = %path.display(), "removed entry");
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(RepoError::Remove { path, source: e }),
        }
    }
}

fn format_file_name(filename_format: &str, date: NaiveDate) -> Result<String, fmt::Error> {
    let mut name = String::new();
    write!(
        name,
        "{}",
        date.format_with_items(StrftimeItems::new(filename_format))
    )?;
    Ok(name)
}

/// Write via a temp file in the same directory, then rename over the target
pub(crate) fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = path.parent().unwrap_or(Path::new("."));
    fs::create_dir_all(dir)?;
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// In memory
// ---------------------------------------------------------------------------

/// Entries held in a map. Reads for dates marked with `fail_reads_for`
/// return an error instead of the stored text.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    entries: BTreeMap<NaiveDate, String>,
    failing: BTreeSet<NaiveDate>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (NaiveDate, S)>,
        S: Into<String>,
    {
        InMemoryRepository {
            entries: entries.into_iter().map(|(d, t)| (d, t.into())).collect(),
            failing: BTreeSet::new(),
        }
    }

    pub fn insert(&mut self, date: NaiveDate, text: impl Into<String>) {
        self.entries.insert(date, text.into());
    }

    pub fn fail_reads_for(&mut self, date: NaiveDate) {
        self.failing.insert(date);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn memory_path(date: NaiveDate) -> PathBuf {
        PathBuf::from(format!("memory:{}", date))
    }
}

impl DocumentProvider for InMemoryRepository {
    fn read(&self, date: NaiveDate) -> Result<Option<String>, RepoError> {
        if self.failing.contains(&date) {
            return Err(RepoError::Read {
                path: Self::memory_path(date),
                source: io::Error::other("read failure"),
            });
        }
        Ok(self.entries.get(&date).cloned())
    }

    fn write(&mut self, date: NaiveDate, text: &str) -> Result<(), RepoError> {
        self.entries.insert(date, text.to_string());
        Ok(())
    }

    fn remove(&mut self, date: NaiveDate) -> Result<(), RepoError> {
        self.entries.remove(&date);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn path_layout() {
        let repo = LocalRepository::new("/logs", "d%Y_%m_%d.md").unwrap();
        assert_eq!(
            repo.path(date(2024, 3, 5)),
            PathBuf::from("/logs/y2024/d2024_03_05.md")
        );
    }

    #[test]
    fn rejects_bad_formats() {
        assert!(matches!(
            LocalRepository::new("/logs", "%Q.md"),
            Err(RepoError::InvalidFilenameFormat(_))
        ));
        assert!(LocalRepository::new("/logs", "").is_err());
        assert!(LocalRepository::new("/logs", "%Y/%m.md").is_err());
        // parse fine but need a time or offset, which a date does not have
        for format in ["d%Y_%H.md", "d%Y_%m_%d_%H.md", "%Y-%m-%d%z.md"] {
            assert!(
                matches!(
                    LocalRepository::new("/logs", format),
                    Err(RepoError::InvalidFilenameFormat(_))
                ),
                "{} accepted",
                format
            );
        }
    }

    #[test]
    fn distinct_dates_get_distinct_files() {
        let repo = LocalRepository::new("/logs", "%Y-%m-%d.md").unwrap();
        let a = repo.path(date(2024, 1, 1));
        let b = repo.path(date(2024, 5, 9));
        assert_ne!(a, b);
        assert_eq!(a, PathBuf::from("/logs/y2024/2024-01-01.md"));
    }

    #[test]
    fn date_for_path_round_trips() {
        let repo = LocalRepository::new("/logs", "d%Y_%m_%d.md").unwrap();
        let d = date(2023, 12, 31);
        assert_eq!(repo.date_for_path(&repo.path(d)), Some(d));
        assert_eq!(repo.date_for_path(Path::new("/logs/y2023/notes.md")), None);
        // right name, wrong year directory
        assert_eq!(
            repo.date_for_path(Path::new("/logs/y2020/d2023_12_31.md")),
            None
        );
    }

    #[test]
    fn local_read_write_remove() {
        let tmp = TempDir::new().unwrap();
        let mut repo = LocalRepository::new(tmp.path(), "d%Y_%m_%d.md").unwrap();
        let d = date(2024, 2, 29);

        assert_eq!(repo.read(d).unwrap(), None);
        repo.write(d, "# work\n* meeting\n").unwrap();
        assert!(tmp.path().join("y2024/d2024_02_29.md").exists());
        assert_eq!(repo.read(d).unwrap().as_deref(), Some("# work\n* meeting\n"));

        repo.write(d, "rewritten").unwrap();
        assert_eq!(repo.read(d).unwrap().as_deref(), Some("rewritten"));

        repo.remove(d).unwrap();
        assert_eq!(repo.read(d).unwrap(), None);
        // removing again is fine
        repo.remove(d).unwrap();
    }

    #[test]
    fn local_read_error_is_not_absence() {
        let tmp = TempDir::new().unwrap();
        let repo = LocalRepository::new(tmp.path(), "d%Y_%m_%d.md").unwrap();
        let d = date(2024, 1, 1);
        // a directory where the file should be
        fs::create_dir_all(repo.path(d)).unwrap();
        assert!(matches!(repo.read(d), Err(RepoError::Read { .. })));
    }

    #[test]
    fn in_memory_failures() {
        let d = date(2024, 5, 1);
        let mut repo = InMemoryRepository::with_entries([(d, "text")]);
        assert_eq!(repo.read(d).unwrap().as_deref(), Some("text"));
        repo.fail_reads_for(d);
        assert!(repo.read(d).is_err());
    }
}
