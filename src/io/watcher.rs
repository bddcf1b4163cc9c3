use std::collections::BTreeSet;
use std::sync::mpsc;

use chrono::NaiveDate;
use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};

use crate::io::repository::LocalRepository;

/// Events sent from the file watcher to the TUI event loop.
#[derive(Debug)]
pub enum FileEvent {
    /// Entries for these dates were created, changed or removed on disk.
    Changed(Vec<NaiveDate>),
}

/// A file system watcher for the log directory.
pub struct LogDirWatcher {
    _watcher: RecommendedWatcher,
    rx: mpsc::Receiver<FileEvent>,
}

impl LogDirWatcher {
    /// Start watching the repository's log directory.
    /// Returns a `LogDirWatcher` whose `poll()` method should be called each tick.
    pub fn start(repo: &LocalRepository) -> Result<Self, notify::Error> {
        let (tx, rx) = mpsc::channel();
        let names = repo.clone();

        let mut watcher = RecommendedWatcher::new(
            move |result: Result<Event, notify::Error>| {
                let event = match result {
                    Ok(e) => e,
                    Err(e) => {
                        tracing::warn!(error = %e, "file watcher error");
                        return;
                    }
                };

                match event.kind {
                    EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_) => {}
                    _ => return,
                }

                // temp files and anything else not named like an entry are skipped
                let dates: Vec<NaiveDate> = event
                    .paths
                    .iter()
                    .filter_map(|p| names.date_for_path(p))
                    .collect();

                if !dates.is_empty() {
                    let _ = tx.send(FileEvent::Changed(dates));
                }
            },
            Config::default(),
        )?;

        watcher.watch(repo.log_dir(), RecursiveMode::Recursive)?;
        tracing::debug!(dir = %repo.log_dir().display(), "watching log directory");
        Ok(LogDirWatcher {
            _watcher: watcher,
            rx,
        })
    }

    /// Non-blocking poll for pending file events.
    /// Returns every date touched since the last poll, once each.
    pub fn poll(&self) -> BTreeSet<NaiveDate> {
        let mut dates = BTreeSet::new();
        while let Ok(FileEvent::Changed(changed)) = self.rx.try_recv() {
            dates.extend(changed);
        }
        dates
    }
}
