use std::path::Path;

use chrono::NaiveDate;
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;

use crate::cli::commands::GlobalArgs;
use crate::cli::settings::Settings;
use crate::io::repository::InMemoryRepository;
use crate::io::scratchpad::ScratchpadStore;
use crate::model::config::Config;
use crate::ops::events::CalendarEvents;
use crate::ops::journal::Journal;
use crate::tui::app::App;

pub const TERM_W: u16 = 100;
pub const TERM_H: u16 = 40;

/// Render into an in-memory buffer and return plain text (no styles).
pub fn render_to_string<F>(w: u16, h: u16, f: F) -> String
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            f(frame, area);
        })
        .unwrap();

    let buf = terminal.backend().buffer().clone();
    let w = buf.area.width as usize;
    let lines: Vec<String> = buf
        .content
        .chunks(w)
        .map(|row| {
            let s: String = row.iter().map(|cell| cell.symbol()).collect();
            s.trim_end().to_string()
        })
        .collect();

    // Trim trailing blank lines
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    lines[..end].join("\n")
}

/// The fixed "today" every test app is built with
pub fn today() -> NaiveDate {
    date(3, 5)
}

/// A date in 2024, the year test apps display
pub fn date(month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, month, day).unwrap()
}

pub fn test_settings() -> Settings {
    Settings::with_config(Config::default(), &GlobalArgs::default(), today())
}

/// Build an App over an in-memory journal holding `entries`
pub fn app_with_entries(entries: &[(NaiveDate, &str)]) -> App {
    app_with_events(entries, CalendarEvents::new())
}

pub fn app_with_events(entries: &[(NaiveDate, &str)], events: CalendarEvents) -> App {
    let settings = test_settings();
    let repo = InMemoryRepository::with_entries(entries.iter().map(|&(d, t)| (d, t)));
    let journal = Journal::open(Box::new(repo), settings.year, settings.skip_first_line()).unwrap();
    App::new(journal, &settings, events, no_scratchpads())
}

/// Build an App around an already opened journal
pub fn app_with_journal(journal: Journal) -> App {
    App::new(journal, &test_settings(), CalendarEvents::new(), no_scratchpads())
}

/// Build an empty-journal App whose scratchpads live under `log_dir`
pub fn app_with_scratchpads(log_dir: &Path) -> App {
    let settings = test_settings();
    let journal = Journal::open(
        Box::new(InMemoryRepository::new()),
        settings.year,
        settings.skip_first_line(),
    )
    .unwrap();
    App::new(
        journal,
        &settings,
        CalendarEvents::new(),
        ScratchpadStore::in_log_dir(log_dir),
    )
}

/// A store whose directory never exists, so it lists nothing
fn no_scratchpads() -> ScratchpadStore {
    ScratchpadStore::new("/nonexistent/daybook-tests/scratchpads")
}
