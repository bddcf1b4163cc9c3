use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::time::Duration;

use chrono::{Datelike, Days, NaiveDate};
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::cli::settings::Settings;
use crate::io::config_io::{self, calendar_events};
use crate::io::repository::RepoError;
use crate::io::scratchpad::{Scratchpad, ScratchpadError, ScratchpadStore, scratchpad_file_name};
use crate::io::state::{UiState, read_ui_state, write_ui_state};
use crate::io::watcher::LogDirWatcher;
use crate::model::date::{Dates, MonthDay, days_in_month};
use crate::ops::events::{CalendarEvents, RecentAndUpcoming, recent_and_upcoming};
use crate::ops::journal::{EditOutcome, Journal, new_entry_template};

use super::editor;
use super::input;
use super::render;
use super::theme::Theme;

/// Which pane receives movement keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Sections,
    Tags,
    Calendar,
    Preview,
}

impl Focus {
    pub fn next(self) -> Self {
        match self {
            Focus::Sections => Focus::Tags,
            Focus::Tags => Focus::Calendar,
            Focus::Calendar => Focus::Preview,
            Focus::Preview => Focus::Sections,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Focus::Sections => Focus::Preview,
            Focus::Tags => Focus::Sections,
            Focus::Calendar => Focus::Tags,
            Focus::Preview => Focus::Calendar,
        }
    }
}

/// Which screen is shown: the calendar or the scratchpad manager
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Journal,
    Scratchpads,
}

/// Current interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Navigate,
    Confirm,
    /// Typing a line of text into the status row
    Prompt,
}

/// Action awaiting a y/n answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmAction {
    DeleteEntry(NaiveDate),
    DeleteScratchpad(String),
}

#[derive(Debug, Clone)]
pub struct ConfirmState {
    pub message: String,
    pub action: ConfirmAction,
}

/// What a finished prompt does with its input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptAction {
    NewScratchpad,
    RenameScratchpad(String),
}

#[derive(Debug, Clone)]
pub struct PromptState {
    pub label: String,
    pub input: String,
    pub action: PromptAction,
}

/// Document to open in the external editor
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditTarget {
    Entry(NaiveDate),
    Scratchpad(String),
}

/// Main application state
pub struct App {
    pub journal: Journal,
    pub today: NaiveDate,
    /// Focused calendar day, always inside the displayed year
    pub cursor: NaiveDate,
    pub focus: Focus,
    pub screen: Screen,
    pub mode: Mode,
    pub should_quit: bool,
    pub theme: Theme,
    pub sunday_start: bool,
    pub events: CalendarEvents,
    pub event_days: Dates,
    pub nearby_events: RecentAndUpcoming,
    pub preview_scroll: u16,
    pub confirm_state: Option<ConfirmState>,
    pub prompt_state: Option<PromptState>,
    pub scratchpads: ScratchpadStore,
    /// Loaded when the scratchpad screen opens and after every change
    pub scratchpad_list: Vec<Scratchpad>,
    /// Row in the scratchpad list; row 0 creates a new one
    pub scratchpad_row: usize,
    /// Last error or notice, shown in the status row until the next key
    pub status_message: Option<String>,
    /// Document to open in the editor; the event loop owns the terminal, so
    /// it performs the launch
    pub pending_edit: Option<EditTarget>,
    pub editor_command: String,
}

impl App {
    pub fn new(
        journal: Journal,
        settings: &Settings,
        events: CalendarEvents,
        scratchpads: ScratchpadStore,
    ) -> Self {
        let nearby_events = recent_and_upcoming(
            &events,
            settings.today,
            settings.config.recent_events_window,
        );
        let cursor = default_cursor(settings.today, journal.year());
        App {
            journal,
            today: settings.today,
            cursor,
            focus: Focus::Calendar,
            screen: Screen::Journal,
            mode: Mode::Navigate,
            should_quit: false,
            theme: Theme::from_config(&settings.config.ui),
            sunday_start: settings.config.sunday_start,
            event_days: events.event_dates(),
            events,
            nearby_events,
            preview_scroll: 0,
            confirm_state: None,
            prompt_state: None,
            scratchpads,
            scratchpad_list: Vec::new(),
            scratchpad_row: 0,
            status_message: None,
            pending_edit: None,
            editor_command: editor::editor_command(settings.config.editor.as_deref()),
        }
    }

    pub fn year(&self) -> i32 {
        self.journal.year()
    }

    /// Text of the focused day's entry, if any
    pub fn cursor_entry(&self) -> Option<String> {
        match self.journal.read(self.cursor) {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(error = %e, "could not read entry for preview");
                None
            }
        }
    }

    pub fn cursor_has_entry(&self) -> bool {
        self.journal.index().has_document(MonthDay::of(self.cursor))
    }

    // -----------------------------------------------------------------------
    // Calendar
    // -----------------------------------------------------------------------

    /// Move the cursor by `days`, staying inside the displayed year
    pub fn move_cursor(&mut self, days: i64) {
        let moved = if days >= 0 {
            self.cursor.checked_add_days(Days::new(days.unsigned_abs()))
        } else {
            self.cursor.checked_sub_days(Days::new(days.unsigned_abs()))
        };
        if let Some(date) = moved.filter(|d| d.year() == self.year()) {
            self.set_cursor(date);
        }
    }

    /// Same day in the previous/next month, clamped to the month's length
    pub fn move_cursor_months(&mut self, months: i32) {
        let month0 = self.cursor.month0() as i32 + months;
        if !(0..12).contains(&month0) {
            return;
        }
        let month = month0 as u32 + 1;
        let day = self.cursor.day().min(days_in_month(self.year(), month));
        if let Some(date) = NaiveDate::from_ymd_opt(self.year(), month, day) {
            self.set_cursor(date);
        }
    }

    pub fn jump_to_today(&mut self) {
        if self.today.year() != self.year() {
            self.change_year(self.today.year() - self.year());
            if self.today.year() != self.year() {
                // year switch failed and was reported
                return;
            }
        }
        self.set_cursor(self.today);
    }

    fn set_cursor(&mut self, date: NaiveDate) {
        if date != self.cursor {
            self.cursor = date;
            self.preview_scroll = 0;
        }
    }

    /// Display another year; the cursor keeps its month and day where possible
    pub fn change_year(&mut self, delta: i32) {
        let year = self.year() + delta;
        if let Err(e) = self.journal.display_year(year) {
            self.report_error("could not load year", &e);
            return;
        }
        let day = self.cursor.day().min(days_in_month(year, self.cursor.month()));
        self.cursor = NaiveDate::from_ymd_opt(year, self.cursor.month(), day)
            .unwrap_or_else(|| default_cursor(self.today, year));
        self.preview_scroll = 0;
        tracing::info!(year, "displaying year");
    }

    // -----------------------------------------------------------------------
    // Menus
    // -----------------------------------------------------------------------

    pub fn section_row(&self) -> usize {
        let selection = self.journal.selection();
        selection
            .section_menu()
            .position(selection.selected_section())
            .unwrap_or(0)
    }

    pub fn tag_row(&self) -> usize {
        let selection = self.journal.selection();
        selection
            .tag_menu()
            .position(selection.selected_tag())
            .unwrap_or(0)
    }

    /// Select the section menu row `row`, if it exists
    pub fn select_section_row(&mut self, row: usize) {
        let key = match self.journal.selection().section_menu().key_at(row) {
            Some(key) => key.cloned(),
            None => return,
        };
        self.journal.select_section(key);
    }

    pub fn select_tag_row(&mut self, row: usize) {
        let key = match self.journal.selection().tag_menu().key_at(row) {
            Some(key) => key.cloned(),
            None => return,
        };
        self.journal.select_tag(key);
    }

    // -----------------------------------------------------------------------
    // Entries
    // -----------------------------------------------------------------------

    /// Text the editor opens with: the entry, or the new-entry template
    pub fn edit_seed(&self, date: NaiveDate) -> Result<String, RepoError> {
        Ok(self
            .journal
            .read(date)?
            .unwrap_or_else(|| new_entry_template(date)))
    }

    /// Store what came back from the editor
    pub fn finish_edit(&mut self, date: NaiveDate, edited: io::Result<String>) {
        let text = match edited {
            Ok(text) => text,
            Err(e) => {
                self.report_error("editor failed", &e);
                return;
            }
        };
        match self.journal.save_edited(date, &text) {
            Ok(EditOutcome::Removed) => {
                self.status_message = Some(format!("{}: empty entry removed", date));
            }
            Ok(EditOutcome::Saved | EditOutcome::Unchanged) => {}
            Err(e) => self.report_error("could not save entry", &e),
        }
    }

    /// Ask before deleting the focused day's entry
    pub fn request_delete(&mut self) {
        if !self.cursor_has_entry() {
            return;
        }
        self.confirm_state = Some(ConfirmState {
            message: format!("Delete entry for {}?", self.cursor.format("%d. %m. %Y.")),
            action: ConfirmAction::DeleteEntry(self.cursor),
        });
        self.mode = Mode::Confirm;
    }

    pub fn delete_entry(&mut self, date: NaiveDate) {
        match self.journal.remove(date) {
            Ok(()) => tracing::info!(%date, "entry deleted"),
            Err(e) => self.report_error("could not delete entry", &e),
        }
    }

    /// Reindex dates changed on disk by something else
    pub fn apply_file_changes(&mut self, dates: &BTreeSet<NaiveDate>) {
        for &date in dates {
            if let Err(e) = self.journal.reindex(date) {
                self.report_error("could not reindex", &e);
            }
        }
    }

    pub fn refresh(&mut self) {
        if let Err(e) = self.journal.refresh() {
            self.report_error("could not refresh", &e);
        }
    }

    fn report_error(&mut self, what: &str, err: &dyn std::error::Error) {
        tracing::warn!(error = %err, "{}", what);
        self.status_message = Some(format!("{}: {}", what, err));
    }

    // -----------------------------------------------------------------------
    // Scratchpads
    // -----------------------------------------------------------------------

    /// Switch between the calendar and the scratchpad manager
    pub fn toggle_screen(&mut self) {
        self.screen = match self.screen {
            Screen::Journal => {
                self.reload_scratchpads();
                Screen::Scratchpads
            }
            Screen::Scratchpads => Screen::Journal,
        };
        self.preview_scroll = 0;
    }

    pub fn reload_scratchpads(&mut self) {
        match self.scratchpads.list() {
            Ok(list) => self.scratchpad_list = list,
            Err(e) => self.report_error("could not list scratchpads", &e),
        }
        self.scratchpad_row = self.scratchpad_row.min(self.scratchpad_list.len());
    }

    /// The scratchpad under the list cursor; `None` on the create row
    pub fn selected_scratchpad(&self) -> Option<&Scratchpad> {
        self.scratchpad_row
            .checked_sub(1)
            .and_then(|idx| self.scratchpad_list.get(idx))
    }

    /// Select list row `row`, if it exists
    pub fn select_scratchpad_row(&mut self, row: usize) {
        if row <= self.scratchpad_list.len() && row != self.scratchpad_row {
            self.scratchpad_row = row;
            self.preview_scroll = 0;
        }
    }

    fn select_scratchpad_named(&mut self, name: &str) {
        if let Some(idx) = self.scratchpad_list.iter().position(|p| p.name == name) {
            self.select_scratchpad_row(idx + 1);
        }
    }

    /// Enter on the list: edit the selected scratchpad, or ask for a name
    pub fn open_scratchpad(&mut self) {
        match self.selected_scratchpad() {
            Some(pad) => self.pending_edit = Some(EditTarget::Scratchpad(pad.name.clone())),
            None => self.start_prompt("New scratchpad name", "", PromptAction::NewScratchpad),
        }
    }

    pub fn request_scratchpad_rename(&mut self) {
        let Some(name) = self.selected_scratchpad().map(|p| p.name.clone()) else {
            return;
        };
        let stem = name.strip_suffix(".md").unwrap_or(&name).to_string();
        self.start_prompt(
            &format!("Rename {} to", name),
            &stem,
            PromptAction::RenameScratchpad(name),
        );
    }

    pub fn request_scratchpad_delete(&mut self) {
        let Some(name) = self.selected_scratchpad().map(|p| p.name.clone()) else {
            return;
        };
        self.confirm_state = Some(ConfirmState {
            message: format!("Delete scratchpad {}?", name),
            action: ConfirmAction::DeleteScratchpad(name),
        });
        self.mode = Mode::Confirm;
    }

    pub fn delete_scratchpad(&mut self, name: &str) {
        match self.scratchpads.remove(name) {
            Ok(()) => tracing::info!(name, "scratchpad deleted"),
            Err(e) => self.report_error("could not delete scratchpad", &e),
        }
        self.reload_scratchpads();
    }

    fn start_prompt(&mut self, label: &str, input: &str, action: PromptAction) {
        self.prompt_state = Some(PromptState {
            label: label.to_string(),
            input: input.to_string(),
            action,
        });
        self.mode = Mode::Prompt;
    }

    pub fn cancel_prompt(&mut self) {
        self.prompt_state = None;
        self.mode = Mode::Navigate;
    }

    /// Act on the typed name
    pub fn submit_prompt(&mut self) {
        let Some(prompt) = self.prompt_state.take() else {
            return;
        };
        self.mode = Mode::Navigate;
        match prompt.action {
            PromptAction::NewScratchpad => match scratchpad_file_name(&prompt.input) {
                Ok(name) => self.pending_edit = Some(EditTarget::Scratchpad(name)),
                Err(e) => self.report_error("could not create scratchpad", &e),
            },
            PromptAction::RenameScratchpad(from) => {
                match self.scratchpads.rename(&from, &prompt.input) {
                    Ok(to) => {
                        self.reload_scratchpads();
                        self.select_scratchpad_named(&to);
                    }
                    Err(e) => self.report_error("could not rename scratchpad", &e),
                }
            }
        }
    }

    pub fn scratchpad_seed(&self, name: &str) -> Result<String, ScratchpadError> {
        Ok(self.scratchpads.read(name)?.unwrap_or_default())
    }

    /// Store what came back from the editor. A blank scratchpad is not kept.
    pub fn finish_scratchpad_edit(&mut self, name: &str, edited: io::Result<String>) {
        let text = match edited {
            Ok(text) => text,
            Err(e) => {
                self.report_error("editor failed", &e);
                return;
            }
        };
        let result = match self.scratchpads.read(name) {
            Ok(previous) if previous.as_deref() == Some(text.as_str()) => Ok(()),
            Ok(previous) if text.trim().is_empty() => {
                if previous.is_some() {
                    self.status_message = Some(format!("{}: empty scratchpad removed", name));
                }
                self.scratchpads.remove(name)
            }
            Ok(_) => self.scratchpads.write(name, &text),
            Err(e) => Err(e),
        };
        if let Err(e) = result {
            self.report_error("could not save scratchpad", &e);
        }
        self.reload_scratchpads();
        self.select_scratchpad_named(name);
    }

    // -----------------------------------------------------------------------
    // Persisted state
    // -----------------------------------------------------------------------

    pub fn ui_state(&self) -> UiState {
        let selection = self.journal.selection();
        UiState {
            year: Some(self.year()),
            section: selection.selected_section().cloned(),
            tag: selection.selected_tag().cloned(),
        }
    }

    /// Apply a saved selection if it belongs to the displayed year
    pub fn restore_ui_state(&mut self, state: &UiState) {
        if let Some((section, tag)) = state.selection_for(self.year()) {
            self.journal.restore_selection(section, tag);
        }
    }
}

/// Today if it falls in `year`, else January 1st
fn default_cursor(today: NaiveDate, year: i32) -> NaiveDate {
    if today.year() == year {
        today
    } else {
        NaiveDate::from_ymd_opt(year, 1, 1).unwrap_or(today)
    }
}

/// Run the TUI application
pub fn run(settings: &Settings) -> Result<(), Box<dyn std::error::Error>> {
    let repo = settings.repository()?;
    fs::create_dir_all(repo.log_dir())?;
    let events = calendar_events(&settings.config)?;
    let journal = Journal::open(
        Box::new(repo.clone()),
        settings.year,
        settings.skip_first_line(),
    )?;

    let mut app = App::new(journal, settings, events, settings.scratchpads());

    // Restore saved UI state
    let state_dir = config_io::state_dir();
    if let Some(state) = read_ui_state(&state_dir) {
        app.restore_ui_state(&state);
    }

    let watcher = match LogDirWatcher::start(&repo) {
        Ok(w) => Some(w),
        Err(e) => {
            tracing::warn!(error = %e, "file watcher unavailable, external edits need a refresh");
            None
        }
    };

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    // Run event loop
    let result = run_event_loop(&mut terminal, &mut app, watcher.as_ref());

    // Save UI state before exit
    if let Err(e) = write_ui_state(&state_dir, &app.ui_state()) {
        tracing::warn!(error = %e, "could not save UI state");
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    watcher: Option<&LogDirWatcher>,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(250))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            input::handle_key(app, key);
        }

        if let Some(target) = app.pending_edit.take() {
            run_editor(terminal, app, target)?;
        }

        if let Some(watcher) = watcher {
            let changed = watcher.poll();
            if !changed.is_empty() {
                app.apply_file_changes(&changed);
            }
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}

/// Hand the terminal to the editor, then take it back
fn run_editor(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    target: EditTarget,
) -> Result<(), Box<dyn std::error::Error>> {
    let seed = match &target {
        EditTarget::Entry(date) => app
            .edit_seed(*date)
            .map_err(|e| app.report_error("could not read entry", &e)),
        EditTarget::Scratchpad(name) => app
            .scratchpad_seed(name)
            .map_err(|e| app.report_error("could not read scratchpad", &e)),
    };
    let Ok(seed) = seed else {
        return Ok(());
    };

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    let edited = editor::edit_text(&app.editor_command, &seed);
    enable_raw_mode()?;
    execute!(terminal.backend_mut(), EnterAlternateScreen)?;
    terminal.clear()?;

    match target {
        EditTarget::Entry(date) => app.finish_edit(date, edited),
        EditTarget::Scratchpad(name) => app.finish_scratchpad_edit(&name, edited),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::repository::InMemoryRepository;
    use crate::tui::render::test_helpers::*;
    use tempfile::TempDir;

    #[test]
    fn cursor_stays_in_year() {
        let mut app = app_with_entries(&[]);
        app.cursor = date(12, 30);
        app.move_cursor(7);
        assert_eq!(app.cursor, date(12, 30));
        app.move_cursor(1);
        assert_eq!(app.cursor, date(12, 31));

        app.cursor = date(1, 3);
        app.move_cursor(-7);
        assert_eq!(app.cursor, date(1, 3));
    }

    #[test]
    fn month_moves_clamp_day() {
        let mut app = app_with_entries(&[]);
        app.cursor = date(1, 31);
        app.move_cursor_months(1);
        assert_eq!(app.cursor, date(2, 29));
        app.move_cursor_months(-2);
        assert_eq!(app.cursor, date(2, 29));
    }

    #[test]
    fn year_change_keeps_month_and_day() {
        let mut app = app_with_entries(&[(date(2, 29), "title\n* leap")]);
        app.cursor = date(2, 29);
        app.change_year(-1);
        assert_eq!(app.year(), 2023);
        assert_eq!(app.cursor, NaiveDate::from_ymd_opt(2023, 2, 28).unwrap());
        app.jump_to_today();
        assert_eq!(app.year(), 2024);
        assert_eq!(app.cursor, today());
    }

    #[test]
    fn failed_jump_to_today_keeps_cursor() {
        let mut repo = InMemoryRepository::new();
        repo.fail_reads_for(date(6, 1));
        let journal = Journal::open(Box::new(repo), 2023, true).unwrap();
        let mut app = app_with_journal(journal);
        let start = NaiveDate::from_ymd_opt(2023, 8, 14).unwrap();
        app.cursor = start;

        app.jump_to_today();
        assert_eq!(app.year(), 2023);
        assert_eq!(app.cursor, start);
        assert!(app.status_message.as_deref().is_some_and(|m| m.contains("could not load year")));
    }

    #[test]
    fn scratchpad_screen_lists_on_entry() {
        let tmp = TempDir::new().unwrap();
        let mut app = app_with_scratchpads(tmp.path());
        app.scratchpads.write("ideas", "one\n").unwrap();
        assert!(app.scratchpad_list.is_empty());

        app.toggle_screen();
        assert_eq!(app.screen, Screen::Scratchpads);
        assert_eq!(app.scratchpad_list.len(), 1);
        assert_eq!(app.selected_scratchpad(), None);

        app.select_scratchpad_row(1);
        assert_eq!(app.selected_scratchpad().map(|p| p.name.as_str()), Some("ideas.md"));
        app.open_scratchpad();
        assert_eq!(app.pending_edit, Some(EditTarget::Scratchpad("ideas.md".into())));

        app.toggle_screen();
        assert_eq!(app.screen, Screen::Journal);
    }

    #[test]
    fn new_scratchpad_prompts_for_a_name() {
        let tmp = TempDir::new().unwrap();
        let mut app = app_with_scratchpads(tmp.path());
        app.toggle_screen();
        app.open_scratchpad();
        assert_eq!(app.mode, Mode::Prompt);

        app.prompt_state.as_mut().unwrap().input.push_str("todo");
        app.submit_prompt();
        assert_eq!(app.mode, Mode::Navigate);
        assert_eq!(app.pending_edit, Some(EditTarget::Scratchpad("todo.md".into())));

        let name = "todo.md";
        assert_eq!(app.scratchpad_seed(name).unwrap(), "");
        app.finish_scratchpad_edit(name, Ok("- milk\n".into()));
        assert_eq!(app.scratchpads.read(name).unwrap().as_deref(), Some("- milk\n"));
        assert_eq!(app.selected_scratchpad().map(|p| p.name.as_str()), Some(name));

        // blanking it removes the file
        app.finish_scratchpad_edit(name, Ok("  \n".into()));
        assert_eq!(app.scratchpads.read(name).unwrap(), None);
        assert!(app.scratchpad_list.is_empty());
        assert_eq!(app.scratchpad_row, 0);
    }

    #[test]
    fn bad_scratchpad_name_is_reported() {
        let tmp = TempDir::new().unwrap();
        let mut app = app_with_scratchpads(tmp.path());
        app.toggle_screen();
        app.open_scratchpad();
        app.prompt_state.as_mut().unwrap().input.push_str("../escape");
        app.submit_prompt();
        assert_eq!(app.pending_edit, None);
        assert!(app.status_message.is_some());
    }

    #[test]
    fn rename_and_delete_scratchpads() {
        let tmp = TempDir::new().unwrap();
        let mut app = app_with_scratchpads(tmp.path());
        app.scratchpads.write("a", "first").unwrap();
        app.scratchpads.write("b", "second").unwrap();
        app.toggle_screen();
        app.select_scratchpad_row(1);

        app.request_scratchpad_rename();
        let prompt = app.prompt_state.as_mut().unwrap();
        assert_eq!(prompt.input, "a");
        prompt.input = "b".into();
        app.submit_prompt();
        assert!(app.status_message.as_deref().is_some_and(|m| m.contains("already exists")));
        assert_eq!(app.scratchpads.read("a").unwrap().as_deref(), Some("first"));

        app.request_scratchpad_rename();
        app.prompt_state.as_mut().unwrap().input = "c".into();
        app.submit_prompt();
        assert_eq!(app.selected_scratchpad().map(|p| p.name.as_str()), Some("c.md"));

        app.request_scratchpad_delete();
        assert_eq!(
            app.confirm_state.as_ref().map(|c| c.action.clone()),
            Some(ConfirmAction::DeleteScratchpad("c.md".into()))
        );
        app.delete_scratchpad("c.md");
        let names: Vec<_> = app.scratchpad_list.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["b.md"]);
        assert_eq!(app.scratchpad_row, 1);
    }

    #[test]
    fn menu_rows_follow_selection() {
        let mut app = app_with_entries(&[
            (date(1, 1), "title\n# work\n* meeting"),
            (date(1, 2), "title\n# gym\n* legs"),
        ]);
        // rows: none, gym, work
        app.select_section_row(2);
        assert_eq!(app.section_row(), 2);
        assert_eq!(app.tag_row(), 0);
        app.select_tag_row(1);
        assert_eq!(app.tag_row(), 1);
        assert_eq!(app.journal.highlighted_dates().map(|d| d.len()), Some(1));

        // past the end does nothing
        app.select_section_row(9);
        assert_eq!(app.section_row(), 2);
    }

    #[test]
    fn delete_needs_an_entry() {
        let mut app = app_with_entries(&[(today(), "title\n* x")]);
        app.cursor = date(1, 1);
        app.request_delete();
        assert_eq!(app.mode, Mode::Navigate);

        app.cursor = today();
        app.request_delete();
        assert_eq!(app.mode, Mode::Confirm);
        assert_eq!(
            app.confirm_state.as_ref().map(|c| c.action.clone()),
            Some(ConfirmAction::DeleteEntry(today()))
        );
    }

    #[test]
    fn editing_round_trip() {
        let mut app = app_with_entries(&[]);
        let seed = app.edit_seed(today()).unwrap();
        assert_eq!(seed, new_entry_template(today()));

        app.finish_edit(today(), Ok(seed.clone()));
        assert!(!app.cursor_has_entry());
        assert!(app.status_message.is_some());

        app.finish_edit(today(), Ok(format!("{}# work\n* review\n", seed)));
        assert!(app.cursor_has_entry());

        app.finish_edit(today(), Err(io::Error::other("boom")));
        assert!(app.status_message.as_deref().is_some_and(|m| m.contains("boom")));
    }

    #[test]
    fn ui_state_round_trip() {
        let mut app = app_with_entries(&[(date(1, 1), "title\n# work\n* meeting")]);
        app.select_section_row(1);
        let state = app.ui_state();

        let mut fresh = app_with_entries(&[(date(1, 1), "title\n# work\n* meeting")]);
        fresh.restore_ui_state(&state);
        assert_eq!(fresh.section_row(), 1);

        // selection from another year is ignored
        let mut other = app_with_entries(&[(date(1, 1), "title\n# work\n* meeting")]);
        other.restore_ui_state(&UiState {
            year: Some(2020),
            ..state
        });
        assert_eq!(other.section_row(), 0);
    }
}
