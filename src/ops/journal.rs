use chrono::{Datelike, NaiveDate};

use crate::io::repository::{DocumentProvider, RepoError};
use crate::model::date::Dates;
use crate::model::keys::{SectionKey, TagKey};
use crate::ops::annual_index::AnnualIndex;
use crate::ops::selection::SelectionState;

/// What saving an edited entry did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    Saved,
    /// Blank, or never changed from the template
    Removed,
    Unchanged,
}

/// Text a new entry starts from
pub fn new_entry_template(date: NaiveDate) -> String {
    format!("{}\n", date.format("# %d. %m. %Y."))
}

/// The displayed year's index and the selection built on it, plus the
/// storage both are read from. Every change to storage goes through here so
/// the index is reindexed right after.
pub struct Journal {
    provider: Box<dyn DocumentProvider>,
    skip_first_line: bool,
    index: AnnualIndex,
    selection: SelectionState,
}

impl Journal {
    pub fn open(
        provider: Box<dyn DocumentProvider>,
        year: i32,
        skip_first_line: bool,
    ) -> Result<Self, RepoError> {
        let index = AnnualIndex::rebuild_year(year, provider.as_ref(), skip_first_line)?;
        let selection = SelectionState::new(&index);
        Ok(Journal {
            provider,
            skip_first_line,
            index,
            selection,
        })
    }

    pub fn year(&self) -> i32 {
        self.index.year()
    }

    pub fn index(&self) -> &AnnualIndex {
        &self.index
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    /// Switch to another year. Index and selection are replaced wholesale;
    /// on a read failure the current year stays displayed.
    pub fn display_year(&mut self, year: i32) -> Result<(), RepoError> {
        let index = AnnualIndex::rebuild_year(year, self.provider.as_ref(), self.skip_first_line)?;
        self.selection = SelectionState::new(&index);
        self.index = index;
        Ok(())
    }

    /// Rescan the displayed year, keeping the selection where still valid
    pub fn refresh(&mut self) -> Result<(), RepoError> {
        self.index =
            AnnualIndex::rebuild_year(self.year(), self.provider.as_ref(), self.skip_first_line)?;
        self.selection.reconcile(&self.index);
        Ok(())
    }

    /// Pick up a change to one date's entry. Other years are ignored.
    pub fn reindex(&mut self, date: NaiveDate) -> Result<(), RepoError> {
        if date.year() != self.year() {
            return Ok(());
        }
        self.index
            .reindex_date(date, self.provider.as_ref(), self.skip_first_line)?;
        self.selection.reconcile(&self.index);
        Ok(())
    }

    pub fn read(&self, date: NaiveDate) -> Result<Option<String>, RepoError> {
        self.provider.read(date)
    }

    pub fn write(&mut self, date: NaiveDate, text: &str) -> Result<(), RepoError> {
        self.provider.write(date, text)?;
        self.reindex(date)
    }

    pub fn remove(&mut self, date: NaiveDate) -> Result<(), RepoError> {
        self.provider.remove(date)?;
        self.reindex(date)
    }

    /// Store the result of editing `date`'s entry. Entries left blank or
    /// identical to the new-entry template are removed.
    pub fn save_edited(&mut self, date: NaiveDate, text: &str) -> Result<EditOutcome, RepoError> {
        let trimmed = text.trim();
        if trimmed.is_empty() || trimmed == new_entry_template(date).trim() {
            let existed = self.provider.read(date)?.is_some();
            self.remove(date)?;
            tracing::info!(%date, existed, "entry left empty, removed");
            return Ok(EditOutcome::Removed);
        }
        if self.provider.read(date)?.as_deref() == Some(text) {
            return Ok(EditOutcome::Unchanged);
        }
        self.write(date, text)?;
        tracing::info!(%date, "entry saved");
        Ok(EditOutcome::Saved)
    }

    pub fn select_section(&mut self, section: Option<SectionKey>) {
        self.selection.on_section_changed(&self.index, section);
    }

    pub fn select_tag(&mut self, tag: Option<TagKey>) {
        self.selection.on_tag_changed(tag);
    }

    /// Apply a remembered selection, dropping whatever no longer exists
    pub fn restore_selection(&mut self, section: Option<SectionKey>, tag: Option<TagKey>) {
        self.selection = SelectionState::with_selection(&self.index, section, tag);
    }

    pub fn highlighted_dates(&self) -> Option<&Dates> {
        self.selection.highlighted_dates(&self.index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::repository::InMemoryRepository;
    use crate::model::date::MonthDay;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn journal() -> Journal {
        let repo = InMemoryRepository::with_entries([
            (date(2024, 1, 1), "title\n# work\n* meeting"),
            (date(2024, 1, 2), "title\n# gym\n* legs"),
            (date(2023, 6, 1), "title\n# travel\n* rome"),
        ]);
        Journal::open(Box::new(repo), 2024, true).unwrap()
    }

    #[test]
    fn write_updates_index_and_highlight() {
        let mut j = journal();
        j.select_tag(Some(TagKey::named("meeting")));
        assert_eq!(j.highlighted_dates().map(|d| d.len()), Some(1));

        j.write(date(2024, 2, 1), "title\n# work\n* meeting").unwrap();
        assert_eq!(j.highlighted_dates().map(|d| d.len()), Some(2));
        assert_eq!(j.index().entry_count(), 3);
    }

    #[test]
    fn remove_drops_stale_selection() {
        let mut j = journal();
        j.select_section(Some(SectionKey::named("gym")));
        j.remove(date(2024, 1, 2)).unwrap();
        assert_eq!(j.selection().selected_section(), None);
        assert_eq!(j.highlighted_dates(), None);
    }

    #[test]
    fn year_switch_starts_fresh() {
        let mut j = journal();
        j.select_section(Some(SectionKey::named("work")));
        j.display_year(2023).unwrap();
        assert_eq!(j.year(), 2023);
        assert_eq!(j.selection().selected_section(), None);
        assert!(j.index().contains_section(&SectionKey::named("travel")));
        assert!(!j.index().contains_section(&SectionKey::named("work")));
    }

    #[test]
    fn refresh_keeps_selection() {
        let mut j = journal();
        j.select_section(Some(SectionKey::named("work")));
        j.refresh().unwrap();
        assert_eq!(j.selection().selected_section(), Some(&SectionKey::named("work")));
    }

    #[test]
    fn writes_to_other_years_leave_index_alone() {
        let mut j = journal();
        let before = j.index().clone();
        j.write(date(2022, 1, 1), "title\n* old").unwrap();
        assert_eq!(j.index(), &before);
        assert!(j.read(date(2022, 1, 1)).unwrap().is_some());
    }

    #[test]
    fn untouched_template_is_removed() {
        let mut j = journal();
        let d = date(2024, 3, 5);
        let template = new_entry_template(d);
        assert_eq!(template, "# 05. 03. 2024.\n");

        assert_eq!(j.save_edited(d, &template).unwrap(), EditOutcome::Removed);
        assert!(j.read(d).unwrap().is_none());

        let text = format!("{}# work\n* review\n", template);
        assert_eq!(j.save_edited(d, &text).unwrap(), EditOutcome::Saved);
        assert!(j.index().has_document(MonthDay::of(d)));
        assert_eq!(j.save_edited(d, &text).unwrap(), EditOutcome::Unchanged);

        assert_eq!(j.save_edited(d, "  \n").unwrap(), EditOutcome::Removed);
        assert!(!j.index().has_document(MonthDay::of(d)));
    }

    #[test]
    fn restored_selection_is_reconciled() {
        let mut j = journal();
        j.restore_selection(Some(SectionKey::named("work")), Some(TagKey::named("legs")));
        assert_eq!(j.selection().selected_section(), Some(&SectionKey::named("work")));
        assert_eq!(j.selection().selected_tag(), None);
    }
}
