use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};

use crate::io::repository::{DocumentProvider, RepoError};
use crate::model::date::{Dates, MonthDay, days_of_year};
use crate::model::keys::{SectionKey, TagKey};
use crate::parse::{ParsedEntry, parse_entry};

/// Which dates of one year have entries, and which sections and tags
/// occur on them.
///
/// `tags_by_section[Any]` is the union over every real section, and each
/// section's `AnyOrNone` bucket is the set of dates the section occurred on
/// at all (with or without tags). Apart from `AnyOrNone` buckets, empty
/// date sets are pruned; a section is dropped once its `AnyOrNone` bucket
/// empties. `Any` itself is always present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnualIndex {
    year: i32,
    dates_with_document: Dates,
    tags_by_section: BTreeMap<SectionKey, BTreeMap<TagKey, Dates>>,
}

impl AnnualIndex {
    pub fn empty(year: i32) -> Self {
        let mut tags_by_section = BTreeMap::new();
        tags_by_section.insert(
            SectionKey::Any,
            BTreeMap::from([(TagKey::AnyOrNone, Dates::new())]),
        );
        AnnualIndex {
            year,
            dates_with_document: Dates::new(),
            tags_by_section,
        }
    }

    /// Read and index every day of `year`
    pub fn rebuild_year(
        year: i32,
        provider: &dyn DocumentProvider,
        skip_first_line: bool,
    ) -> Result<Self, RepoError> {
        let mut index = AnnualIndex::empty(year);
        for date in days_of_year(year) {
            if let Some(text) = provider.read(date)? {
                index.fold_document(MonthDay::of(date), &text, skip_first_line);
            }
        }
        tracing::info!(
            year,
            entries = index.entry_count(),
            sections = index.tags_by_section.len() - 1,
            "rebuilt annual index"
        );
        Ok(index)
    }

    /// Bring one date up to date with the provider.
    ///
    /// The document is read before anything is touched, so a failed read
    /// leaves the index as it was. Dates outside the indexed year are ignored.
    pub fn reindex_date(
        &mut self,
        date: NaiveDate,
        provider: &dyn DocumentProvider,
        skip_first_line: bool,
    ) -> Result<(), RepoError> {
        if date.year() != self.year {
            tracing::debug!(%date, year = self.year, "reindex outside indexed year ignored");
            return Ok(());
        }
        let text = provider.read(date)?;
        let day = MonthDay::of(date);
        self.forget(day);
        if let Some(text) = text {
            self.fold_document(day, &text, skip_first_line);
        }
        tracing::debug!(%date, has_entry = self.has_document(day), "reindexed date");
        Ok(())
    }

    fn fold_document(&mut self, day: MonthDay, text: &str, skip_first_line: bool) {
        if text.trim().is_empty() {
            return;
        }
        self.fold(day, &parse_entry(text, skip_first_line));
    }

    /// The single place aggregation happens, shared by rebuild and reindex
    fn fold(&mut self, day: MonthDay, entry: &ParsedEntry) {
        self.dates_with_document.insert(day);
        for (section, tags) in &entry.tags_per_section {
            self.insert(section.clone(), TagKey::AnyOrNone, day);
            self.insert(SectionKey::Any, TagKey::AnyOrNone, day);
            for tag in tags {
                self.insert(section.clone(), TagKey::named(tag), day);
                self.insert(SectionKey::Any, TagKey::named(tag), day);
            }
        }
    }

    fn insert(&mut self, section: SectionKey, tag: TagKey, day: MonthDay) {
        self.tags_by_section
            .entry(section)
            .or_default()
            .entry(tag)
            .or_default()
            .insert(day);
    }

    /// Remove every trace of `day`, pruning what empties
    fn forget(&mut self, day: MonthDay) {
        self.dates_with_document.remove(&day);
        for tags in self.tags_by_section.values_mut() {
            for dates in tags.values_mut() {
                dates.remove(&day);
            }
            tags.retain(|tag, dates| *tag == TagKey::AnyOrNone || !dates.is_empty());
        }
        self.tags_by_section.retain(|section, tags| {
            *section == SectionKey::Any
                || tags
                    .get(&TagKey::AnyOrNone)
                    .is_some_and(|dates| !dates.is_empty())
        });
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn dates_with_document(&self) -> &Dates {
        &self.dates_with_document
    }

    pub fn has_document(&self, day: MonthDay) -> bool {
        self.dates_with_document.contains(&day)
    }

    pub fn entry_count(&self) -> usize {
        self.dates_with_document.len()
    }

    pub fn tags_by_section(&self) -> &BTreeMap<SectionKey, BTreeMap<TagKey, Dates>> {
        &self.tags_by_section
    }

    pub fn dates(&self, section: &SectionKey, tag: &TagKey) -> Option<&Dates> {
        self.tags_by_section.get(section)?.get(tag)
    }

    pub fn contains_section(&self, section: &SectionKey) -> bool {
        section.is_real() && self.tags_by_section.contains_key(section)
    }

    pub fn contains_tag(&self, section: &SectionKey, tag: &TagKey) -> bool {
        matches!(tag, TagKey::Named(_)) && self.dates(section, tag).is_some()
    }

    /// Real sections with the number of dates each occurred on, in key order
    pub fn sections(&self) -> impl Iterator<Item = (&SectionKey, usize)> {
        self.tags_by_section
            .iter()
            .filter(|(section, _)| section.is_real())
            .map(|(section, tags)| {
                let count = tags.get(&TagKey::AnyOrNone).map_or(0, |d| d.len());
                (section, count)
            })
    }

    /// Named tags under `section` with their date counts
    pub fn tags_for<'a>(
        &'a self,
        section: &SectionKey,
    ) -> impl Iterator<Item = (&'a TagKey, usize)> + 'a {
        self.tags_by_section
            .get(section)
            .into_iter()
            .flat_map(|tags| tags.iter())
            .filter(|(tag, _)| matches!(tag, TagKey::Named(_)))
            .map(|(tag, dates)| (tag, dates.len()))
    }
}
