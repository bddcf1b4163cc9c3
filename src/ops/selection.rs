use crate::model::date::Dates;
use crate::model::keys::{SectionKey, TagKey};
use crate::ops::annual_index::AnnualIndex;
use crate::ops::menu::MenuItems;

static NO_DATES: Dates = Dates::new();

/// The section/tag filter shown next to the calendar.
///
/// `None` selections are the menus' select-none entry. The highlighted date
/// set is kept as a key into the index and borrowed on demand, never copied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionState {
    selected_section: Option<SectionKey>,
    selected_tag: Option<TagKey>,
    section_menu: MenuItems<SectionKey>,
    tag_menu: MenuItems<TagKey>,
    highlight: Option<(SectionKey, TagKey)>,
}

impl SelectionState {
    /// Nothing selected, menus built from `index`
    pub fn new(index: &AnnualIndex) -> Self {
        Self::with_selection(index, None, None)
    }

    /// Start from a remembered selection; whatever no longer exists in
    /// `index` is dropped.
    pub fn with_selection(
        index: &AnnualIndex,
        section: Option<SectionKey>,
        tag: Option<TagKey>,
    ) -> Self {
        let mut state = SelectionState {
            selected_section: section,
            selected_tag: tag,
            section_menu: MenuItems::default(),
            tag_menu: MenuItems::default(),
            highlight: None,
        };
        state.reconcile(index);
        state
    }

    /// Rebuild menus and highlight after `index` changed, keeping the
    /// selection where it is still valid.
    pub fn reconcile(&mut self, index: &AnnualIndex) {
        self.section_menu = section_menu(index);
        if self
            .selected_section
            .as_ref()
            .is_some_and(|s| !index.contains_section(s))
        {
            tracing::debug!(section = ?self.selected_section, "selected section no longer exists");
            self.selected_section = None;
        }

        self.tag_menu = tag_menu(index, self.tag_scope());
        if self
            .selected_tag
            .as_ref()
            .is_some_and(|t| !index.contains_tag(self.tag_scope(), t))
        {
            tracing::debug!(tag = ?self.selected_tag, "selected tag no longer exists in scope");
            self.selected_tag = None;
        }

        self.update_highlight();
    }

    /// The user picked a section. The tag choice is always cleared since it
    /// may not exist in the new scope.
    pub fn on_section_changed(&mut self, index: &AnnualIndex, section: Option<SectionKey>) {
        self.selected_section = section;
        self.selected_tag = None;
        self.tag_menu = tag_menu(index, self.tag_scope());
        self.update_highlight();
    }

    /// The user picked a tag. Menus stay as they are.
    pub fn on_tag_changed(&mut self, tag: Option<TagKey>) {
        self.selected_tag = tag;
        self.update_highlight();
    }

    /// Set the section without touching anything else; the next
    /// `reconcile` drops it if it is not in the index.
    pub fn set_selected_section(&mut self, section: Option<SectionKey>) {
        self.selected_section = section;
    }

    /// Set the tag without touching anything else, like `set_selected_section`
    pub fn set_selected_tag(&mut self, tag: Option<TagKey>) {
        self.selected_tag = tag;
    }

    pub fn selected_section(&self) -> Option<&SectionKey> {
        self.selected_section.as_ref()
    }

    pub fn selected_tag(&self) -> Option<&TagKey> {
        self.selected_tag.as_ref()
    }

    pub fn section_menu(&self) -> &MenuItems<SectionKey> {
        &self.section_menu
    }

    pub fn tag_menu(&self) -> &MenuItems<TagKey> {
        &self.tag_menu
    }

    /// The `(section, tag)` bucket being highlighted, if any
    pub fn highlight_key(&self) -> Option<(&SectionKey, &TagKey)> {
        self.highlight.as_ref().map(|(s, t)| (s, t))
    }

    /// Dates to highlight, borrowed from `index`. `None` means no filter; an
    /// active filter whose bucket is missing (not yet reconciled) matches
    /// nothing.
    pub fn highlighted_dates<'a>(&self, index: &'a AnnualIndex) -> Option<&'a Dates> {
        let (section, tag) = self.highlight.as_ref()?;
        Some(index.dates(section, tag).unwrap_or(&NO_DATES))
    }

    fn tag_scope(&self) -> &SectionKey {
        self.selected_section.as_ref().unwrap_or(&SectionKey::Any)
    }

    fn update_highlight(&mut self) {
        self.highlight = match (&self.selected_section, &self.selected_tag) {
            (None, None) => None,
            (section, tag) => Some((
                section.clone().unwrap_or(SectionKey::Any),
                tag.clone().unwrap_or(TagKey::AnyOrNone),
            )),
        };
    }
}

fn section_menu(index: &AnnualIndex) -> MenuItems<SectionKey> {
    MenuItems::from_counts(index.sections().map(|(s, n)| (s.clone(), n)))
}

fn tag_menu(index: &AnnualIndex, scope: &SectionKey) -> MenuItems<TagKey> {
    MenuItems::from_counts(index.tags_for(scope).map(|(t, n)| (t.clone(), n)))
}
