use std::fmt;

use serde::{Deserialize, Serialize};

/// Menu label used for tags and headings found before any `#` header
pub const ROOT_SECTION_LABEL: &str = "<no section>";
/// Menu label of the cross-section aggregate
pub const ANY_SECTION_LABEL: &str = "<any section>";
/// Menu label of the cross-tag aggregate
pub const ANY_TAG_LABEL: &str = "<any tag>";

/// Normalize a section or tag title: trimmed and lower-cased
pub fn normalize_title(title: &str) -> String {
    title.trim().to_lowercase()
}

/// Key of a section bucket in the annual index.
///
/// Variant order is the menu order: `Any` sorts first (and is never shown),
/// then `Root`, then user titles alphabetically.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "title", rename_all = "lowercase")]
pub enum SectionKey {
    /// Union over every real section
    Any,
    /// Tags that appear before any `#` header
    Root,
    /// A `# title` header (normalized)
    Named(String),
}

impl SectionKey {
    pub fn named(title: &str) -> Self {
        SectionKey::Named(normalize_title(title))
    }

    /// Inverse of [`SectionKey::label`], for keys typed on the command line
    pub fn from_label(label: &str) -> Self {
        match label.trim() {
            ROOT_SECTION_LABEL => SectionKey::Root,
            ANY_SECTION_LABEL => SectionKey::Any,
            other => SectionKey::named(other),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            SectionKey::Any => ANY_SECTION_LABEL,
            SectionKey::Root => ROOT_SECTION_LABEL,
            SectionKey::Named(title) => title,
        }
    }

    /// True for user-declared sections and `Root`
    pub fn is_real(&self) -> bool {
        !matches!(self, SectionKey::Any)
    }
}

impl fmt::Display for SectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Key of a tag bucket within a section
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "title", rename_all = "lowercase")]
pub enum TagKey {
    /// Every date the section occurred on, no tag filter
    AnyOrNone,
    /// A `* title` tag (normalized)
    Named(String),
}

impl TagKey {
    pub fn named(title: &str) -> Self {
        TagKey::Named(normalize_title(title))
    }

    pub fn from_label(label: &str) -> Self {
        match label.trim() {
            ANY_TAG_LABEL => TagKey::AnyOrNone,
            other => TagKey::named(other),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            TagKey::AnyOrNone => ANY_TAG_LABEL,
            TagKey::Named(title) => title,
        }
    }
}

impl fmt::Display for TagKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn titles_fold_case_and_whitespace() {
        assert_eq!(TagKey::named("Tag "), TagKey::named("tag"));
        assert_eq!(SectionKey::named("  Work Notes"), SectionKey::Named("work notes".into()));
    }

    #[test]
    fn section_order_puts_aggregate_then_root_first() {
        let mut keys = vec![
            SectionKey::named("zeta"),
            SectionKey::Root,
            SectionKey::named("alpha"),
            SectionKey::Any,
        ];
        keys.sort();
        assert_eq!(
            keys,
            vec![
                SectionKey::Any,
                SectionKey::Root,
                SectionKey::named("alpha"),
                SectionKey::named("zeta"),
            ]
        );
    }

    #[test]
    fn labels_round_trip() {
        for key in [SectionKey::Root, SectionKey::Any, SectionKey::named("work")] {
            assert_eq!(SectionKey::from_label(key.label()), key);
        }
        for key in [TagKey::AnyOrNone, TagKey::named("gym")] {
            assert_eq!(TagKey::from_label(key.label()), key);
        }
    }

    #[test]
    fn keys_serialize_as_tagged_unions() {
        let json = serde_json::to_string(&SectionKey::named("Work")).unwrap();
        assert_eq!(json, r#"{"kind":"named","title":"work"}"#);
        let root: SectionKey = serde_json::from_str(r#"{"kind":"root"}"#).unwrap();
        assert_eq!(root, SectionKey::Root);
    }
}
