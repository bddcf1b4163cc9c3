use std::fmt;

/// First entry of every menu; selecting it clears the selection
pub const SELECT_NONE_LABEL: &str = " ----- ";

/// `" 12 │ work"`: a right-aligned count column followed by the label
pub fn menu_item_title(label: &str, count: usize) -> String {
    format!("{:>3} │ {}", count, label)
}

/// Display texts for a menu with the key each entry selects.
/// Entry 0 is always the select-none entry, keyed `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItems<K> {
    texts: Vec<String>,
    keys: Vec<Option<K>>,
}

impl<K> Default for MenuItems<K> {
    fn default() -> Self {
        MenuItems {
            texts: vec![SELECT_NONE_LABEL.to_string()],
            keys: vec![None],
        }
    }
}

impl<K: PartialEq + fmt::Display> MenuItems<K> {
    /// Build a menu from `(key, count)` pairs, keeping their order
    pub fn from_counts<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, usize)>,
    {
        let mut menu = MenuItems::default();
        for (key, count) in entries {
            menu.texts.push(menu_item_title(&key.to_string(), count));
            menu.keys.push(Some(key));
        }
        menu
    }

    pub fn texts(&self) -> &[String] {
        &self.texts
    }

    pub fn keys(&self) -> &[Option<K>] {
        &self.keys
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Only the select-none entry
    pub fn is_empty(&self) -> bool {
        self.keys.len() <= 1
    }

    pub fn contains(&self, key: &K) -> bool {
        self.keys.iter().flatten().any(|k| k == key)
    }

    /// Row of `key`; `None` finds the select-none entry
    pub fn position(&self, key: Option<&K>) -> Option<usize> {
        self.keys.iter().position(|k| k.as_ref() == key)
    }

    /// What selecting row `idx` means, or `None` when out of range
    pub fn key_at(&self, idx: usize) -> Option<Option<&K>> {
        self.keys.get(idx).map(Option::as_ref)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::keys::{SectionKey, TagKey};
    use pretty_assertions::assert_eq;

    #[test]
    fn title_alignment() {
        assert_eq!(menu_item_title("work", 3), "  3 │ work");
        assert_eq!(menu_item_title("work", 1234), "1234 │ work");
    }

    #[test]
    fn select_none_comes_first() {
        let menu = MenuItems::from_counts([
            (SectionKey::Root, 2),
            (SectionKey::named("work"), 10),
        ]);
        assert_eq!(
            menu.texts(),
            &[
                SELECT_NONE_LABEL.to_string(),
                "  2 │ <no section>".to_string(),
                " 10 │ work".to_string(),
            ]
        );
        assert_eq!(menu.key_at(0), Some(None));
        assert_eq!(menu.key_at(2), Some(Some(&SectionKey::named("work"))));
        assert_eq!(menu.key_at(3), None);
        assert_eq!(menu.len(), 3);
    }

    #[test]
    fn lookup() {
        let menu = MenuItems::from_counts([(TagKey::named("gym"), 4)]);
        assert!(menu.contains(&TagKey::named("gym")));
        assert!(!menu.contains(&TagKey::AnyOrNone));
        assert_eq!(menu.position(None), Some(0));
        assert_eq!(menu.position(Some(&TagKey::named("gym"))), Some(1));
        assert_eq!(menu.position(Some(&TagKey::named("run"))), None);
    }

    #[test]
    fn empty_menu_still_has_select_none() {
        let menu: MenuItems<TagKey> = MenuItems::from_counts([]);
        assert!(menu.is_empty());
        assert_eq!(menu.texts(), &[SELECT_NONE_LABEL.to_string()]);
    }
}
