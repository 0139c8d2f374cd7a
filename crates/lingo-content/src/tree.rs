//! Category tree resolution.
//!
//! Corpora are small and lookups only happen on navigation events, so the
//! resolver scans in declaration order instead of maintaining an index.

use crate::model::{Category, Entry};

/// An entry together with the category that owns it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EntryRef<'a> {
    pub category: &'a Category,
    pub entry: &'a Entry,
}

/// An entry in flattened sidebar order.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlatEntry<'a> {
    pub entry: &'a Entry,
    pub category_label: &'a str,
}

/// Neighbours of an entry in flattened order.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Adjacent<'a> {
    pub previous: Option<FlatEntry<'a>>,
    pub next: Option<FlatEntry<'a>>,
}

/// Find the first entry with `entry_id`, scanning categories then entries in order.
///
/// Returns `None` for unknown ids; callers show an empty state.
#[must_use]
pub fn find_entry_by_id<'a>(categories: &'a [Category], entry_id: &str) -> Option<EntryRef<'a>> {
    categories.iter().find_map(|category| {
        category
            .entries
            .iter()
            .find(|entry| entry.id == entry_id)
            .map(|entry| EntryRef { category, entry })
    })
}

/// Flatten the tree into category-then-entry order.
#[must_use]
pub fn flatten_entries(categories: &[Category]) -> Vec<FlatEntry<'_>> {
    categories
        .iter()
        .flat_map(|category| {
            category.entries.iter().map(|entry| FlatEntry {
                entry,
                category_label: &category.label,
            })
        })
        .collect()
}

/// Previous and next entries around `entry_id`.
///
/// There is no wraparound: the first entry has no previous, the last has no
/// next. An unknown id has neither.
#[must_use]
pub fn adjacent_entries<'a>(categories: &'a [Category], entry_id: &str) -> Adjacent<'a> {
    let flat = flatten_entries(categories);
    let Some(pos) = flat.iter().position(|f| f.entry.id == entry_id) else {
        return Adjacent::default();
    };

    Adjacent {
        previous: pos.checked_sub(1).map(|i| flat[i]),
        next: flat.get(pos + 1).copied(),
    }
}
