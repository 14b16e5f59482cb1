//! Entry filter/sort pipeline.
//!
//! Everything here is a pure function of its inputs. The dashboard calls
//! [`project`] again whenever the entries, the search term, the category
//! or the favorites toggle change; nothing is cached between calls.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use crate::entry::DecryptedPasswordEntry;

/// Produce the displayable view of `entries`.
///
/// An entry is kept when:
/// - its title, username or category contains `search_term`
///   (case-insensitive; a missing field simply does not match),
/// - `category` is empty or equals the entry's category
///   (case-insensitive),
/// - `favorites_only` is off or the entry is a favorite.
///
/// The result is ordered by title with [`compare_titles`]. The sort is
/// stable, so entries with identical titles keep their relative order.
#[must_use]
pub fn project<'a>(
    entries: &'a [DecryptedPasswordEntry],
    search_term: &str,
    category: &str,
    favorites_only: bool,
) -> Vec<&'a DecryptedPasswordEntry> {
    let needle = search_term.to_lowercase();
    let wanted_category = category.to_lowercase();

    let mut view: Vec<&DecryptedPasswordEntry> = entries
        .iter()
        .filter(|entry| matches_search(entry, &needle))
        .filter(|entry| {
            wanted_category.is_empty()
                || entry
                    .category
                    .as_deref()
                    .is_some_and(|c| c.to_lowercase() == wanted_category)
        })
        .filter(|entry| !favorites_only || entry.favorite)
        .collect();

    view.sort_by(|a, b| compare_titles(&a.title, &b.title));
    view
}

/// Locale-style title ordering.
///
/// Titles compare case-insensitively first; on a tie lowercase sorts
/// before uppercase at the first differing position (`"alpha"` <
/// `"Alpha"` < `"beta"`).
#[must_use]
pub fn compare_titles(a: &str, b: &str) -> Ordering {
    let folded = a
        .chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase));

    folded
        .then_with(|| {
            a.chars()
                .map(char::is_uppercase)
                .cmp(b.chars().map(char::is_uppercase))
        })
        .then_with(|| a.cmp(b))
}

/// Distinct, non-empty categories, deduplicated by exact match and sorted.
#[must_use]
pub fn categories(entries: &[DecryptedPasswordEntry]) -> BTreeSet<String> {
    entries
        .iter()
        .filter_map(|entry| entry.category.as_deref())
        .filter(|category| !category.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Favorite entries in insertion order.
#[must_use]
pub fn favorites(entries: &[DecryptedPasswordEntry]) -> Vec<&DecryptedPasswordEntry> {
    entries.iter().filter(|entry| entry.favorite).collect()
}

fn matches_search(entry: &DecryptedPasswordEntry, needle: &str) -> bool {
    let contains = |field: Option<&str>| field.is_some_and(|v| v.to_lowercase().contains(needle));

    contains(Some(entry.title.as_str()))
        || contains(entry.username.as_deref())
        || contains(entry.category.as_deref())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
