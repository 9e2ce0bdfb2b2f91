//! Normalization shared by the profile records.

use std::collections::HashSet;

/// Drops repeated entries from a set-valued list, keeping first occurrences
/// in order. Entries are compared after trimming.
pub(crate) fn normalize_set(items: &mut Option<Vec<String>>) {
    if let Some(items) = items.as_mut() {
        let mut seen = HashSet::new();
        items.retain(|item| seen.insert(item.trim().to_string()));
    }
}
