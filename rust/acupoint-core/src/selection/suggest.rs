//! Type-ahead suggestions for the multi-select dropdowns

use serde::{Deserialize, Serialize};

use crate::selection::set::SelectionSet;

/// One dropdown entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub item: String,
    /// Already in the selection set (rendered highlighted)
    pub selected: bool,
}

/// Vocabulary entries containing `query` case-insensitively, in vocabulary order.
///
/// An empty query matches everything. An empty result means "No matches found".
pub fn suggest(query: &str, vocabulary: &[String], selection: &SelectionSet) -> Vec<Suggestion> {
    let needle = query.to_lowercase();

    vocabulary
        .iter()
        .filter(|item| item.to_lowercase().contains(&needle))
        .map(|item| Suggestion {
            item: item.clone(),
            selected: selection.contains(item),
        })
        .collect()
}
