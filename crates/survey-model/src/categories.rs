use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One curated catch-all category for free-text "other" answers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryEntry {
    /// Category label as it appears in the curated answers table.
    pub label: String,
    /// Column identifier assigned to this category's boolean flag.
    pub shortcut: String,
}

/// Exact-match table from observed free-text answers to curated
/// categories. Any fuzziness was resolved offline during curation, so
/// lookups here are plain string equality.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtherCategoryMap {
    /// Categories in curated table order; one boolean column each.
    pub categories: Vec<CategoryEntry>,
    /// Category label -> the original answer texts assigned to it.
    pub answers: BTreeMap<String, Vec<String>>,
}

impl OtherCategoryMap {
    /// Whether `answer` was curated into the given category.
    pub fn contains(&self, category: &str, answer: &str) -> bool {
        self.answers
            .get(category)
            .is_some_and(|texts| texts.iter().any(|text| text == answer))
    }

    pub fn shortcuts(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|entry| entry.shortcut.as_str())
    }
}
