//! Curated "other"-answer category tables.

use std::collections::BTreeMap;
use std::path::Path;

use survey_model::{CategoryEntry, OtherCategoryMap};

use crate::csv_utils::{header_index, parse_bool, read_ref_csv, require_string};
use crate::error::RefDataError;

/// Load the catch-all categories and their curated answer assignments.
///
/// `other_options_path` is the option table extended with an `is_other`
/// flag; the flagged rows are the categories. `answers_path` maps each
/// observed free-text answer to the category a curator chose for it.
pub fn load_other_categories(
    other_options_path: &Path,
    answers_path: &Path,
) -> Result<OtherCategoryMap, RefDataError> {
    let categories = load_categories(other_options_path)?;
    let answers = load_answers(answers_path)?;
    Ok(OtherCategoryMap {
        categories,
        answers,
    })
}

fn load_categories(path: &Path) -> Result<Vec<CategoryEntry>, RefDataError> {
    let csv = read_ref_csv(path)?;
    let idx_option = header_index(&csv.headers, path, "option")?;
    let idx_shortcut = header_index(&csv.headers, path, "shortcut")?;
    let idx_is_other = header_index(&csv.headers, path, "is_other")?;

    let mut categories = Vec::new();
    for (row_number, record) in csv.records.iter().enumerate() {
        let row = row_number + 2;
        let raw_flag = require_string(record, idx_is_other, path, row, "is_other")?;
        if !parse_bool(&raw_flag, path, row, "is_other")? {
            continue;
        }
        categories.push(CategoryEntry {
            label: require_string(record, idx_option, path, row, "option")?,
            shortcut: require_string(record, idx_shortcut, path, row, "shortcut")?,
        });
    }
    Ok(categories)
}

fn load_answers(path: &Path) -> Result<BTreeMap<String, Vec<String>>, RefDataError> {
    let csv = read_ref_csv(path)?;
    let idx_category = header_index(&csv.headers, path, "category")?;
    let idx_text = header_index(&csv.headers, path, "orig_text")?;

    let mut answers: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for (row_number, record) in csv.records.iter().enumerate() {
        let row = row_number + 2;
        let category = require_string(record, idx_category, path, row, "category")?;
        let text = require_string(record, idx_text, path, row, "orig_text")?;
        answers.entry(category).or_default().push(text);
    }
    Ok(answers)
}

/// Curated answers whose category is not in the category list.
/// These can never match and usually mean a typo in the curation file.
pub fn orphaned_answer_categories(map: &OtherCategoryMap) -> Vec<String> {
    map.answers
        .keys()
        .filter(|category| !map.categories.iter().any(|entry| &entry.label == *category))
        .cloned()
        .collect()
}
