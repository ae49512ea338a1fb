//! Other-category classifier: curated exact-match lookup of leftover text.

use anyhow::Result;
use tracing::debug;

use survey_ingest::CsvTable;
use survey_model::OtherCategoryMap;

use crate::error::CleanError;
use crate::expand::bool_str;

/// Re-map a leftover column onto the curated category flags.
///
/// For every record and category: flag = the leftover text appears,
/// verbatim, in that category's curated answer list. Missing leftover
/// means every flag is false. The consumed leftover column is dropped;
/// the category columns are appended in curated order.
///
/// This is exact matching on purpose: any fuzziness was resolved by the
/// curator offline, so an unmatched answer here means the curation file
/// is incomplete, not that the lookup should guess.
pub fn apply_other_categories(
    table: &CsvTable,
    map: &OtherCategoryMap,
    source_column: &str,
) -> Result<CsvTable> {
    let source_col = table.require_column(source_column)?;
    for entry in &map.categories {
        if table.column_index(&entry.shortcut).is_some() {
            return Err(CleanError::DuplicateColumn {
                column: entry.shortcut.clone(),
            }
            .into());
        }
    }

    let mut headers: Vec<String> = table
        .headers
        .iter()
        .filter(|header| header.as_str() != source_column)
        .cloned()
        .collect();
    headers.extend(map.categories.iter().map(|entry| entry.shortcut.clone()));

    let mut output = CsvTable::new(headers);
    let mut matched_answers = 0usize;
    for (row_idx, row) in table.rows.iter().enumerate() {
        let answer = table.value(row_idx, source_col);
        let mut cells: Vec<String> = row
            .iter()
            .enumerate()
            .filter(|(idx, _)| *idx != source_col)
            .map(|(_, value)| value.clone())
            .collect();
        for entry in &map.categories {
            let flag = !answer.is_empty() && map.contains(&entry.label, answer);
            if flag {
                matched_answers += 1;
            }
            cells.push(bool_str(flag).to_string());
        }
        output.push_row(cells);
    }

    debug!(
        source_column,
        category_count = map.categories.len(),
        matched_answers,
        "other answers categorized"
    );
    Ok(output)
}

/// Whether a column holds no data at all.
pub fn column_is_empty(table: &CsvTable, column: &str) -> Result<bool> {
    let col = table.require_column(column)?;
    Ok(table.column_values(col).all(str::is_empty))
}
