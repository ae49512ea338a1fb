//! Final name rewrites and the college dimension split.

use std::collections::BTreeMap;
use std::str::FromStr;

use anyhow::Result;
use tracing::debug;

use survey_ingest::{CsvTable, non_empty};
use survey_model::{College, CollegeType, FinalNameCorrection};

use crate::error::CleanError;

/// A record whose name was rewritten in the final round, kept for the
/// change report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangedName {
    pub index: usize,
    pub name: String,
    pub orig_name: String,
}

/// Apply the final-name corrections and strip location boilerplate.
///
/// Every record whose name equals a curated `name_choice` is rewritten to
/// the curated final name; the change report lists each rewritten record
/// with both spellings.
pub fn apply_final_names(
    table: &CsvTable,
    corrections: &[FinalNameCorrection],
    strip_prefixes: &[String],
) -> Result<(CsvTable, Vec<ChangedName>)> {
    let index_col = table.require_column("index")?;
    let name_col = table.require_column("name")?;
    let location_col = table.require_column("location")?;

    let mut final_by_name: BTreeMap<&str, &str> = BTreeMap::new();
    for correction in corrections {
        if final_by_name
            .insert(correction.name.as_str(), correction.final_name.as_str())
            .is_some()
        {
            return Err(CleanError::DuplicateFinalName {
                name: correction.name.clone(),
            }
            .into());
        }
    }

    let mut output = CsvTable::new(table.headers.clone());
    let mut changed = Vec::new();
    for (row_idx, row) in table.rows.iter().enumerate() {
        let mut cells = row.clone();
        let name = table.value(row_idx, name_col);
        if let Some(final_name) = final_by_name.get(name) {
            let raw_index = table.value(row_idx, index_col);
            let index: usize = raw_index.parse().map_err(|_| CleanError::BadIndex {
                row: row_idx,
                value: raw_index.to_string(),
            })?;
            changed.push(ChangedName {
                index,
                name: (*final_name).to_string(),
                orig_name: name.to_string(),
            });
            cells[name_col] = (*final_name).to_string();
        }
        let mut location = cells[location_col].clone();
        for prefix in strip_prefixes {
            location = location.replace(prefix, "");
        }
        cells[location_col] = location;
        output.push_row(cells);
    }

    debug!(
        record_count = output.row_count(),
        changed_count = changed.len(),
        "final names applied"
    );
    Ok((output, changed))
}

/// Change report table (`index`, `name`, `orig_name`).
pub fn changed_names_table(changed: &[ChangedName]) -> CsvTable {
    let mut table = CsvTable::new(
        ["index", "name", "orig_name"]
            .iter()
            .map(ToString::to_string)
            .collect(),
    );
    for entry in changed {
        table.push_row(vec![
            entry.index.to_string(),
            entry.name.clone(),
            entry.orig_name.clone(),
        ]);
    }
    table
}

/// Distinct names of the cleaned table, sorted, for the last manual check.
pub fn distinct_names(table: &CsvTable) -> Result<Vec<String>> {
    let name_col = table.require_column("name")?;
    let mut names: Vec<String> = Vec::new();
    for value in table.column_values(name_col) {
        if !names.iter().any(|name| name == value) {
            names.push(value.to_string());
        }
    }
    names.sort();
    Ok(names)
}

/// Single-column table of distinct names.
pub fn distinct_names_table(names: &[String]) -> CsvTable {
    let mut table = CsvTable::new(vec!["name".to_string()]);
    for name in names {
        table.push_row(vec![name.clone()]);
    }
    table
}

/// The dimension table and the fact table it was split from.
#[derive(Debug, Clone)]
pub struct CollegeSplit {
    pub colleges: Vec<College>,
    pub fact: CsvTable,
}

/// Project the college dimension out of the cleaned table.
///
/// Keeps the first occurrence of each name. Two records sharing a name
/// but disagreeing on location or college type mean the upstream name
/// normalization is unresolved; that is a hard stop, never a
/// tie-break.
pub fn build_college_dimension(table: &CsvTable) -> Result<CollegeSplit> {
    let name_col = table.require_column("name")?;
    let location_col = table.require_column("location")?;
    let type_col = table.require_column("college_type")?;

    let mut colleges: Vec<College> = Vec::new();
    let mut conflicts: Vec<String> = Vec::new();
    for row in 0..table.row_count() {
        let name = table.value(row, name_col).to_string();
        let location = non_empty(table.value(row, location_col)).map(ToString::to_string);
        let raw_type = table.value(row, type_col);
        let college_type =
            CollegeType::from_str(raw_type).map_err(|error| CleanError::InvalidValue {
                row,
                column: "college_type".to_string(),
                message: error.to_string(),
            })?;

        match colleges.iter().find(|college| college.name == name) {
            None => colleges.push(College {
                name,
                location,
                college_type,
            }),
            Some(existing) => {
                if (existing.location != location || existing.college_type != college_type)
                    && !conflicts.contains(&name)
                {
                    conflicts.push(name);
                }
            }
        }
    }

    if !conflicts.is_empty() {
        return Err(CleanError::InconsistentColleges { names: conflicts }.into());
    }

    let fact = table.drop_columns(&["location", "college_type"]);
    debug!(
        college_count = colleges.len(),
        fact_rows = fact.row_count(),
        "college dimension built"
    );
    Ok(CollegeSplit { colleges, fact })
}

/// Serialize the dimension table.
pub fn colleges_table(colleges: &[College]) -> CsvTable {
    let mut table = CsvTable::new(
        ["name", "location", "college_type"]
            .iter()
            .map(ToString::to_string)
            .collect(),
    );
    for college in colleges {
        table.push_row(vec![
            college.name.clone(),
            college.location.clone().unwrap_or_default(),
            college.college_type.to_string(),
        ]);
    }
    table
}
