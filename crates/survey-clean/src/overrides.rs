//! Override-chain resolution for the human-correction merge.

use std::collections::BTreeMap;

use anyhow::Result;
use tracing::{debug, warn};

use survey_ingest::{CsvTable, non_empty};
use survey_model::{MatchCorrection, NameMatch};

use crate::error::CleanError;

/// Pick the value in effect from a priority-ordered chain.
///
/// Candidates are ordered weakest first (base value, then the computed
/// candidate, then the human override); the last present value wins.
pub fn resolve_override<'a>(chain: &[Option<&'a str>]) -> Option<&'a str> {
    chain.iter().rev().find_map(|candidate| *candidate)
}

/// Merge the reviewed match table back into the record table.
///
/// Identity-join by the `index` column. Per record the name resolves
/// through original -> match candidate -> reviewer's revision, and the
/// location through original -> reviewer's revision. When the curated
/// file has no row for a record, this run's computed match stands in for
/// the candidate.
pub fn apply_match_corrections(
    table: &CsvTable,
    matches: &[NameMatch],
    corrections: &[MatchCorrection],
) -> Result<CsvTable> {
    let index_col = table.require_column("index")?;
    let name_col = table.require_column("name")?;
    let location_col = table.require_column("location")?;

    let match_by_index: BTreeMap<usize, &NameMatch> =
        matches.iter().map(|entry| (entry.index, entry)).collect();
    let mut correction_by_index: BTreeMap<usize, &MatchCorrection> = BTreeMap::new();
    for correction in corrections {
        if correction_by_index.insert(correction.index, correction).is_some() {
            return Err(CleanError::DuplicateCorrection {
                index: correction.index,
            }
            .into());
        }
    }
    for index in correction_by_index.keys() {
        if !match_by_index.contains_key(index) {
            warn!(index = *index, "correction row has no matching record; ignored");
        }
    }

    let mut output = CsvTable::new(table.headers.clone());
    let mut revised_names = 0usize;
    for (row_idx, row) in table.rows.iter().enumerate() {
        let raw_index = table.value(row_idx, index_col);
        let index: usize = raw_index.parse().map_err(|_| CleanError::BadIndex {
            row: row_idx,
            value: raw_index.to_string(),
        })?;

        let original_name = non_empty(table.value(row_idx, name_col));
        let original_location = non_empty(table.value(row_idx, location_col));
        let correction = correction_by_index.get(&index);

        let candidate = match correction {
            Some(correction) => non_empty(&correction.matched),
            None => match_by_index
                .get(&index)
                .map(|entry| entry.matched.as_str())
                .and_then(non_empty),
        };
        let name_revised = correction.and_then(|c| c.name_revised.as_deref());
        let location_revised = correction.and_then(|c| c.location_revised.as_deref());
        if name_revised.is_some() {
            revised_names += 1;
        }

        let name = resolve_override(&[original_name, candidate, name_revised]);
        let location = resolve_override(&[original_location, location_revised]);

        let mut cells = row.clone();
        cells[name_col] = name.unwrap_or_default().to_string();
        cells[location_col] = location.unwrap_or_default().to_string();
        output.push_row(cells);
    }

    debug!(
        record_count = output.row_count(),
        correction_count = corrections.len(),
        revised_names,
        "match corrections merged"
    );
    Ok(output)
}

/// Distinct (name, location) pairs for the second review round, sorted
/// by name then location.
pub fn names_locations(table: &CsvTable) -> Result<Vec<(String, String)>> {
    let name_col = table.require_column("name")?;
    let location_col = table.require_column("location")?;

    let mut pairs: Vec<(String, String)> = Vec::new();
    for row in 0..table.row_count() {
        let pair = (
            table.value(row, name_col).to_string(),
            table.value(row, location_col).to_string(),
        );
        if !pairs.contains(&pair) {
            pairs.push(pair);
        }
    }
    pairs.sort();
    Ok(pairs)
}

/// Review table for the second curation round.
pub fn names_locations_table(pairs: &[(String, String)]) -> CsvTable {
    let mut table = CsvTable::new(
        ["name_choice", "location_choice", "final_name"]
            .iter()
            .map(ToString::to_string)
            .collect(),
    );
    for (name, location) in pairs {
        table.push_row(vec![name.clone(), location.clone(), String::new()]);
    }
    table
}
