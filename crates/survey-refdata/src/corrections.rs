//! Human-curated correction tables, re-ingested between pipeline stages.

use std::path::Path;

use survey_model::{FinalNameCorrection, MatchCorrection};

use crate::csv_utils::{get_string, header_index, read_ref_csv};
use crate::error::RefDataError;

/// Load the reviewed name-match table (round one).
///
/// Expected columns: `index`, `match`, `name_revised`, `location_revised`.
/// The revised columns are only filled where the reviewer overrode the
/// candidate.
pub fn load_match_corrections(path: &Path) -> Result<Vec<MatchCorrection>, RefDataError> {
    let csv = read_ref_csv(path)?;
    let idx_index = header_index(&csv.headers, path, "index")?;
    let idx_match = header_index(&csv.headers, path, "match")?;
    let idx_name = header_index(&csv.headers, path, "name_revised")?;
    let idx_location = header_index(&csv.headers, path, "location_revised")?;

    let mut corrections = Vec::with_capacity(csv.records.len());
    for (row_number, record) in csv.records.iter().enumerate() {
        let row = row_number + 2;
        let raw_index =
            get_string(record, idx_index).ok_or_else(|| RefDataError::InvalidRow {
                path: path.to_path_buf(),
                row,
                message: "missing value for 'index'".to_string(),
            })?;
        let index: usize = raw_index.parse().map_err(|_| RefDataError::InvalidRow {
            path: path.to_path_buf(),
            row,
            message: format!("cannot parse '{raw_index}' as a row index"),
        })?;
        corrections.push(MatchCorrection {
            index,
            matched: get_string(record, idx_match).unwrap_or_default(),
            name_revised: get_string(record, idx_name),
            location_revised: get_string(record, idx_location),
        });
    }
    Ok(corrections)
}

/// Load the final-name table (round two), keeping only rows the curator
/// gave a final name.
///
/// Expected columns: `name_choice`, `final_name`.
pub fn load_final_name_corrections(
    path: &Path,
) -> Result<Vec<FinalNameCorrection>, RefDataError> {
    let csv = read_ref_csv(path)?;
    let idx_name = header_index(&csv.headers, path, "name_choice")?;
    let idx_final = header_index(&csv.headers, path, "final_name")?;

    let mut corrections = Vec::new();
    for (row_number, record) in csv.records.iter().enumerate() {
        let row = row_number + 2;
        let Some(final_name) = get_string(record, idx_final) else {
            continue;
        };
        let name = get_string(record, idx_name).ok_or_else(|| RefDataError::InvalidRow {
            path: path.to_path_buf(),
            row,
            message: "final name given but 'name_choice' is empty".to_string(),
        })?;
        corrections.push(FinalNameCorrection { name, final_name });
    }
    Ok(corrections)
}
