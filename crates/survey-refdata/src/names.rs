//! Canonical college name list.

use std::path::Path;

use crate::csv_utils::read_ref_csv;
use crate::error::RefDataError;

/// Load the curated master list of valid college names.
///
/// The list is a single-column CSV (the first column is used whatever its
/// header says); order is preserved, blanks are skipped.
pub fn load_canonical_names(path: &Path) -> Result<Vec<String>, RefDataError> {
    let csv = read_ref_csv(path)?;
    let names: Vec<String> = csv
        .records
        .iter()
        .filter_map(|record| record.get(0))
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(ToString::to_string)
        .collect();
    if names.is_empty() {
        return Err(RefDataError::Csv {
            path: path.to_path_buf(),
            message: "canonical name list is empty".to_string(),
        });
    }
    Ok(names)
}
