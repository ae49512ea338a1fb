//! Option reference loader and scan-invariant validation.

use std::collections::BTreeMap;
use std::path::Path;
use std::str::FromStr;

use survey_model::{InfoType, OptionEntry, OptionSet};

use crate::csv_utils::{header_index, read_ref_csv, require_string};
use crate::error::RefDataError;

/// Load the per-info-type option lists, preserving table order.
///
/// No invariant checking happens here; call [`validate_option_sets`]
/// (the doctor does) or [`load_validated_option_sets`] (the pipeline
/// does) to enforce the scan invariants.
pub fn load_option_sets(path: &Path) -> Result<BTreeMap<InfoType, OptionSet>, RefDataError> {
    let csv = read_ref_csv(path)?;
    let idx_info = header_index(&csv.headers, path, "info_type")?;
    let idx_option = header_index(&csv.headers, path, "option")?;
    let idx_shortcut = header_index(&csv.headers, path, "shortcut")?;
    let idx_uss = header_index(&csv.headers, path, "unique_starting_substring")?;

    let mut sets: BTreeMap<InfoType, OptionSet> = BTreeMap::new();
    for (row_number, record) in csv.records.iter().enumerate() {
        let row = row_number + 2;
        let info_raw = require_string(record, idx_info, path, row, "info_type")?;
        let info_type = InfoType::from_str(&info_raw).map_err(|error| RefDataError::InvalidRow {
            path: path.to_path_buf(),
            row,
            message: error.to_string(),
        })?;
        let entry = OptionEntry {
            label: require_string(record, idx_option, path, row, "option")?,
            shortcut: require_string(record, idx_shortcut, path, row, "shortcut")?,
            uss: require_string(record, idx_uss, path, row, "unique_starting_substring")?,
        };
        sets.entry(info_type)
            .or_insert_with(|| OptionSet::new(info_type))
            .entries
            .push(entry);
    }
    Ok(sets)
}

/// Collect invariant violations across all option sets.
pub fn validate_option_sets(sets: &BTreeMap<InfoType, OptionSet>) -> Vec<String> {
    sets.values()
        .flat_map(|set| set.invariant_violations())
        .collect()
}

/// Load the option reference and fail on any invariant violation.
pub fn load_validated_option_sets(
    path: &Path,
) -> Result<BTreeMap<InfoType, OptionSet>, RefDataError> {
    let sets = load_option_sets(path)?;
    let violations = validate_option_sets(&sets);
    if violations.is_empty() {
        Ok(sets)
    } else {
        Err(RefDataError::OptionInvariant {
            path: path.to_path_buf(),
            violations,
        })
    }
}
