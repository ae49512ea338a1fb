use std::path::Path;

use anyhow::{Context, Result, bail};
use tracing::debug;

use survey_model::ColumnGroupMap;

use crate::csv_table::{CsvTable, read_csv_table};

/// Read the raw wide survey export and rename its columns to the data
/// dictionary's identifiers.
///
/// The export's own header row is discarded; the dictionary assigns names
/// by position, so the export must have exactly one column per dictionary
/// entry. A width mismatch means export and dictionary are out of sync,
/// which is a configuration error.
pub fn read_survey_export(path: &Path, map: &ColumnGroupMap) -> Result<CsvTable> {
    let raw = read_csv_table(path).with_context(|| format!("read survey export: {}", path.display()))?;
    if raw.headers.len() != map.column_names.len() {
        bail!(
            "survey export {} has {} columns but the data dictionary names {}",
            path.display(),
            raw.headers.len(),
            map.column_names.len()
        );
    }
    debug!(
        source_file = %path.display(),
        column_count = raw.headers.len(),
        row_count = raw.rows.len(),
        "survey export renamed"
    );
    Ok(CsvTable {
        headers: map.column_names.clone(),
        rows: raw.rows,
    })
}
