//! Shared CSV helpers for loading curated reference tables.

use std::path::Path;

use csv::StringRecord;

use crate::error::RefDataError;

/// Parsed reference CSV: header record plus data records, BOM-stripped.
pub(crate) struct RefCsv {
    pub headers: StringRecord,
    pub records: Vec<StringRecord>,
}

pub(crate) fn read_ref_csv(path: &Path) -> Result<RefCsv, RefDataError> {
    let bytes = std::fs::read(path).map_err(|e| RefDataError::io(path, e))?;
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes.as_slice());
    let headers = reader
        .headers()
        .map_err(|e| RefDataError::csv(path, &e))?
        .iter()
        .map(|h| h.trim().trim_matches('\u{feff}'))
        .collect();
    let mut records = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| RefDataError::csv(path, &e))?;
        records.push(record);
    }
    Ok(RefCsv { headers, records })
}

pub(crate) fn header_index(
    headers: &StringRecord,
    path: &Path,
    name: &str,
) -> Result<usize, RefDataError> {
    headers
        .iter()
        .position(|h| h == name)
        .ok_or_else(|| RefDataError::MissingColumn {
            path: path.to_path_buf(),
            column: name.to_string(),
        })
}

/// Trimmed cell value, `None` when missing or empty.
pub(crate) fn get_string(row: &StringRecord, idx: usize) -> Option<String> {
    row.get(idx)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
}

/// Required trimmed cell value.
pub(crate) fn require_string(
    row: &StringRecord,
    idx: usize,
    path: &Path,
    row_number: usize,
    column: &str,
) -> Result<String, RefDataError> {
    get_string(row, idx).ok_or_else(|| RefDataError::InvalidRow {
        path: path.to_path_buf(),
        row: row_number,
        message: format!("missing value for '{column}'"),
    })
}

pub(crate) fn parse_bool(
    value: &str,
    path: &Path,
    row_number: usize,
    column: &str,
) -> Result<bool, RefDataError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        other => Err(RefDataError::InvalidRow {
            path: path.to_path_buf(),
            row: row_number,
            message: format!("cannot parse '{other}' as a boolean for '{column}'"),
        }),
    }
}
