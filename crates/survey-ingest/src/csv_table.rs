use std::path::Path;

use anyhow::{Context, Result, bail};
use csv::{ReaderBuilder, WriterBuilder};

/// In-memory delimited table: a header row plus string cells.
///
/// The empty string is the missing value. Every pipeline stage reads one
/// of these from disk and writes a new one; tables are never edited in
/// place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CsvTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    let mut parts = trimmed.split_whitespace();
    let mut normalized = String::new();
    if let Some(first) = parts.next() {
        normalized.push_str(first);
        for part in parts {
            normalized.push(' ');
            normalized.push_str(part);
        }
    }
    normalized
}

fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

/// Turn an empty cell into `None`.
pub fn non_empty(value: &str) -> Option<&str> {
    if value.is_empty() { None } else { Some(value) }
}

impl CsvTable {
    pub fn new(headers: Vec<String>) -> Self {
        Self {
            headers,
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Vec<String>) {
        debug_assert_eq!(row.len(), self.headers.len());
        self.rows.push(row);
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|header| header == name)
    }

    /// Index of a column that must be present.
    pub fn require_column(&self, name: &str) -> Result<usize> {
        self.column_index(name)
            .with_context(|| format!("missing column '{name}'"))
    }

    /// Cell value at (row, column index); out-of-range reads are missing.
    pub fn value(&self, row: usize, col: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|cells| cells.get(col))
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Cell value addressed by column name.
    pub fn cell(&self, row: usize, name: &str) -> Option<&str> {
        let col = self.column_index(name)?;
        Some(self.value(row, col))
    }

    /// A whole column as string slices, empty string for missing cells.
    pub fn column_values(&self, col: usize) -> impl Iterator<Item = &str> {
        (0..self.rows.len()).map(move |row| self.value(row, col))
    }

    /// Copy of this table without the named columns, preserving order.
    pub fn drop_columns(&self, names: &[&str]) -> CsvTable {
        let keep: Vec<usize> = self
            .headers
            .iter()
            .enumerate()
            .filter(|(_, header)| !names.contains(&header.as_str()))
            .map(|(idx, _)| idx)
            .collect();
        let headers = keep.iter().map(|&idx| self.headers[idx].clone()).collect();
        let rows = self
            .rows
            .iter()
            .map(|row| {
                keep.iter()
                    .map(|&idx| row.get(idx).cloned().unwrap_or_default())
                    .collect()
            })
            .collect();
        CsvTable { headers, rows }
    }
}

/// Read a delimited file into a [`CsvTable`].
///
/// The first non-empty row is the header. Cells are trimmed and
/// BOM-stripped; fully empty rows are skipped; short rows are padded to
/// the header width.
pub fn read_csv_table(path: &Path) -> Result<CsvTable> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("read csv: {}", path.display()))?;
    let mut raw_rows: Vec<Vec<String>> = Vec::new();
    for record in reader.records() {
        let record = record.with_context(|| format!("read record: {}", path.display()))?;
        let row: Vec<String> = record.iter().map(normalize_cell).collect();
        if row.iter().all(|value| value.is_empty()) {
            continue;
        }
        raw_rows.push(row);
    }
    if raw_rows.is_empty() {
        return Ok(CsvTable::default());
    }
    let headers: Vec<String> = raw_rows[0].iter().map(|value| normalize_header(value)).collect();
    let mut rows = Vec::with_capacity(raw_rows.len() - 1);
    for record in raw_rows.iter().skip(1) {
        let mut row = Vec::with_capacity(headers.len());
        for idx in 0..headers.len() {
            let value = record.get(idx).map(String::as_str).unwrap_or("");
            row.push(value.to_string());
        }
        rows.push(row);
    }
    Ok(CsvTable { headers, rows })
}

/// Write a [`CsvTable`] to disk, creating parent directories as needed.
pub fn write_csv_table(path: &Path, table: &CsvTable) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir: {}", parent.display()))?;
    }
    let mut writer = WriterBuilder::new()
        .from_path(path)
        .with_context(|| format!("write csv: {}", path.display()))?;
    writer
        .write_record(&table.headers)
        .with_context(|| format!("write header: {}", path.display()))?;
    for row in &table.rows {
        if row.len() != table.headers.len() {
            bail!(
                "row width {} does not match header width {} in {}",
                row.len(),
                table.headers.len(),
                path.display()
            );
        }
        writer
            .write_record(row)
            .with_context(|| format!("write row: {}", path.display()))?;
    }
    writer
        .flush()
        .with_context(|| format!("flush csv: {}", path.display()))?;
    Ok(())
}
