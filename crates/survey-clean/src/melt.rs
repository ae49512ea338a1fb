//! Schema melter: wide survey rows to one record per college slot.

use anyhow::{Context, Result};
use tracing::debug;

use survey_ingest::{CsvTable, non_empty};
use survey_model::{ApplicationRecord, ColumnGroup, ColumnGroupMap};

/// Melt the renamed survey export into application records.
///
/// Each respondent row produces one record per column group; slots the
/// respondent left entirely blank are dropped. Column-naming problems
/// were already rejected when the dictionary was loaded, so per-row work
/// here is pure reshaping.
pub fn melt_survey(table: &CsvTable, map: &ColumnGroupMap) -> Result<Vec<ApplicationRecord>> {
    let respondent_col = table
        .require_column("respondent_code")
        .context("melt survey")?;

    let group_columns: Vec<GroupIndices> = map
        .groups
        .iter()
        .map(|group| GroupIndices::resolve(table, group))
        .collect::<Result<_>>()?;

    let mut records = Vec::new();
    let mut dropped = 0usize;
    for row in 0..table.row_count() {
        let respondent_code = table.value(row, respondent_col).to_string();
        for (group, indices) in map.groups.iter().zip(&group_columns) {
            let record = ApplicationRecord {
                respondent_code: respondent_code.clone(),
                college_type: group.college_type,
                name: indices.field(table, row, indices.name),
                location: indices.field(table, row, indices.location),
                interests: indices.field(table, row, indices.interests),
                characteristics: indices.field(table, row, indices.characteristics),
            };
            if record.is_blank() {
                dropped += 1;
            } else {
                records.push(record);
            }
        }
    }
    debug!(
        respondent_count = table.row_count(),
        group_count = map.groups.len(),
        record_count = records.len(),
        dropped_blank = dropped,
        "survey melted"
    );
    Ok(records)
}

/// Serialize melted records into the table persisted between stages.
pub fn melted_table(records: &[ApplicationRecord]) -> CsvTable {
    let mut table = CsvTable::new(
        [
            "name",
            "location",
            "interests",
            "characteristics",
            "respondent_code",
            "college_type",
        ]
        .iter()
        .map(ToString::to_string)
        .collect(),
    );
    for record in records {
        table.push_row(vec![
            record.name.clone().unwrap_or_default(),
            record.location.clone().unwrap_or_default(),
            record.interests.clone().unwrap_or_default(),
            record.characteristics.clone().unwrap_or_default(),
            record.respondent_code.clone(),
            record.college_type.to_string(),
        ]);
    }
    table
}

struct GroupIndices {
    name: usize,
    location: usize,
    interests: usize,
    characteristics: usize,
}

impl GroupIndices {
    fn resolve(table: &CsvTable, group: &ColumnGroup) -> Result<Self> {
        let lookup = |field: &str| -> Result<usize> {
            let column = group
                .column_for(field)
                .with_context(|| format!("group '{}' has no '{field}' column", group.id))?;
            table
                .require_column(column)
                .with_context(|| format!("group '{}'", group.id))
        };
        Ok(Self {
            name: lookup("name")?,
            location: lookup("location")?,
            interests: lookup("interests")?,
            characteristics: lookup("characteristics")?,
        })
    }

    fn field(&self, table: &CsvTable, row: usize, col: usize) -> Option<String> {
        non_empty(table.value(row, col)).map(ToString::to_string)
    }
}
