//! Data-dictionary loader: builds the column-group map driving the melt.

use std::path::Path;

use survey_model::{CORE_FIELDS, CollegeType, ColumnGroup, ColumnGroupMap, GroupColumn};

use crate::csv_utils::{get_string, header_index, read_ref_csv, require_string};
use crate::error::RefDataError;

/// Load the data dictionary and derive the column-group map.
///
/// Naming conventions are checked here, once, so a malformed dictionary
/// fails the run before any survey row is touched:
/// - a grouped column id must have at least three `_`-separated segments;
///   the third names the field
/// - the group id's first segment must be a known college-type tag
/// - every group must expose exactly the four core fields
pub fn load_column_group_map(path: &Path) -> Result<ColumnGroupMap, RefDataError> {
    let csv = read_ref_csv(path)?;
    let idx_name = header_index(&csv.headers, path, "new_col_name")?;
    let idx_group = header_index(&csv.headers, path, "col_group")?;

    let mut column_names = Vec::with_capacity(csv.records.len());
    let mut groups: Vec<ColumnGroup> = Vec::new();

    for (row_number, record) in csv.records.iter().enumerate() {
        let column = require_string(record, idx_name, path, row_number + 2, "new_col_name")?;
        let group_id = get_string(record, idx_group);
        column_names.push(column.clone());

        let Some(group_id) = group_id else {
            continue;
        };

        let field = column
            .split('_')
            .nth(2)
            .map(ToString::to_string)
            .ok_or_else(|| RefDataError::Dictionary {
                path: path.to_path_buf(),
                message: format!(
                    "column '{column}' in group '{group_id}' has no field segment \
                     (expected at least three underscore-separated segments)"
                ),
            })?;

        let group_idx = match groups.iter().position(|group| group.id == group_id) {
            Some(idx) => idx,
            None => {
                let tag = group_id.split('_').next().unwrap_or_default();
                let college_type = CollegeType::from_group_tag(tag).map_err(|error| {
                    RefDataError::Dictionary {
                        path: path.to_path_buf(),
                        message: format!("group '{group_id}': {error}"),
                    }
                })?;
                groups.push(ColumnGroup {
                    id: group_id.clone(),
                    college_type,
                    columns: Vec::new(),
                });
                groups.len() - 1
            }
        };
        groups[group_idx].columns.push(GroupColumn { column, field });
    }

    if !column_names.iter().any(|name| name == "respondent_code") {
        return Err(RefDataError::Dictionary {
            path: path.to_path_buf(),
            message: "no 'respondent_code' column in the dictionary".to_string(),
        });
    }
    if groups.is_empty() {
        return Err(RefDataError::Dictionary {
            path: path.to_path_buf(),
            message: "no column groups defined".to_string(),
        });
    }
    for group in &groups {
        validate_group_fields(path, group)?;
    }

    Ok(ColumnGroupMap {
        column_names,
        groups,
    })
}

fn validate_group_fields(path: &Path, group: &ColumnGroup) -> Result<(), RefDataError> {
    for field in CORE_FIELDS {
        let count = group.columns.iter().filter(|col| col.field == field).count();
        if count != 1 {
            return Err(RefDataError::Dictionary {
                path: path.to_path_buf(),
                message: format!(
                    "group '{}' has {count} columns for field '{field}' (expected exactly one)",
                    group.id
                ),
            });
        }
    }
    if group.columns.len() != CORE_FIELDS.len() {
        let unknown: Vec<&str> = group
            .columns
            .iter()
            .map(|col| col.field.as_str())
            .filter(|field| !CORE_FIELDS.contains(field))
            .collect();
        return Err(RefDataError::Dictionary {
            path: path.to_path_buf(),
            message: format!(
                "group '{}' has unexpected fields: {}",
                group.id,
                unknown.join(", ")
            ),
        });
    }
    Ok(())
}
