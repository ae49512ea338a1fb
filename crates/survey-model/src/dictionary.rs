use serde::{Deserialize, Serialize};

use crate::enums::CollegeType;

/// The semantic fields every column group must expose, in output order.
pub const CORE_FIELDS: [&str; 4] = ["name", "location", "interests", "characteristics"];

/// One column of a group together with the field name derived from the
/// column identifier's naming convention.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupColumn {
    /// Column name in the renamed survey export (e.g. `loc_1_name`).
    pub column: String,
    /// Semantic field name, the third underscore-delimited segment
    /// (e.g. `name`).
    pub field: String,
}

/// One college slot of the wide export: the columns holding that slot's
/// answers plus the section the slot belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnGroup {
    /// Group identifier from the data dictionary (e.g. `loc_1`).
    pub id: String,
    pub college_type: CollegeType,
    pub columns: Vec<GroupColumn>,
}

impl ColumnGroup {
    /// Column name carrying the given field, if the group has it.
    pub fn column_for(&self, field: &str) -> Option<&str> {
        self.columns
            .iter()
            .find(|col| col.field == field)
            .map(|col| col.column.as_str())
    }
}

/// Mapping from the wide export's column groups to melted records.
/// Built once from the data dictionary; immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnGroupMap {
    /// Column names of the full export in data-dictionary order.
    pub column_names: Vec<String>,
    /// Groups in order of first appearance in the dictionary.
    pub groups: Vec<ColumnGroup>,
}

impl ColumnGroupMap {
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }
}
