//! Cleaning and record-linkage stages for the college application
//! survey: melt, expand, categorize, match, merge corrections, and the
//! dimension split. Each stage is a pure function from input tables to a
//! new output table.

pub mod categories;
pub mod colleges;
pub mod error;
pub mod expand;
pub mod melt;
pub mod name_match;
pub mod overrides;

pub use categories::{apply_other_categories, column_is_empty};
pub use colleges::{
    ChangedName, CollegeSplit, apply_final_names, build_college_dimension, changed_names_table,
    colleges_table, distinct_names, distinct_names_table,
};
pub use error::CleanError;
pub use expand::{
    Expansion, ExpandedField, OtherCounts, SEPARATOR, SequenceMode, SequenceViolation,
    ViolationKind, expand_field, expand_records, leftover_table, leftover_values, other_counts,
    other_counts_table, render_sequence,
};
pub use melt::{melt_survey, melted_table};
pub use name_match::{match_names, matches_table, normalize_name, similarity, sort_for_review};
pub use overrides::{
    apply_match_corrections, names_locations, names_locations_table, resolve_override,
};
