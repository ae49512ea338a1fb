#![deny(unsafe_code)]

//! Reference-data health check: load everything, report counts and
//! invariant violations without running the pipeline.

use std::path::Path;

use crate::categories::{load_other_categories, orphaned_answer_categories};
use crate::config::RunConfig;
use crate::dictionary::load_column_group_map;
use crate::error::RefDataError;
use crate::names::load_canonical_names;
use crate::options::{load_option_sets, validate_option_sets};
use crate::registry::first_answers_path;

#[derive(Debug, Clone, serde::Serialize)]
pub struct DoctorReport {
    pub counts: DoctorCounts,
    /// Invariant violations; an empty list means the folder is ready.
    pub violations: Vec<String>,
}

#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct DoctorCounts {
    pub survey_columns: usize,
    pub column_groups: usize,
    pub option_sets: usize,
    pub options: usize,
    pub other_categories: usize,
    pub curated_answers: usize,
    pub canonical_names: usize,
}

impl DoctorReport {
    pub fn is_healthy(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Check every reference table in the data folder.
///
/// Hard I/O and parse failures still return an error; recoverable
/// problems (USS ambiguity, orphaned curated answers) are collected as
/// violations so one report shows them all.
pub fn check_reference_data(folder: &Path, config: &RunConfig) -> Result<DoctorReport, RefDataError> {
    let mut counts = DoctorCounts::default();
    let mut violations = Vec::new();

    match load_column_group_map(&config.data_dictionary_path(folder)) {
        Ok(map) => {
            counts.survey_columns = map.column_names.len();
            counts.column_groups = map.groups.len();
        }
        Err(error) => violations.push(error.to_string()),
    }

    match load_option_sets(&config.options_path(folder)) {
        Ok(sets) => {
            counts.option_sets = sets.len();
            counts.options = sets.values().map(|set| set.len()).sum();
            violations.extend(validate_option_sets(&sets));
        }
        Err(error) => violations.push(error.to_string()),
    }

    match load_other_categories(
        &config.other_options_path(folder),
        &first_answers_path(folder, config),
    ) {
        Ok(map) => {
            counts.other_categories = map.categories.len();
            counts.curated_answers = map.answers.values().map(Vec::len).sum();
            for category in orphaned_answer_categories(&map) {
                violations.push(format!(
                    "curated answers reference unknown category '{category}'"
                ));
            }
        }
        Err(error) => violations.push(error.to_string()),
    }

    match load_canonical_names(&config.canonical_names_path(folder)) {
        Ok(names) => counts.canonical_names = names.len(),
        Err(error) => violations.push(error.to_string()),
    }

    Ok(DoctorReport { counts, violations })
}
