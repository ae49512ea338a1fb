//! One-shot loading of all curated reference tables.

use std::collections::BTreeMap;
use std::path::Path;

use survey_model::{ColumnGroupMap, InfoType, OptionSet, OtherCategoryMap};

use crate::categories::load_other_categories;
use crate::config::RunConfig;
use crate::dictionary::load_column_group_map;
use crate::error::RefDataError;
use crate::names::load_canonical_names;
use crate::options::load_validated_option_sets;

/// Immutable bundle of every curated reference table a run needs.
///
/// Loaded once at pipeline start and passed by reference to the stages;
/// a new run reloads from disk.
#[derive(Debug, Clone)]
pub struct RefData {
    pub column_map: ColumnGroupMap,
    pub option_sets: BTreeMap<InfoType, OptionSet>,
    pub categories: OtherCategoryMap,
    pub canonical_names: Vec<String>,
}

impl RefData {
    pub fn option_set(&self, info_type: InfoType) -> Option<&OptionSet> {
        self.option_sets.get(&info_type)
    }
}

/// Load and validate all reference tables named by the config.
///
/// Fails on the first configuration error; nothing is written before
/// this succeeds, so a malformed reference table can never produce
/// partial output.
pub fn load_reference_data(folder: &Path, config: &RunConfig) -> Result<RefData, RefDataError> {
    let column_map = load_column_group_map(&config.data_dictionary_path(folder))?;
    let option_sets = load_validated_option_sets(&config.options_path(folder))?;
    let categories = load_other_categories(
        &config.other_options_path(folder),
        &first_answers_path(folder, config),
    )?;
    let canonical_names = load_canonical_names(&config.canonical_names_path(folder))?;
    Ok(RefData {
        column_map,
        option_sets,
        categories,
        canonical_names,
    })
}

/// Path of the curated answers file for classification.
///
/// The classify table maps leftover columns to answer files; today a
/// single shared category list covers them all, so the first configured
/// file is the one loaded.
pub fn first_answers_path(folder: &Path, config: &RunConfig) -> std::path::PathBuf {
    config
        .classify
        .values()
        .next()
        .map(|name| folder.join(name))
        .unwrap_or_else(|| folder.join("characteristics_other_answers.csv"))
}
