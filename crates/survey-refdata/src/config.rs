//! Run configuration loaded from `pipeline.toml` in the data folder.
//!
//! Every file name is relative to the data folder. When the config file
//! is absent the conventional names below are used, so a folder laid out
//! by convention needs no config at all.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::RefDataError;

/// Name of the optional run configuration file inside the data folder.
pub const CONFIG_FILE_NAME: &str = "pipeline.toml";

/// Acceptance threshold for fuzzy name matches.
pub const DEFAULT_MIN_SCORE: f64 = 0.8;

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    pub inputs: InputFiles,
    pub corrections: CorrectionFiles,
    pub matching: MatchingConfig,
    /// Leftover column name -> curated answers file classifying it.
    pub classify: BTreeMap<String, String>,
    pub location: LocationConfig,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            inputs: InputFiles::default(),
            corrections: CorrectionFiles::default(),
            matching: MatchingConfig::default(),
            classify: BTreeMap::from([(
                "characteristics_other".to_string(),
                "characteristics_other_answers.csv".to_string(),
            )]),
            location: LocationConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InputFiles {
    pub survey: String,
    pub data_dictionary: String,
    pub options: String,
    /// Option table extended with curated catch-all categories.
    pub other_options: String,
    pub canonical_names: String,
}

impl Default for InputFiles {
    fn default() -> Self {
        Self {
            survey: "survey.csv".to_string(),
            data_dictionary: "data_dictionary.csv".to_string(),
            options: "options.csv".to_string(),
            other_options: "options_with_others.csv".to_string(),
            canonical_names: "common_names.csv".to_string(),
        }
    }
}

/// Curated correction files produced by human review between runs.
/// Their absence is not an error: the pipeline stops after writing the
/// review outputs and reports which file unblocks the rest.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CorrectionFiles {
    pub matches: String,
    pub colleges: String,
}

impl Default for CorrectionFiles {
    fn default() -> Self {
        Self {
            matches: "match_revised.csv".to_string(),
            colleges: "names_locations_revised.csv".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MatchingConfig {
    pub min_score: f64,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            min_score: DEFAULT_MIN_SCORE,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LocationConfig {
    /// Boilerplate prefixes stripped from location answers before the
    /// dimension table is built.
    pub strip_prefixes: Vec<String>,
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            strip_prefixes: vec!["Campus is located in ".to_string()],
        }
    }
}

impl RunConfig {
    /// Load `pipeline.toml` from the data folder, falling back to the
    /// conventional defaults when the file does not exist.
    pub fn load(folder: &Path) -> Result<Self, RefDataError> {
        let path = folder.join(CONFIG_FILE_NAME);
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(&path).map_err(|e| RefDataError::io(&path, e))?;
        toml::from_str(&text).map_err(|source| RefDataError::Toml { path, source })
    }

    pub fn survey_path(&self, folder: &Path) -> PathBuf {
        folder.join(&self.inputs.survey)
    }

    pub fn data_dictionary_path(&self, folder: &Path) -> PathBuf {
        folder.join(&self.inputs.data_dictionary)
    }

    pub fn options_path(&self, folder: &Path) -> PathBuf {
        folder.join(&self.inputs.options)
    }

    pub fn other_options_path(&self, folder: &Path) -> PathBuf {
        folder.join(&self.inputs.other_options)
    }

    pub fn canonical_names_path(&self, folder: &Path) -> PathBuf {
        folder.join(&self.inputs.canonical_names)
    }

    pub fn match_corrections_path(&self, folder: &Path) -> PathBuf {
        folder.join(&self.corrections.matches)
    }

    pub fn college_corrections_path(&self, folder: &Path) -> PathBuf {
        folder.join(&self.corrections.colleges)
    }
}
