use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;

/// Partition of the survey into its two parallel question sections.
///
/// Each college slot in the wide export belongs to one section; the group
/// tag in the data dictionary (`loc` / `int`) decides which.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollegeType {
    Local,
    International,
}

impl CollegeType {
    /// Parse the group tag used in data-dictionary group identifiers.
    pub fn from_group_tag(tag: &str) -> Result<Self, ModelError> {
        match tag {
            "loc" => Ok(CollegeType::Local),
            "int" => Ok(CollegeType::International),
            other => Err(ModelError::UnknownGroupTag(other.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CollegeType::Local => "local",
            CollegeType::International => "international",
        }
    }
}

impl fmt::Display for CollegeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CollegeType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "local" => Ok(CollegeType::Local),
            "international" => Ok(CollegeType::International),
            other => Err(ModelError::UnknownCollegeType(other.to_string())),
        }
    }
}

/// Category of survey question answered once per college application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InfoType {
    Location,
    Interests,
    Characteristics,
}

impl InfoType {
    pub fn as_str(&self) -> &'static str {
        match self {
            InfoType::Location => "location",
            InfoType::Interests => "interests",
            InfoType::Characteristics => "characteristics",
        }
    }

    /// The multi-select question types, in the order their answer columns
    /// appear in the melted table.
    pub fn sequence_types() -> [InfoType; 2] {
        [InfoType::Interests, InfoType::Characteristics]
    }
}

impl fmt::Display for InfoType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for InfoType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "location" => Ok(InfoType::Location),
            "interests" => Ok(InfoType::Interests),
            "characteristics" => Ok(InfoType::Characteristics),
            other => Err(ModelError::UnknownInfoType(other.to_string())),
        }
    }
}
