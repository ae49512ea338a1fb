use serde::{Deserialize, Serialize};

use crate::enums::CollegeType;

/// One (respondent, college slot) pair after melting the wide export.
///
/// The four core fields are free text straight from the survey; empty
/// answers are `None`. A slot the respondent never filled in (all four
/// core fields missing) is not a real application and is dropped during
/// melting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationRecord {
    pub respondent_code: String,
    pub college_type: CollegeType,
    pub name: Option<String>,
    pub location: Option<String>,
    /// Raw multi-select answer text for the interests question.
    pub interests: Option<String>,
    /// Raw multi-select answer text for the characteristics question.
    pub characteristics: Option<String>,
}

impl ApplicationRecord {
    /// True when every core field is missing, i.e. the slot was left blank.
    pub fn is_blank(&self) -> bool {
        self.name.is_none()
            && self.location.is_none()
            && self.interests.is_none()
            && self.characteristics.is_none()
    }
}
