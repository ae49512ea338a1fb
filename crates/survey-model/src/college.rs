use serde::{Deserialize, Serialize};

use crate::enums::CollegeType;

/// One row of the college dimension table.
///
/// The dimension is keyed by `name`; the deduplicator guarantees no name
/// maps to two different (location, college_type) pairs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct College {
    pub name: String,
    pub location: Option<String>,
    pub college_type: CollegeType,
}
