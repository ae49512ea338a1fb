use serde::{Deserialize, Serialize};

/// Fuzzy-match result for one record's college name.
///
/// When the best similarity falls below the threshold the score is forced
/// to zero and `matched` carries the original name unmodified, so a
/// reviewer can triage low-confidence rows by sorting on the score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NameMatch {
    /// Stable row index of the record in the expanded table.
    pub index: usize,
    /// Original free-text name.
    pub name: String,
    /// Location carried along for reviewer context.
    pub location: Option<String>,
    /// Best canonical candidate, or the original name when rejected.
    pub matched: String,
    /// Similarity in [0, 1]; 0.0 when the match was rejected.
    pub score: f64,
}

impl NameMatch {
    /// Whether the match cleared the acceptance threshold.
    pub fn is_confident(&self, threshold: f64) -> bool {
        self.score >= threshold
    }
}
