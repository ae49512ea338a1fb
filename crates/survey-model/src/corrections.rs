use serde::{Deserialize, Serialize};

/// One reviewed row of the name-match correction table (round one).
///
/// `matched` is the candidate the reviewer saw; the `*_revised` fields are
/// filled in only where the reviewer overrode it. Precedence when merging:
/// revised value wins, else the candidate, else the record's own value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchCorrection {
    pub index: usize,
    pub matched: String,
    pub name_revised: Option<String>,
    pub location_revised: Option<String>,
}

/// One row of the final-name correction table (round two).
///
/// Maps a name as it stands after round one onto its final canonical
/// spelling. Rows the curator left without a final name are dropped at
/// load time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalNameCorrection {
    pub name: String,
    pub final_name: String,
}
