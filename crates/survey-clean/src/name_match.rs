//! Fuzzy college-name matching against the canonical list.
//!
//! Normalization plus a normalized indel ratio, the same quantity the
//! classic Levenshtein ratio reports. The matcher is advisory: every row
//! gets an answer, and rows under the threshold keep their original name
//! with a zero score so a reviewer can triage them before the merge.

use std::cmp::Ordering;

use anyhow::Result;
use rapidfuzz::distance::indel;
use tracing::debug;

use survey_ingest::CsvTable;
use survey_model::NameMatch;

use crate::error::CleanError;

/// Normalize a name for comparison: lowercase and keep only ASCII
/// alphanumerics, so punctuation and spacing differences cost nothing.
pub fn normalize_name(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .collect()
}

/// Normalized indel similarity in [0, 1] between two raw names.
pub fn similarity(a: &str, b: &str) -> f64 {
    indel::normalized_similarity(normalize_name(a).chars(), normalize_name(b).chars())
}

/// Match every record's name against the canonical list.
///
/// The table must carry `index`, `name` and `location` columns (the
/// expanded table does). Scores below `min_score` are rejected: the
/// score is forced to zero and the original name passes through
/// unmodified.
pub fn match_names(
    table: &CsvTable,
    canonical: &[String],
    min_score: f64,
) -> Result<Vec<NameMatch>> {
    let index_col = table.require_column("index")?;
    let name_col = table.require_column("name")?;
    let location_col = table.require_column("location")?;

    let normalized_canonical: Vec<String> = canonical
        .iter()
        .map(|name| normalize_name(name))
        .collect();

    let mut matches = Vec::with_capacity(table.row_count());
    let mut confident = 0usize;
    for row in 0..table.row_count() {
        let raw_index = table.value(row, index_col);
        let index: usize = raw_index.parse().map_err(|_| CleanError::BadIndex {
            row,
            value: raw_index.to_string(),
        })?;
        let name = table.value(row, name_col).to_string();
        let location = survey_ingest::non_empty(table.value(row, location_col))
            .map(ToString::to_string);

        let normalized = normalize_name(&name);
        let mut best_score = 0.0f64;
        let mut best_idx = 0usize;
        for (candidate_idx, candidate) in normalized_canonical.iter().enumerate() {
            let score = indel::normalized_similarity(normalized.chars(), candidate.chars());
            if score > best_score {
                best_score = score;
                best_idx = candidate_idx;
            }
        }

        let (score, matched) = if best_score >= min_score {
            confident += 1;
            (best_score, canonical[best_idx].clone())
        } else {
            (0.0, name.clone())
        };
        matches.push(NameMatch {
            index,
            name,
            location,
            matched,
            score,
        });
    }

    debug!(
        record_count = matches.len(),
        confident,
        needs_review = matches.len() - confident,
        min_score,
        "names matched"
    );
    Ok(matches)
}

/// Order matches for the review file: lowest scores first, then by row
/// index, so the rows needing attention lead the file.
pub fn sort_for_review(matches: &mut [NameMatch]) {
    matches.sort_by(|a, b| {
        a.score
            .partial_cmp(&b.score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.index.cmp(&b.index))
    });
}

/// Serialize matches into the review table a curator edits.
pub fn matches_table(matches: &[NameMatch]) -> CsvTable {
    let mut table = CsvTable::new(
        [
            "index",
            "name",
            "location",
            "score",
            "match",
            "name_revised",
            "location_revised",
        ]
        .iter()
        .map(ToString::to_string)
        .collect(),
    );
    for entry in matches {
        table.push_row(vec![
            entry.index.to_string(),
            entry.name.clone(),
            entry.location.clone().unwrap_or_default(),
            format!("{:.4}", entry.score),
            entry.matched.clone(),
            String::new(),
            String::new(),
        ]);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalization_strips_punctuation_and_case() {
        assert_eq!(normalize_name("De La Salle Univ."), "delasalleuniv");
        assert_eq!(
            normalize_name("  Ateneo de Manila University "),
            "ateneodemanilauniversity"
        );
    }

    #[test]
    fn abbreviated_name_clears_threshold() {
        // "delasalleuniv" vs "delasalleuniversity": 13 shared chars out of
        // 32 total positions gives 26/32 = 0.8125.
        let score = similarity("De La Salle Univ.", "De La Salle University");
        assert!(score >= 0.8, "expected >= 0.8, got {score}");
        assert!(score <= 1.0);
    }

    #[test]
    fn identical_names_score_one() {
        let score = similarity("Xavier School", "Xavier School");
        assert!((score - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn match_rejection_keeps_original_name() {
        let mut table = CsvTable::new(
            ["index", "name", "location"]
                .iter()
                .map(ToString::to_string)
                .collect(),
        );
        table.push_row(vec![
            "0".to_string(),
            "Some Unknown Academy".to_string(),
            "NCR".to_string(),
        ]);
        table.push_row(vec![
            "1".to_string(),
            "De La Salle Univ.".to_string(),
            "NCR".to_string(),
        ]);
        let canonical = vec![
            "De La Salle University".to_string(),
            "Ateneo de Manila University".to_string(),
        ];

        let matches = match_names(&table, &canonical, 0.8).expect("match");
        assert_eq!(matches[0].score, 0.0);
        assert_eq!(matches[0].matched, "Some Unknown Academy");
        assert!(matches[1].score >= 0.8);
        assert_eq!(matches[1].matched, "De La Salle University");
    }

    #[test]
    fn review_sort_puts_low_scores_first() {
        let mut matches = vec![
            NameMatch {
                index: 3,
                name: "A".to_string(),
                location: None,
                matched: "A".to_string(),
                score: 0.95,
            },
            NameMatch {
                index: 7,
                name: "B".to_string(),
                location: None,
                matched: "B".to_string(),
                score: 0.0,
            },
            NameMatch {
                index: 2,
                name: "C".to_string(),
                location: None,
                matched: "C".to_string(),
                score: 0.0,
            },
        ];
        sort_for_review(&mut matches);
        let order: Vec<usize> = matches.iter().map(|m| m.index).collect();
        assert_eq!(order, vec![2, 7, 3]);
    }
}
