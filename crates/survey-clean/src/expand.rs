//! Sequence field expander: multi-select answer text to boolean flags.
//!
//! The survey tool serializes a multi-select answer as the selected
//! option labels in table order, joined with `", "`, with any free-text
//! "other" answer trailing at the end. The expander is a tokenizer over
//! that grammar: ordered literal-prefix alternatives separated by a
//! fixed delimiter, with a trailing free-text escape.
//!
//! Each option is detected by its unique starting substring at the scan
//! cursor; a match consumes the full label plus one delimiter. The
//! grammar is brittle by nature, so the scanner also verifies the parts
//! it skips over and reports a violation when the text disagrees with
//! the option table instead of silently producing wrong flags.

use std::collections::BTreeMap;
use std::fmt;

use anyhow::Result;
use tracing::{debug, warn};

use survey_ingest::{CsvTable, non_empty};
use survey_model::{ApplicationRecord, InfoType, OptionSet};

use crate::error::CleanError;

/// Option labels are joined with exactly this separator.
pub const SEPARATOR: &str = ", ";

/// How to treat text that violates the serialization contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SequenceMode {
    /// Keep the positional scan going, record the violation, and surface
    /// the count in the run summary.
    #[default]
    Lenient,
    /// Fail the stage on the first violation.
    Strict,
}

/// One detected disagreement between answer text and option table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViolationKind {
    /// The unique starting substring matched but the text does not carry
    /// the full option label.
    LabelMismatch { option: String },
    /// The two characters after a consumed label are not the `", "`
    /// separator.
    DelimiterMismatch { found: String },
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViolationKind::LabelMismatch { option } => {
                write!(f, "text diverges from option label '{option}' after its starting substring")
            }
            ViolationKind::DelimiterMismatch { found } => {
                write!(f, "expected '{SEPARATOR}' separator, found '{found}'")
            }
        }
    }
}

/// A violation located in the expanded table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceViolation {
    pub row: usize,
    pub info_type: InfoType,
    pub kind: ViolationKind,
}

/// One expanded multi-select value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpandedField {
    /// One flag per option, in option-table order, always fully
    /// populated even when the text runs out early.
    pub flags: Vec<bool>,
    /// Unconsumed trailing text, the respondent's own "other" answer.
    pub leftover: Option<String>,
    pub violations: Vec<ViolationKind>,
}

/// Expand one answer value against an option set.
///
/// Missing input yields all-false flags and no leftover. The scan is
/// total: every option gets a flag no matter how the text looks.
pub fn expand_field(text: Option<&str>, set: &OptionSet) -> ExpandedField {
    let mut flags = Vec::with_capacity(set.len());
    let mut violations = Vec::new();

    let Some(text) = text else {
        flags.resize(set.len(), false);
        return ExpandedField {
            flags,
            leftover: None,
            violations,
        };
    };

    let mut scanner = Scanner::new(text);
    for entry in &set.entries {
        if scanner.remaining() == 0 {
            flags.push(false);
            continue;
        }
        let matched = scanner.starts_with(&entry.uss);
        flags.push(matched);
        if !matched {
            continue;
        }
        if !scanner.starts_with(&entry.label) {
            violations.push(ViolationKind::LabelMismatch {
                option: entry.label.clone(),
            });
        }
        scanner.advance(entry.label.chars().count());
        if scanner.remaining() > 0 {
            if !scanner.starts_with(SEPARATOR) {
                violations.push(ViolationKind::DelimiterMismatch {
                    found: scanner.preview(SEPARATOR.chars().count()),
                });
            }
            scanner.advance(SEPARATOR.chars().count());
        }
    }

    let leftover = non_empty(scanner.rest().trim()).map(ToString::to_string);
    ExpandedField {
        flags,
        leftover,
        violations,
    }
}

/// Serialize flags back into the survey tool's wire form.
///
/// Inverse of [`expand_field`] over well-formed input: expanding the
/// rendered text reproduces the flags with no leftover.
pub fn render_sequence(flags: &[bool], set: &OptionSet) -> String {
    let selected: Vec<&str> = set
        .entries
        .iter()
        .zip(flags)
        .filter(|(_, flag)| **flag)
        .map(|(entry, _)| entry.label.as_str())
        .collect();
    selected.join(SEPARATOR)
}

/// The expanded table plus everything the scan flagged.
#[derive(Debug, Clone)]
pub struct Expansion {
    pub table: CsvTable,
    pub violations: Vec<SequenceViolation>,
}

/// Expand all records into the boolean-flag table.
///
/// Column layout: `index`, the four carried fields, then per multi-select
/// info type its option shortcuts followed by a `<info_type>_other`
/// leftover column. The `index` column is the stable row key every later
/// stage and correction file joins on.
pub fn expand_records(
    records: &[ApplicationRecord],
    sets: &BTreeMap<InfoType, OptionSet>,
    mode: SequenceMode,
) -> Result<Expansion> {
    let seq_types = InfoType::sequence_types();
    for info_type in seq_types {
        if !sets.contains_key(&info_type) {
            return Err(CleanError::MissingOptionSet(info_type).into());
        }
    }

    let mut headers = vec![
        "index".to_string(),
        "name".to_string(),
        "location".to_string(),
        "respondent_code".to_string(),
        "college_type".to_string(),
    ];
    for info_type in seq_types {
        let set = &sets[&info_type];
        headers.extend(set.shortcuts().map(ToString::to_string));
        headers.push(format!("{info_type}_other"));
    }

    let mut table = CsvTable::new(headers);
    let mut violations = Vec::new();

    for (index, record) in records.iter().enumerate() {
        let mut row = vec![
            index.to_string(),
            record.name.clone().unwrap_or_default(),
            record.location.clone().unwrap_or_default(),
            record.respondent_code.clone(),
            record.college_type.to_string(),
        ];
        for info_type in seq_types {
            let set = &sets[&info_type];
            let text = match info_type {
                InfoType::Interests => record.interests.as_deref(),
                InfoType::Characteristics => record.characteristics.as_deref(),
                InfoType::Location => unreachable!("location is not a sequence field"),
            };
            let expanded = expand_field(text, set);
            if let Some(kind) = expanded.violations.first()
                && mode == SequenceMode::Strict
            {
                return Err(CleanError::MalformedSequence {
                    row: index,
                    info_type,
                    detail: kind.to_string(),
                }
                .into());
            }
            for kind in expanded.violations {
                warn!(row = index, info_type = %info_type, violation = %kind, "sequence contract violation");
                violations.push(SequenceViolation {
                    row: index,
                    info_type,
                    kind,
                });
            }
            row.extend(expanded.flags.iter().map(|flag| bool_str(*flag).to_string()));
            row.push(expanded.leftover.unwrap_or_default());
        }
        table.push_row(row);
    }

    debug!(
        record_count = records.len(),
        column_count = table.headers.len(),
        violation_count = violations.len(),
        "records expanded"
    );
    Ok(Expansion { table, violations })
}

pub(crate) fn bool_str(flag: bool) -> &'static str {
    if flag { "true" } else { "false" }
}

/// Per-info-type counts of answers outside the curated option lists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OtherCounts {
    pub interests: usize,
    pub characteristics: usize,
    pub location: usize,
}

/// Count non-standard answers in the expanded table.
///
/// Interests and characteristics count their leftover columns; location
/// is single-select, so it counts non-empty values that are not a
/// curated location option.
pub fn other_counts(table: &CsvTable, location_options: &OptionSet) -> Result<OtherCounts> {
    let interests_col = table.require_column("interests_other")?;
    let characteristics_col = table.require_column("characteristics_other")?;
    let location_col = table.require_column("location")?;

    let non_empty_count =
        |col: usize| table.column_values(col).filter(|value| !value.is_empty()).count();

    let location = table
        .column_values(location_col)
        .filter(|value| !value.is_empty())
        .filter(|value| !location_options.labels().any(|label| label == *value))
        .count();

    Ok(OtherCounts {
        interests: non_empty_count(interests_col),
        characteristics: non_empty_count(characteristics_col),
        location,
    })
}

/// Counts table persisted for the curation loop.
pub fn other_counts_table(counts: OtherCounts) -> CsvTable {
    let mut table = CsvTable::new(vec!["info_type".to_string(), "num_other".to_string()]);
    table.push_row(vec!["interests".to_string(), counts.interests.to_string()]);
    table.push_row(vec![
        "characteristics".to_string(),
        counts.characteristics.to_string(),
    ]);
    table.push_row(vec!["location".to_string(), counts.location.to_string()]);
    table
}

/// Non-empty values of a leftover column, in row order, for curation.
pub fn leftover_values(table: &CsvTable, column: &str) -> Result<Vec<String>> {
    let col = table.require_column(column)?;
    Ok(table
        .column_values(col)
        .filter(|value| !value.is_empty())
        .map(ToString::to_string)
        .collect())
}

/// Single-column table of leftover values for the curation export.
pub fn leftover_table(values: &[String]) -> CsvTable {
    let mut table = CsvTable::new(vec!["orig_text".to_string()]);
    for value in values {
        table.push_row(vec![value.clone()]);
    }
    table
}

/// Character-position scanner used by the expander.
///
/// Indexes by character, not byte, so multibyte answer text cannot split
/// a code point.
struct Scanner {
    chars: Vec<char>,
    cursor: usize,
}

impl Scanner {
    fn new(text: &str) -> Self {
        Self {
            chars: text.chars().collect(),
            cursor: 0,
        }
    }

    fn remaining(&self) -> usize {
        self.chars.len() - self.cursor
    }

    /// Whether the text at the cursor begins with `s`.
    fn starts_with(&self, s: &str) -> bool {
        let mut idx = self.cursor;
        for ch in s.chars() {
            if self.chars.get(idx) != Some(&ch) {
                return false;
            }
            idx += 1;
        }
        true
    }

    /// Advance by up to `n` characters, clamped at the end of the text.
    fn advance(&mut self, n: usize) {
        self.cursor += n.min(self.remaining());
    }

    /// The next `n` characters without consuming them.
    fn preview(&self, n: usize) -> String {
        self.chars[self.cursor..(self.cursor + n).min(self.chars.len())]
            .iter()
            .collect()
    }

    fn rest(&self) -> String {
        self.chars[self.cursor..].iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use survey_model::OptionEntry;

    fn interest_set() -> OptionSet {
        OptionSet {
            info_type: InfoType::Interests,
            entries: vec![
                entry("STEM-oriented", "stem", "STEM"),
                entry("ABM-oriented", "abm", "ABM"),
                entry("Arts and Design-oriented", "arts", "Arts"),
            ],
        }
    }

    fn entry(label: &str, shortcut: &str, uss: &str) -> OptionEntry {
        OptionEntry {
            label: label.to_string(),
            shortcut: shortcut.to_string(),
            uss: uss.to_string(),
        }
    }

    #[test]
    fn expands_selected_options_and_trailing_other() {
        let expanded = expand_field(
            Some("STEM-oriented, Arts and Design-oriented, Robotics club"),
            &interest_set(),
        );
        assert_eq!(expanded.flags, vec![true, false, true]);
        assert_eq!(expanded.leftover.as_deref(), Some("Robotics club"));
        assert!(expanded.violations.is_empty());
    }

    #[test]
    fn null_input_populates_every_flag() {
        let expanded = expand_field(None, &interest_set());
        assert_eq!(expanded.flags, vec![false, false, false]);
        assert_eq!(expanded.leftover, None);
        assert!(expanded.violations.is_empty());
    }

    #[test]
    fn exhausted_text_still_populates_remaining_flags() {
        let expanded = expand_field(Some("STEM-oriented"), &interest_set());
        assert_eq!(expanded.flags, vec![true, false, false]);
        assert_eq!(expanded.leftover, None);
        assert!(expanded.violations.is_empty());
    }

    #[test]
    fn unmatched_text_becomes_other() {
        let expanded = expand_field(Some("Culinary arts program"), &interest_set());
        assert_eq!(expanded.flags, vec![false, false, false]);
        assert_eq!(expanded.leftover.as_deref(), Some("Culinary arts program"));
    }

    #[test]
    fn label_mismatch_is_flagged_not_silent() {
        // USS matches but the text continues differently from the label.
        let expanded = expand_field(Some("STEM club"), &interest_set());
        assert!(expanded.flags[0]);
        assert_eq!(expanded.violations.len(), 1);
        assert!(matches!(
            expanded.violations[0],
            ViolationKind::LabelMismatch { .. }
        ));
    }

    #[test]
    fn bad_delimiter_is_flagged() {
        let expanded = expand_field(Some("STEM-oriented; ABM-oriented"), &interest_set());
        assert!(
            expanded
                .violations
                .iter()
                .any(|kind| matches!(kind, ViolationKind::DelimiterMismatch { .. }))
        );
    }

    #[test]
    fn render_is_the_scan_inverse() {
        let set = interest_set();
        let flags = vec![true, true, false];
        let text = render_sequence(&flags, &set);
        assert_eq!(text, "STEM-oriented, ABM-oriented");
        let expanded = expand_field(Some(&text), &set);
        assert_eq!(expanded.flags, flags);
        assert_eq!(expanded.leftover, None);
        assert!(expanded.violations.is_empty());
    }
}
