use serde::{Deserialize, Serialize};

use crate::enums::InfoType;

/// One selectable answer of a multi-select question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionEntry {
    /// The full option label as serialized into the survey export.
    pub label: String,
    /// Column identifier assigned to this option's boolean flag.
    pub shortcut: String,
    /// Unique starting substring: a prefix of `label` that no sibling
    /// option's label starts with, used to detect the option at the
    /// current scan position.
    pub uss: String,
}

/// The ordered option list for one info type.
///
/// Order matters: the survey tool serializes selected options in table
/// order, and the expander scans them in the same order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionSet {
    pub info_type: InfoType,
    pub entries: Vec<OptionEntry>,
}

impl OptionSet {
    pub fn new(info_type: InfoType) -> Self {
        Self {
            info_type,
            entries: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Column names of the boolean flags this set expands into.
    pub fn shortcuts(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.shortcut.as_str())
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.label.as_str())
    }

    /// Check the invariants the expander depends on.
    ///
    /// Returns one message per violation; an empty vector means the set is
    /// safe to scan with. The checks:
    /// - USS and shortcut are non-empty
    /// - USS is a prefix of its own label
    /// - no sibling label starts with another entry's USS
    /// - shortcuts are unique within the set
    pub fn invariant_violations(&self) -> Vec<String> {
        let mut violations = Vec::new();
        for (idx, entry) in self.entries.iter().enumerate() {
            if entry.uss.is_empty() {
                violations.push(format!(
                    "{}: option '{}' has an empty unique starting substring",
                    self.info_type, entry.label
                ));
                continue;
            }
            if entry.shortcut.is_empty() {
                violations.push(format!(
                    "{}: option '{}' has an empty shortcut",
                    self.info_type, entry.label
                ));
            }
            if !entry.label.starts_with(&entry.uss) {
                violations.push(format!(
                    "{}: '{}' is not a prefix of option '{}'",
                    self.info_type, entry.uss, entry.label
                ));
            }
            for (other_idx, other) in self.entries.iter().enumerate() {
                if other_idx != idx && other.label.starts_with(&entry.uss) {
                    violations.push(format!(
                        "{}: starting substring '{}' of option '{}' also matches option '{}'",
                        self.info_type, entry.uss, entry.label, other.label
                    ));
                }
            }
        }
        for (idx, entry) in self.entries.iter().enumerate() {
            if self.entries[..idx]
                .iter()
                .any(|other| other.shortcut == entry.shortcut)
            {
                violations.push(format!(
                    "{}: duplicate shortcut '{}'",
                    self.info_type, entry.shortcut
                ));
            }
        }
        violations
    }
}
