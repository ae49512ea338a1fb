use survey_model::InfoType;
use thiserror::Error;

/// Domain failures raised by the cleaning stages.
///
/// Stage functions return `anyhow::Result`; these typed values are the
/// failures worth matching on, and convert into `anyhow::Error` at the
/// `?` boundary.
#[derive(Debug, Error)]
pub enum CleanError {
    #[error("no option set loaded for info type '{0}'")]
    MissingOptionSet(InfoType),

    #[error("malformed multi-select text in row {row} ({info_type}): {detail}")]
    MalformedSequence {
        row: usize,
        info_type: InfoType,
        detail: String,
    },

    #[error("column '{column}' already exists in the table")]
    DuplicateColumn { column: String },

    #[error("row {row}: cannot parse '{value}' as a row index")]
    BadIndex { row: usize, value: String },

    #[error("correction file has more than one row for index {index}")]
    DuplicateCorrection { index: usize },

    #[error("final-name table has more than one row for '{name}'")]
    DuplicateFinalName { name: String },

    #[error("row {row}, column '{column}': {message}")]
    InvalidValue {
        row: usize,
        column: String,
        message: String,
    },

    #[error(
        "inconsistent college records for: {}; fix the name corrections and re-run",
        .names.join(", ")
    )]
    InconsistentColleges { names: Vec<String> },
}
