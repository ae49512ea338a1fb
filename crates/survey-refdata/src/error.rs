#![deny(unsafe_code)]

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum RefDataError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse CSV {path}: {message}")]
    Csv { path: PathBuf, message: String },

    #[error("failed to parse TOML config {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("missing required column '{column}' in {path}")]
    MissingColumn { path: PathBuf, column: String },

    #[error("invalid row {row} in {path}: {message}")]
    InvalidRow {
        path: PathBuf,
        row: usize,
        message: String,
    },

    #[error("invalid data dictionary {path}: {message}")]
    Dictionary { path: PathBuf, message: String },

    #[error("option reference {path} violates scan invariants:\n{}", .violations.join("\n"))]
    OptionInvariant {
        path: PathBuf,
        violations: Vec<String>,
    },
}

impl RefDataError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn csv(path: impl Into<PathBuf>, error: &csv::Error) -> Self {
        Self::Csv {
            path: path.into(),
            message: error.to_string(),
        }
    }
}
