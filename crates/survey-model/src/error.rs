use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("unknown college type: {0}")]
    UnknownCollegeType(String),
    #[error("unknown column group tag: {0}")]
    UnknownGroupTag(String),
    #[error("unknown info type: {0}")]
    UnknownInfoType(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
