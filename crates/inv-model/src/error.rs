use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("{0} must not be empty")]
    EmptyField(&'static str),
    #[error("section '{section}' not found")]
    SectionNotFound { section: String },
    #[error("item index {index} out of range for section '{section}' ({len} items)")]
    ItemIndexOutOfRange {
        section: String,
        index: usize,
        len: usize,
    },
}

pub type Result<T> = std::result::Result<T, ModelError>;
