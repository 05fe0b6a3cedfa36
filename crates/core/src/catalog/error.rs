use thiserror::Error;

/// Errors that can occur when building filter state from user input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FilterError {
    #[error("Invalid ordering: {0} (expected one of title, -title, id, -id)")]
    InvalidOrdering(String),
}

/// Result type for filter parsing.
pub type Result<T> = std::result::Result<T, FilterError>;
