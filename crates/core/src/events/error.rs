use thiserror::Error;

/// Errors that can occur while decoding a live-channel payload.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EventError {
    #[error("Malformed live event: {0}")]
    Malformed(String),
}

/// Result type for live event decoding.
pub type Result<T> = std::result::Result<T, EventError>;
