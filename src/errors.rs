use thiserror::Error;

/// Error type for the fallible edges of the crate: configuration I/O, date
/// inputs and form wiring. Number parsing never produces one of these.
#[derive(Debug, Error)]
pub enum FieldError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Invalid date `{0}`, expected YYYY-MM-DD")]
    InvalidDate(String),
    #[error("Element not found: {0}")]
    MissingElement(String),
    #[error("Field not attached: {0}")]
    NotAttached(String),
}
