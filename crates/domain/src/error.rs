use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Invalid session ID: {0}")]
    InvalidSessionId(String),

    #[error("Invalid session: {0}")]
    InvalidSession(String),

    #[error("Local storage error: {0}")]
    Storage(String),

    #[error("Remote store error: {0}")]
    Remote(String),
}

pub type Result<T> = std::result::Result<T, DomainError>;
