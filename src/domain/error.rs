//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent invalid simulation parameters.
///
/// Recruitment itself is total; only strategy construction can fail.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("invalid recruiting strategy: {message}")]
    InvalidStrategy { message: String },
}

impl DomainError {
    pub fn invalid_strategy(message: impl Into<String>) -> Self {
        Self::InvalidStrategy {
            message: message.into(),
        }
    }
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
