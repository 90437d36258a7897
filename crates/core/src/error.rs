//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Mirrors the failure taxonomy every public operation eventually folds into a
/// response classification. None of these cross the economy boundary as-is.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Resolution found nothing. A normal terminal state, not a fault.
    #[error("not found")]
    NotFound,

    /// The domain refused the operation (insufficient funds, no space, unsupported).
    #[error("rejected: {0}")]
    Rejected(String),

    /// Input was rejected before any mutation (e.g. a negative amount).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// An identifier was invalid (e.g. an empty provider key).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// The backing store failed (IO, database, timeout).
    #[error("backing store failure: {0}")]
    BackingStore(String),
}

impl DomainError {
    pub fn rejected(msg: impl Into<String>) -> Self {
        Self::Rejected(msg.into())
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn backing_store(msg: impl Into<String>) -> Self {
        Self::BackingStore(msg.into())
    }

    pub fn not_found() -> Self {
        Self::NotFound
    }

    /// Whether this is an expected outcome rather than a fault worth logging as an error.
    pub fn is_expected(&self) -> bool {
        !matches!(self, Self::BackingStore(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_backing_store_failures_are_unexpected() {
        assert!(DomainError::not_found().is_expected());
        assert!(DomainError::rejected("insufficient funds").is_expected());
        assert!(DomainError::invalid_input("negative amount").is_expected());
        assert!(DomainError::invalid_id("empty key").is_expected());
        assert!(!DomainError::backing_store("disk full").is_expected());
    }

    #[test]
    fn display_includes_detail() {
        let err = DomainError::invalid_input("negative amount");
        assert_eq!(err.to_string(), "invalid input: negative amount");
    }
}
