//! Domain error types
//!
//! These errors are framework-agnostic and represent business-level failures.

use std::fmt;

#[derive(Debug)]
pub enum DomainError {
    /// Resource not found
    NotFound,
    /// Validation error with message
    Validation(String),
    /// An internal invariant was broken (e.g. an id remapped twice in one copy)
    Integrity(String),
    /// Database/persistence error
    Database(String),
    /// Generic internal error
    Internal(String),
}

impl DomainError {
    /// Whether the caller may see the message verbatim.
    pub fn is_client_error(&self) -> bool {
        matches!(self, DomainError::NotFound | DomainError::Validation(_))
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomainError::NotFound => write!(f, "Resource not found"),
            DomainError::Validation(msg) => write!(f, "Validation error: {}", msg),
            DomainError::Integrity(msg) => write!(f, "Integrity violation: {}", msg),
            DomainError::Database(msg) => write!(f, "Database error: {}", msg),
            DomainError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for DomainError {}

// Conversion from SeaORM errors (used in infrastructure layer)
impl From<sea_orm::DbErr> for DomainError {
    fn from(e: sea_orm::DbErr) -> Self {
        DomainError::Database(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_errors_are_not_client_errors() {
        assert!(DomainError::NotFound.is_client_error());
        assert!(DomainError::Validation("bad".into()).is_client_error());
        assert!(!DomainError::Integrity("dup".into()).is_client_error());
        assert!(!DomainError::from(sea_orm::DbErr::Custom("boom".into())).is_client_error());
    }

    #[test]
    fn test_display_keeps_detail_for_logs() {
        let err = DomainError::from(sea_orm::DbErr::Custom("constraint failed".into()));
        assert!(err.to_string().contains("constraint failed"));
    }
}
