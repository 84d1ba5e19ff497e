// src/error.rs

//! Error types for the gourmet service
//!
//! All library code returns `crate::Result`, and the HTTP layer maps
//! each variant to a status code in `server::handlers`.

use serde::Serialize;
use thiserror::Error;

/// A single violated field reported by recipe validation
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FieldError {
    /// Field name as it appears in request bodies
    pub field: &'static str,
    /// Human-readable description of the violation
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Errors that can occur in the gourmet service
#[derive(Error, Debug)]
pub enum Error {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A record that was asked for does not exist
    #[error("{0} not found")]
    NotFound(String),

    /// A uniqueness constraint was violated
    #[error("{0}")]
    Conflict(String),

    /// Credentials or token rejected
    #[error("{0}")]
    Unauthorized(String),

    /// One or more request fields violated the recipe invariants
    #[error("Validation failed for {} field(s)", .0.len())]
    Validation(Vec<FieldError>),

    /// Password hashing or hash parsing failure
    #[error("Password hashing error: {0}")]
    PasswordHash(String),

    /// Token signing failure
    #[error("Token error: {0}")]
    Token(String),

    /// Internal failure that has no more specific category
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Convenience result type used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let err = Error::NotFound("Recipe 42".to_string());
        assert_eq!(err.to_string(), "Recipe 42 not found");
    }

    #[test]
    fn test_validation_display_counts_fields() {
        let err = Error::Validation(vec![
            FieldError::new("title", "title must not be empty"),
            FieldError::new("time_minutes", "time_minutes must be a positive integer"),
        ]);
        assert_eq!(err.to_string(), "Validation failed for 2 field(s)");
    }

    #[test]
    fn test_field_error_serializes() {
        let field = FieldError::new("title", "title must not be empty");
        let json = serde_json::to_string(&field).unwrap();
        assert!(json.contains("\"field\":\"title\""));
        assert!(json.contains("must not be empty"));
    }
}
